//! # Gateway Inspector - Captured Traffic Decoder
//!
//! Inspection core of the admin console for a multi-provider LLM gateway.
//! The gateway records the raw request and response bodies of every proxied
//! call; this crate turns those bytes into something an operator can read.
//!
//! ## Features
//!
//! - **Decoding**: pretty-prints JSON bodies and the JSON frames of SSE streams
//! - **Classification**: JSON, event stream, text, binary or empty
//! - **Reply extraction**: rebuilds the assistant reply from OpenAI chat
//!   completions / responses and Anthropic messages, streaming or not
//! - **Safe rendering**: Prism-style JSON highlighting or HTML escaping
//! - **Log access**: typed client for the gateway's request-log endpoints
//!
//! ### Pipeline
//!
//! ```text
//!                   ┌──────────┐     ┌──────────┐
//!   body bytes ───> │  decode  │ ──> │  render  │ ──> markup-safe text
//!        │          └──────────┘     └──────────┘
//!        │          ┌──────────┐
//!        ├────────> │ classify │ ──> PayloadFormat
//!        │          └──────────┘
//!        │          ┌──────────┐
//!        └────────> │ extract  │ ──> assistant reply (by ApiType)
//!                   └──────────┘
//! ```
//!
//! None of the pipeline stages fail: malformed input degrades to placeholder
//! text or `None`.
//!
//! ### Reply Field Paths
//!
//! | API Type                  | Non-streaming                 | Streaming frame                      |
//! |---------------------------|-------------------------------|--------------------------------------|
//! | `openai_chat_completions` | `choices[0].message.content`  | `choices[0].delta.content`           |
//! | `openai_responses`        | `choices[0].message.content`  | `choices[0].delta.content`           |
//! | `anthropic_messages`      | `content[type=text].text`     | `content_block_delta` → `delta.text` |
//! | `openai_models`           | -                             | -                                    |
//!
//! ## Quick Start
//!
//! ```rust
//! use inspector::models::ApiType;
//! use inspector::payload::{decode, extract, render_safe};
//!
//! let body = b"data: {\"choices\":[{\"delta\":{\"content\":\"Hel\"}}]}\n\
//!              data: {\"choices\":[{\"delta\":{\"content\":\"lo\"}}]}\n\
//!              data: [DONE]";
//!
//! let reply = extract(Some(body), Some(ApiType::OpenaiChatCompletions));
//! assert_eq!(reply.as_deref(), Some("Hello"));
//!
//! assert_eq!(decode(None), "Empty");
//! assert_eq!(render_safe(Some(b"<b>")), "&lt;b&gt;");
//! ```
//!
//! ### Inspecting a Stored Log
//!
//! ```rust,ignore
//! use inspector::{Config, GatewayClient, LogInspection};
//!
//! let config = Config::load(None)?;
//! let client = GatewayClient::new(&config.gateway)?;
//! let log = client.get_request_log(request_id).await?;
//!
//! let inspection = LogInspection::from_log(&log);
//! println!("{}", inspection.response.decoded);
//! if let Some(reply) = inspection.assistant_reply {
//!     println!("Assistant: {reply}");
//! }
//! ```
//!
//! ## Modules
//!
//! - [`payload`]: Decoder, classifier, extractor and renderer
//! - [`models`]: API types and request-log records
//! - [`client`]: Gateway admin API client
//! - [`inspect`]: Per-entry inspection view
//! - [`config`]: Configuration management
//! - [`error`]: Error types and result aliases

pub mod client;
pub mod config;
pub mod error;
pub mod inspect;
pub mod models;
pub mod payload;

// Re-exports for convenience
pub use client::GatewayClient;
pub use config::Config;
pub use error::{InspectorError, Result};
pub use inspect::{LogInspection, PayloadRole, PayloadView};
pub use models::{ApiType, RequestLog, RequestLogFilter, RequestLogPage, RequestLogSummary};
pub use payload::{classify, decode, extract, render_safe, EventFrame, PayloadFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
