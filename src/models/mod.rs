//! Request-log records and protocol metadata.
//!
//! These types mirror the gateway's admin API contract:
//! - `ApiType`: wire-protocol family of the upstream endpoint
//! - `RequestLogSummary` / `RequestLog`: list and detail records
//! - `RequestLogFilter` / `RequestLogPage`: list query and response
//!
//! # Example
//!
//! ```
//! use inspector::models::ApiType;
//!
//! let api_type: ApiType = "anthropic_messages".parse().unwrap();
//! assert_eq!(api_type, ApiType::AnthropicMessages);
//! assert_eq!(ApiType::from_wire("some_future_protocol"), None);
//! ```

mod api_type;
mod log;

pub use api_type::ApiType;
pub use log::{RequestLog, RequestLogFilter, RequestLogPage, RequestLogSummary};
