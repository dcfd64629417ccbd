//! Captured-traffic decoding for request-log bodies.
//!
//! The gateway stores request and response bodies as raw bytes. This module
//! turns them into something an operator can read:
//!
//! | Stage       | Entry point        | Output                               |
//! |-------------|--------------------|--------------------------------------|
//! | Decode      | [`decode`]         | Pretty JSON / reformatted SSE / text |
//! | Classify    | [`classify`]       | [`PayloadFormat`]                    |
//! | Extract     | [`extract`]        | Assistant reply text, if any         |
//! | Render      | [`render_safe`]    | Highlighted or HTML-escaped text     |
//!
//! None of these functions fail. Absent, binary or malformed bodies degrade
//! to placeholder text (`decode`, `render_safe`) or `None` (`extract`).
//!
//! # SSE Bodies
//!
//! Streaming responses are captured verbatim:
//! ```text
//! data: {"choices":[{"delta":{"content":"Hel"}}]}
//!
//! data: {"choices":[{"delta":{"content":"lo"}}]}
//!
//! data: [DONE]
//! ```
//!
//! The extractor re-parses raw bytes on its own instead of consuming the
//! decoder's pretty output, since delta concatenation needs the frames.
//!
//! # Usage
//!
//! ```
//! use inspector::models::ApiType;
//! use inspector::payload::{decode, extract};
//!
//! let body = br#"{"choices":[{"message":{"content":"Hi"}}]}"#;
//! assert!(decode(Some(body)).starts_with("{\n  \"choices\""));
//! assert_eq!(
//!     extract(Some(body), Some(ApiType::OpenaiChatCompletions)).as_deref(),
//!     Some("Hi")
//! );
//! ```

mod decoder;
mod extract;
mod render;
mod sse;

use serde::Serialize;
use serde_json::Value;

pub use decoder::{decode, decode_text};
pub use extract::{extract, extract_text};
pub use render::{escape_html, highlight_json, render_safe, render_text, HighlightError};
pub use sse::{frames, parse_frame, EventFrame};

/// Placeholder returned by [`decode`] when no body was captured.
pub const EMPTY_PLACEHOLDER: &str = "Empty";

/// Line prefix of an SSE data frame.
pub const DATA_PREFIX: &str = "data:";

/// Payload of the SSE frame that terminates a stream.
pub const DONE_MARKER: &str = "[DONE]";

/// Coarse shape of a captured body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadFormat {
    /// No body captured
    Empty,
    /// Not valid UTF-8
    Binary,
    /// A single JSON document
    Json,
    /// Text containing SSE `data:` frames
    EventStream,
    /// Anything else
    Text,
}

impl PayloadFormat {
    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            PayloadFormat::Empty => "empty",
            PayloadFormat::Binary => "binary",
            PayloadFormat::Json => "json",
            PayloadFormat::EventStream => "event-stream",
            PayloadFormat::Text => "text",
        }
    }
}

impl std::fmt::Display for PayloadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Classify a captured body using the same predicates as the decoder.
pub fn classify(body: Option<&[u8]>) -> PayloadFormat {
    let Some(bytes) = body else {
        return PayloadFormat::Empty;
    };
    let Some(text) = text_of(bytes) else {
        return PayloadFormat::Binary;
    };

    if parse_json_document(text).is_some() {
        PayloadFormat::Json
    } else if is_event_stream(text) {
        PayloadFormat::EventStream
    } else {
        PayloadFormat::Text
    }
}

/// Parse the whole text as one JSON document.
pub fn parse_json_document(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// True when the text carries at least one SSE data frame marker.
pub fn is_event_stream(text: &str) -> bool {
    text.contains(DATA_PREFIX)
}

/// Two-space pretty print, keys in document order.
/// Strict UTF-8 view of a body, without a leading byte order mark.
pub(crate) fn text_of(bytes: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(bytes).ok()?;
    Some(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Two-space pretty print; integral floats print without a fraction.
pub(crate) fn pretty_json(value: &Value) -> String {
    let mut value = value.clone();
    integral_floats(&mut value);
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string())
}

// Largest integer an f64 holds exactly (2^53).
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

fn integral_floats(value: &mut Value) {
    match value {
        Value::Number(n) => {
            let integral = n
                .as_f64()
                .filter(|f| n.is_f64() && f.fract() == 0.0 && f.abs() < MAX_EXACT_INTEGER);
            if let Some(f) = integral {
                *value = Value::from(f as i64);
            }
        },
        Value::Array(items) => items.iter_mut().for_each(integral_floats),
        Value::Object(map) => map.values_mut().for_each(integral_floats),
        _ => {},
    }
}
