//! Byte decoder: captured body to printable text.

use super::sse::{parse_frame, EventFrame};
use super::{is_event_stream, parse_json_document, pretty_json, text_of, EMPTY_PLACEHOLDER};

/// Decode a captured body for display.
///
/// - absent body: `"Empty"`
/// - invalid UTF-8: `"[Binary Data: N bytes]"`
/// - otherwise see [`decode_text`]
pub fn decode(body: Option<&[u8]>) -> String {
    let Some(bytes) = body else {
        return EMPTY_PLACEHOLDER.to_string();
    };

    match text_of(bytes) {
        Some(text) => decode_text(text),
        None => format!("[Binary Data: {} bytes]", bytes.len()),
    }
}

/// Pretty-print a JSON document, or reformat the JSON frames of an event
/// stream. Text that is neither is returned unchanged.
pub fn decode_text(text: &str) -> String {
    if let Some(document) = parse_json_document(text) {
        return pretty_json(&document);
    }

    if !is_event_stream(text) {
        return text.to_string();
    }

    // split/join on '\n' keeps '\r' and trailing empty lines intact
    text.split('\n')
        .map(|line| match parse_frame(line) {
            Some(EventFrame::Json(json)) => format!("data: {}", pretty_json(&json)),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
