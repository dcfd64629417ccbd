//! SSE data frames inside captured bodies.
//!
//! Captured streams are parsed leniently: any line whose trimmed form starts
//! with `data:` is a frame, with or without a space after the colon. Other
//! lines (`event:`, `id:`, comments, blank separators) are not frames.

use serde_json::Value;

use super::{DATA_PREFIX, DONE_MARKER};

/// One `data:` line of a captured event stream.
#[derive(Debug, Clone, PartialEq)]
pub enum EventFrame {
    /// Payload parsed as JSON
    Json(Value),
    /// Stream termination marker
    Done,
    /// Payload that is not valid JSON (trimmed)
    Raw(String),
}

/// Parse one line into a frame, or `None` when it is not a `data:` line.
pub fn parse_frame(line: &str) -> Option<EventFrame> {
    let data = line.trim().strip_prefix(DATA_PREFIX)?.trim();

    if data == DONE_MARKER {
        return Some(EventFrame::Done);
    }

    Some(match serde_json::from_str(data) {
        Ok(json) => EventFrame::Json(json),
        Err(_) => EventFrame::Raw(data.to_string()),
    })
}

/// Iterate the frames of a captured stream in arrival order.
pub fn frames(text: &str) -> impl Iterator<Item = EventFrame> + '_ {
    text.split('\n').filter_map(parse_frame)
}
