//! Assistant reply extraction from captured response bodies.
//!
//! # Field Paths
//!
//! | API type                     | Whole document                  | Stream frame                      |
//! |------------------------------|---------------------------------|-----------------------------------|
//! | `openai_chat_completions`    | `choices[0].message.content`    | `choices[0].delta.content`        |
//! | `openai_responses`           | `choices[0].message.content`    | `choices[0].delta.content`        |
//! | `anthropic_messages`         | `content[type=text].text`       | `delta.text` of `content_block_delta` |
//! | `openai_models`              | (none)                          | (none)                            |
//!
//! A parsed document that yields nothing falls through to the stream scan,
//! so a body that is valid JSON but happens to contain `data:` is still
//! scanned line by line.

use serde_json::Value;

use super::sse::{frames, EventFrame};
use super::{is_event_stream, parse_json_document, text_of};
use crate::models::ApiType;

/// Extract the assistant reply from a captured body.
///
/// Returns `None` when the body or api type is absent, the body is not
/// UTF-8, or nothing matching the protocol's field paths was found.
pub fn extract(body: Option<&[u8]>, api_type: Option<ApiType>) -> Option<String> {
    let (bytes, api_type) = (body?, api_type?);
    let text = text_of(bytes)?;
    extract_text(text, api_type)
}

/// Extract the assistant reply from decoded text.
pub fn extract_text(text: &str, api_type: ApiType) -> Option<String> {
    if let Some(document) = parse_json_document(text) {
        if let Some(content) = document_content(api_type, &document) {
            return Some(content);
        }
        tracing::debug!(%api_type, "JSON body has no reply content, scanning for frames");
    }

    if !is_event_stream(text) {
        return None;
    }

    let mut content = String::new();
    for frame in frames(text) {
        // Done and unparsable frames are skipped, the scan continues
        if let EventFrame::Json(json) = frame {
            if let Some(delta) = frame_delta(api_type, &json) {
                content.push_str(delta);
            }
        }
    }

    if content.is_empty() {
        None
    } else {
        Some(content)
    }
}

fn document_content(api_type: ApiType, document: &Value) -> Option<String> {
    match api_type {
        ApiType::OpenaiChatCompletions => openai_chat_message(document),
        ApiType::OpenaiResponses => openai_responses_message(document),
        ApiType::OpenaiModels => None,
        ApiType::AnthropicMessages => anthropic_text_blocks(document),
    }
}

fn frame_delta(api_type: ApiType, frame: &Value) -> Option<&str> {
    match api_type {
        ApiType::OpenaiChatCompletions => openai_chat_delta(frame),
        ApiType::OpenaiResponses => openai_responses_delta(frame),
        ApiType::OpenaiModels => None,
        ApiType::AnthropicMessages => anthropic_text_delta(frame),
    }
}

/// `choices[0].message.content`, when a non-empty string.
fn openai_chat_message(document: &Value) -> Option<String> {
    non_empty(
        document
            .get("choices")?
            .get(0)?
            .get("message")?
            .get("content")?,
    )
    .map(String::from)
}

// The gateway records the responses endpoint in chat-completions shape.
fn openai_responses_message(document: &Value) -> Option<String> {
    openai_chat_message(document)
}

/// Text blocks of `content`, concatenated in order.
fn anthropic_text_blocks(document: &Value) -> Option<String> {
    let blocks = document.get("content")?.as_array()?;
    let text: String = blocks
        .iter()
        .filter(|block| block.get("type").and_then(Value::as_str) == Some("text"))
        .map(|block| block.get("text").and_then(Value::as_str).unwrap_or(""))
        .collect();

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn openai_chat_delta(frame: &Value) -> Option<&str> {
    non_empty(frame.get("choices")?.get(0)?.get("delta")?.get("content")?)
}

fn openai_responses_delta(frame: &Value) -> Option<&str> {
    openai_chat_delta(frame)
}

fn anthropic_text_delta(frame: &Value) -> Option<&str> {
    if frame.get("type")?.as_str()? != "content_block_delta" {
        return None;
    }
    non_empty(frame.get("delta")?.get("text")?)
}

fn non_empty(value: &Value) -> Option<&str> {
    value.as_str().filter(|s| !s.is_empty())
}
