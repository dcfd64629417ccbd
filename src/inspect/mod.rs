//! Per-entry inspection view.
//!
//! Runs the payload pipeline over both captured bodies of a [`RequestLog`].
//! The assistant reply is only extracted from the response body; request
//! bodies carry prompts, not replies.

use serde::Serialize;
use uuid::Uuid;

use crate::models::{ApiType, RequestLog};
use crate::payload::{self, PayloadFormat};

/// Which side of the exchange a body was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadRole {
    /// Client to gateway
    Request,
    /// Upstream to client
    Response,
}

/// Display forms of one captured body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PayloadView {
    /// Request or response
    pub role: PayloadRole,
    /// Detected shape
    pub format: PayloadFormat,
    /// Captured size in bytes, `None` when nothing was captured
    pub size: Option<usize>,
    /// Decoded text
    pub decoded: String,
    /// Markup-safe rendering of `decoded`
    pub html: String,
}

impl PayloadView {
    /// Build the view for one body.
    pub fn new(role: PayloadRole, body: Option<&[u8]>, highlight: bool) -> Self {
        let decoded = payload::decode(body);
        let html = if highlight {
            payload::render_text(&decoded)
        } else {
            payload::escape_html(&decoded)
        };

        Self {
            role,
            format: payload::classify(body),
            size: body.map(<[u8]>::len),
            decoded,
            html,
        }
    }
}

/// Everything the log viewer shows for one request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogInspection {
    /// Request id
    pub request_id: Uuid,
    /// Wire protocol used for extraction
    pub api_type: Option<ApiType>,
    /// Captured request body
    pub request: PayloadView,
    /// Captured response body
    pub response: PayloadView,
    /// Reply text reconstructed from the response, if any
    pub assistant_reply: Option<String>,
}

impl LogInspection {
    /// Inspect a log entry with JSON highlighting enabled.
    pub fn from_log(log: &RequestLog) -> Self {
        Self::with_highlight(log, true)
    }

    /// Inspect a log entry, choosing between highlighting and plain escaping.
    pub fn with_highlight(log: &RequestLog, highlight: bool) -> Self {
        let assistant_reply = payload::extract(log.response_body(), log.api_type());
        tracing::debug!(
            request_id = %log.id(),
            api_type = ?log.api_type(),
            has_reply = assistant_reply.is_some(),
            "Inspected request log"
        );

        Self {
            request_id: log.id(),
            api_type: log.api_type(),
            request: PayloadView::new(PayloadRole::Request, log.request_body(), highlight),
            response: PayloadView::new(PayloadRole::Response, log.response_body(), highlight),
            assistant_reply,
        }
    }
}
