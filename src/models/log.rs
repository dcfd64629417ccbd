//! Request-log records as served by the gateway's admin API.
//!
//! Bodies travel as JSON arrays of byte values (`[123, 34, ...]`), which
//! serde maps straight onto `Vec<u8>`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::api_type::{deserialize_lenient, ApiType};

/// One proxied request, without captured bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLogSummary {
    /// Gateway-assigned request id
    pub request_id: Uuid,
    /// Gateway key used by the client
    #[serde(default)]
    pub gateway_key_id: Option<Uuid>,
    /// Wire protocol of the endpoint; `None` when absent or unrecognized
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub api_type: Option<ApiType>,
    /// Upstream model name
    #[serde(default)]
    pub model: Option<String>,
    /// Alias the client requested
    #[serde(default)]
    pub alias: Option<String>,
    /// Provider name
    #[serde(default)]
    pub provider: Option<String>,
    /// Upstream endpoint URL
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Upstream HTTP status
    #[serde(default)]
    pub status_code: Option<i32>,
    /// End-to-end latency
    #[serde(default)]
    pub latency_ms: Option<i32>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub client_ip: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub user_agent: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub request_content_type: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub response_content_type: Option<String>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub prompt_tokens: Option<i64>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub completion_tokens: Option<i64>,
    #[serde(default)]
    #[allow(missing_docs)]
    pub total_tokens: Option<i64>,
    /// When the request was received
    pub created_at: DateTime<Utc>,
}

/// One proxied request with its captured bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestLog {
    /// Metadata shared with the list view
    #[serde(flatten)]
    pub summary: RequestLogSummary,
    /// Captured request body, if any
    #[serde(default)]
    pub request_body: Option<Vec<u8>>,
    /// Captured response body, if any
    #[serde(default)]
    pub response_body: Option<Vec<u8>>,
}

impl RequestLog {
    /// Request id
    pub fn id(&self) -> Uuid {
        self.summary.request_id
    }

    /// Wire protocol, if known
    pub fn api_type(&self) -> Option<ApiType> {
        self.summary.api_type
    }

    /// Borrow the captured request body.
    pub fn request_body(&self) -> Option<&[u8]> {
        self.request_body.as_deref()
    }

    /// Borrow the captured response body.
    pub fn response_body(&self) -> Option<&[u8]> {
        self.response_body.as_deref()
    }
}

/// Optional filters for the list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestLogFilter {
    #[allow(missing_docs)]
    pub model: Option<String>,
    #[allow(missing_docs)]
    pub alias: Option<String>,
    #[allow(missing_docs)]
    pub provider: Option<String>,
    #[allow(missing_docs)]
    pub client_ip: Option<String>,
}

impl RequestLogFilter {
    /// Query pairs for the filters that are set, in a stable order.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        [
            ("model", &self.model),
            ("alias", &self.alias),
            ("provider", &self.provider),
            ("client_ip", &self.client_ip),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| (key, v.to_string()))
        })
        .collect()
    }
}

/// One page of log summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestLogPage {
    /// Entries on this page
    pub data: Vec<RequestLogSummary>,
    /// Total number of matching entries
    pub total: u64,
}

/// The list endpoint answers either with a page object or with a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum PageBody {
    Page {
        data: Vec<RequestLogSummary>,
        total: u64,
    },
    Bare(Vec<RequestLogSummary>),
}

impl<'de> Deserialize<'de> for RequestLogPage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match PageBody::deserialize(deserializer)? {
            PageBody::Page { data, total } => Self { data, total },
            PageBody::Bare(data) => Self {
                total: data.len() as u64,
                data,
            },
        })
    }
}
