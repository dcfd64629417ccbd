//! HTTP client for the gateway admin API.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::error::{InspectorError, Result};
use crate::models::{RequestLog, RequestLogFilter, RequestLogPage};

/// Gateway admin API client
#[derive(Debug, Clone)]
pub struct GatewayClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl GatewayClient {
    /// Create a client from gateway configuration
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| InspectorError::Network(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    /// Replace the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List request log summaries, newest first.
    pub async fn list_request_logs(
        &self,
        limit: u32,
        offset: u32,
        filter: &RequestLogFilter,
    ) -> Result<RequestLogPage> {
        let mut query = vec![("limit", limit.to_string()), ("offset", offset.to_string())];
        query.extend(filter.query_pairs());

        self.get_json("/request-logs", &query).await
    }

    /// Fetch one request log including captured bodies.
    pub async fn get_request_log(&self, request_id: Uuid) -> Result<RequestLog> {
        self.get_json(&format!("/request-logs/{request_id}"), &[])
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%url, "Gateway request");

        let mut request = self
            .http
            .get(&url)
            .query(query)
            .header(CONTENT_TYPE, "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let body = response.bytes().await?;
        let payload: Option<Value> = if is_json {
            serde_json::from_slice(&body).ok()
        } else {
            None
        };

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(%url, "Gateway rejected credentials");
            return Err(InspectorError::Unauthorized);
        }

        if !status.is_success() {
            let message = payload
                .as_ref()
                .and_then(|p| p.get("error"))
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| format!("Request failed with status {}", status.as_u16()));
            return Err(InspectorError::Api {
                status: status.as_u16(),
                message,
            });
        }

        match payload {
            Some(payload) => Ok(serde_json::from_value(payload)?),
            None => Err(InspectorError::UnexpectedResponse(format!(
                "expected JSON from {path}, got {} bytes",
                body.len()
            ))),
        }
    }
}
