//! Admin API client for the gateway's request log.
//!
//! Covers the two read-only endpoints the log viewer needs:
//!
//! | Endpoint              | Method | Returns                         |
//! |-----------------------|--------|---------------------------------|
//! | `/request-logs`       | GET    | [`RequestLogPage`] of summaries |
//! | `/request-logs/{id}`  | GET    | [`RequestLog`] with bodies      |
//!
//! Requests carry the configured bearer token. A 401 surfaces as
//! [`InspectorError::Unauthorized`]; the caller owns whatever session it
//! keeps and decides how to re-authenticate.
//!
//! # Usage
//!
//! ```rust,ignore
//! use inspector::client::GatewayClient;
//! use inspector::config::GatewayConfig;
//! use inspector::models::RequestLogFilter;
//!
//! let client = GatewayClient::new(&GatewayConfig::default())?;
//! let page = client.list_request_logs(20, 0, &RequestLogFilter::default()).await?;
//! let log = client.get_request_log(page.data[0].request_id).await?;
//! ```
//!
//! [`RequestLogPage`]: crate::models::RequestLogPage
//! [`RequestLog`]: crate::models::RequestLog
//! [`InspectorError::Unauthorized`]: crate::error::InspectorError::Unauthorized

mod gateway;

pub use gateway::GatewayClient;
