//! HTTP client for the capture backend
//!
//! The backend serves `GET /api/requests?limit=N` and
//! `GET /api/requests/{id}`; both must answer with `application/json`.
//! A 2xx with any other content type is treated as a failed fetch, and a
//! 404 on the detail endpoint is a distinct "not found" outcome.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use reqlens_core::{TransactionDetail, TransactionSummary};
use reqwest::{header, Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("backend returned HTTP {0}")]
    Status(u16),

    #[error("unexpected response content type {0:?}")]
    ContentType(String),

    #[error("request not found")]
    NotFound,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

/// List endpoint envelope; count/limit/offset are advisory and ignored
#[derive(Debug, Deserialize)]
struct ListResponse {
    items: Vec<TransactionSummary>,
}

/// Client for the capture backend's read API
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::builder()
                .timeout(Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the captured-request list, newest first
    pub async fn fetch_requests(&self, limit: usize) -> Result<Vec<TransactionSummary>, ApiError> {
        let url = format!("{}/api/requests?limit={}", self.base_url, limit);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        require_json(&response)?;

        let list: ListResponse = response.json().await.map_err(ApiError::Decode)?;
        tracing::debug!("Fetched {} requests from {}", list.items.len(), self.base_url);
        Ok(list.items)
    }

    /// Fetch full detail for one captured request
    pub async fn fetch_request(&self, id: &str) -> Result<TransactionDetail, ApiError> {
        let encoded = utf8_percent_encode(id, NON_ALPHANUMERIC);
        let url = format!("{}/api/requests/{}", self.base_url, encoded);
        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        require_json(&response)?;

        response.json().await.map_err(ApiError::Decode)
    }
}

fn require_json(response: &Response) -> Result<(), ApiError> {
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if content_type.contains("application/json") {
        Ok(())
    } else {
        Err(ApiError::ContentType(content_type.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_envelope_decodes() {
        let body = r#"{
            "items": [{
                "request_id": "r1",
                "method": "GET",
                "host": "example.com",
                "path": "/",
                "query": "",
                "ip": "127.0.0.1",
                "content_type": "",
                "body_size": 0,
                "tls_enabled": false,
                "received_at": "2026-08-25T10:00:00Z"
            }],
            "count": 1,
            "limit": 200,
            "offset": 0
        }"#;
        let list: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].request_id, "r1");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://127.0.0.1:8080/");
        assert_eq!(client.base_url(), "http://127.0.0.1:8080");
    }
}
