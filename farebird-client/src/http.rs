use std::time::Duration;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;

use farebird_core::{ApiError, ApiResult};

/// REST client for the booking backend. One shared connection pool, a
/// bounded per-request timeout, and a single response-classification
/// path for every operation.
pub struct ApiClient {
    pub(crate) http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Network(err.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and deserializes a 2xx body; anything else
    /// collapses into a recoverable [`ApiError`].
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> ApiResult<T> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|err| ApiError::Network(format!("invalid response body: {err}")))
        } else {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), "backend rejected request");
            Err(classify_failure(status, &body))
        }
    }
}

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Network("request timed out".to_string())
    } else {
        ApiError::Network(err.to_string())
    }
}

/// Maps a non-2xx response to the error taxonomy. Only 401 clears the
/// session upstream; every other 4xx is a content problem.
fn classify_failure(status: StatusCode, body: &str) -> ApiError {
    let message = extract_message(body).unwrap_or_else(|| fallback_message(status));
    match status.as_u16() {
        401 => ApiError::Auth(message),
        400..=499 => ApiError::Validation(message),
        other => ApiError::Server {
            status: other,
            message,
        },
    }
}

/// Pulls a human-readable message out of an error body. The backend
/// answers either with a single `detail` string or with a map of field
/// names to lists of messages; the latter is flattened into one
/// comma-separated string.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let fields = value.as_object()?;

    if let Some(detail) = fields.get("detail").and_then(Value::as_str) {
        return Some(detail.to_string());
    }

    let mut messages = Vec::new();
    for field_value in fields.values() {
        match field_value {
            Value::String(message) => messages.push(message.clone()),
            Value::Array(items) => {
                messages.extend(items.iter().filter_map(Value::as_str).map(String::from));
            }
            _ => {}
        }
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(", "))
    }
}

fn fallback_message(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("Request failed: {reason}"),
        None => format!("Request failed with status {}", status.as_u16()),
    }
}
