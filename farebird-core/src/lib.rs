pub mod api;
pub mod models;
pub mod notify;
pub mod pii;
pub mod quote;
pub mod search;
pub mod session;

/// Failure taxonomy for calls against the booking backend.
///
/// Every variant is recoverable: callers surface the message and carry on.
/// An empty result set is not represented here at all; listing endpoints
/// return `Ok` with an empty vector.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// Transport-level failure: connection refused, DNS, timeout.
    #[error("network error: {0}")]
    Network(String),
    /// The backend rejected the token (401). Triggers a session clear.
    #[error("{0}")]
    Auth(String),
    /// The backend rejected the request content (other 4xx).
    #[error("{0}")]
    Validation(String),
    /// 5xx or an otherwise unexpected status.
    #[error("server error ({status}): {message}")]
    Server { status: u16, message: String },
}

impl ApiError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ApiError::Auth(_))
    }

    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
