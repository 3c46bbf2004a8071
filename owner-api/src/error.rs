use thiserror::Error;

/// The closed error taxonomy crossing the dashboard API boundary.
///
/// Transport implementations classify raw failures into these variants with
/// [`ApiError::from_status`] / [`ApiError::from_response`]; everything above
/// the transport only ever matches on the taxonomy.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Transient transport failure (offline, DNS, timeout). Retryable.
    #[error("network error: {0}")]
    Network(String),

    /// The server rejected the payload. Never auto-retried.
    #[error("validation failed ({status}): {message}")]
    Validation { status: u16, message: String },

    /// Session expired or missing; handled by the session layer.
    #[error("unauthorized")]
    Unauthorized,

    #[error("unexpected error: {0}")]
    Unknown(String),
}

impl ApiError {
    /// Classify an HTTP status code, using `message` as the human-readable
    /// detail where the variant carries one.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        match status {
            401 | 403 => ApiError::Unauthorized,
            400..=499 => ApiError::Validation {
                status,
                message: message.into(),
            },
            _ => ApiError::Unknown(message.into()),
        }
    }

    /// Classify an HTTP response, extracting the error message from the
    /// body. The backend places it under `message`, `error`, or `detail`
    /// depending on the endpoint; a body that is not JSON is used verbatim.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                ["message", "error", "detail"]
                    .iter()
                    .find_map(|key| value.get(key)?.as_str().map(str::to_string))
            })
            .unwrap_or_else(|| body.to_string());
        Self::from_status(status, message)
    }

    /// Whether a caller may retry the failed call unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
