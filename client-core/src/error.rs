use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// A remote operation failed.
///
/// Every variant renders a message suitable for showing to an end user.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Error bodies as returned by the labeling API (`detail`) or a proxy in front of it (`error`).
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
}

impl ApiError {
    pub fn transport(url: &str, source: reqwest::Error) -> Self {
        ApiError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub fn status(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError::Status {
            status,
            message: message.into(),
        }
    }

    /// Build a status error from a non-success response body.
    pub fn from_body(status: StatusCode, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.detail.or(b.error))
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            });

        ApiError::Status { status, message }
    }

    /// The HTTP status, when the server answered at all.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            ApiError::Transport { source, .. } => source.status(),
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Decode { .. } => None,
        }
    }
}

/// Reject non-success responses, keeping the server's message.
pub async fn ensure_success(url: &str, response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .map_err(|e| ApiError::transport(url, e))?;

    tracing::debug!(status = %status, body = %body, url = %url, "Remote call rejected");

    Err(ApiError::from_body(status, &body))
}
