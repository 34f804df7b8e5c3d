//! LLM error types

use std::time::Duration;
use thiserror::Error;

/// Failure of a single completion request
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Model provider is rate limiting requests (retry after {}s)", .retry_after.as_secs())]
    RateLimited { retry_after: Duration },

    #[error("Model provider returned HTTP {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Could not reach the model provider: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unusable reply from the model: {0}")]
    InvalidResponse(String),

    #[error("No reply from the model within {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Failed to encode or decode a completion payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("LLM client is misconfigured: {0}")]
    Config(String),
}

impl LlmError {
    /// Whether resending the same message could succeed
    ///
    /// Nothing retries automatically; callers use this to decide what to tell the user.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::RateLimited { .. } | LlmError::Network(_) | LlmError::Timeout(_) => true,
            LlmError::ApiError { status, .. } => *status >= 500,
            LlmError::InvalidResponse(_) | LlmError::Json(_) | LlmError::Config(_) => false,
        }
    }

    /// Short advice for the person at the keyboard
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            LlmError::RateLimited { .. } => Some("Wait a moment, then send your message again."),
            LlmError::ApiError { status: 401 | 403, .. } | LlmError::Config(_) => {
                Some("Check that the API key environment variable holds a valid key.")
            }
            LlmError::Network(_) | LlmError::Timeout(_) => Some("Check your connection, then send your message again."),
            LlmError::ApiError { status, .. } if *status >= 500 => Some("Send your message again in a little while."),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16) -> LlmError {
        LlmError::ApiError {
            status,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_server_errors_are_retryable_client_errors_are_not() {
        assert!(api(502).is_retryable());
        assert!(!api(400).is_retryable());
        assert!(!api(401).is_retryable());
        assert!(
            LlmError::RateLimited {
                retry_after: Duration::from_secs(60)
            }
            .is_retryable()
        );
        assert!(LlmError::Timeout(Duration::from_secs(60)).is_retryable());
        assert!(!LlmError::InvalidResponse("empty".to_string()).is_retryable());
    }

    #[test]
    fn test_hints() {
        assert!(api(401).hint().unwrap().contains("API key"));
        assert!(LlmError::Config("missing".to_string()).hint().unwrap().contains("API key"));
        assert!(api(503).hint().is_some());
        assert_eq!(api(400).hint(), None);
        assert_eq!(LlmError::InvalidResponse("x".to_string()).hint(), None);
    }

    #[test]
    fn test_messages_use_whole_seconds() {
        let err = LlmError::RateLimited {
            retry_after: Duration::from_secs(42),
        };
        assert!(err.to_string().contains("42s"));
        assert!(LlmError::Timeout(Duration::from_millis(60_000)).to_string().contains("60s"));
        assert!(api(503).to_string().contains("503"));
    }
}
