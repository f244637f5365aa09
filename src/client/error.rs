use reqwest::StatusCode;
use thiserror::Error;

/// Errors returned by [`super::WaitlistClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The store answered with a non-success status.
    #[error("API error {status}: {}", code.as_deref().unwrap_or("UNKNOWN"))]
    Api {
        status: StatusCode,
        code: Option<String>,
        message: Option<String>,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    pub fn is_duplicate(&self) -> bool {
        match self {
            ClientError::Api { status, code, .. } => {
                *status == StatusCode::CONFLICT || code.as_deref() == Some("DUPLICATE_EMAIL")
            }
            _ => false,
        }
    }

    /// Validation message from a 400 response, if any.
    pub fn invalid_input_message(&self) -> Option<&str> {
        match self {
            ClientError::Api {
                status, message, ..
            } if *status == StatusCode::BAD_REQUEST => message.as_deref(),
            _ => None,
        }
    }
}
