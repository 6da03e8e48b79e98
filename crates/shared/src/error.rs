use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error body the tutorial service sends with non-success responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub const GENERIC_SERVICE_FAILURE: &str = "the tutorial service request failed";

/// Failure of a remote call. Carries the service message verbatim when the
/// service supplied one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", service_message(.message))]
pub struct ServiceError {
    pub status: Option<u16>,
    pub message: Option<String>,
}

impl ServiceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: Some(message.into()),
        }
    }

    pub fn generic() -> Self {
        Self {
            status: None,
            message: None,
        }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    pub fn display_message(&self) -> &str {
        service_message(&self.message)
    }
}

fn service_message(message: &Option<String>) -> &str {
    message
        .as_deref()
        .filter(|message| !message.trim().is_empty())
        .unwrap_or(GENERIC_SERVICE_FAILURE)
}

impl From<ApiError> for ServiceError {
    fn from(value: ApiError) -> Self {
        Self {
            status: None,
            message: value.message,
        }
    }
}
