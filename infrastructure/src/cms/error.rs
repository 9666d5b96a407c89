//! CMS adapter error types.

use clearflow_application::GatewayError;
use thiserror::Error;

/// Errors from the CMS HTTP adapter.
#[derive(Error, Debug)]
pub enum CmsError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

pub type Result<T> = std::result::Result<T, CmsError>;

impl From<CmsError> for GatewayError {
    fn from(e: CmsError) -> Self {
        match e {
            CmsError::Http { status: 404, message } => GatewayError::NotFound(message),
            CmsError::Http { status, message } => {
                GatewayError::RequestFailed(format!("HTTP {}: {}", status, message))
            }
            CmsError::Transport(e) => GatewayError::ConnectionError(e.to_string()),
            CmsError::InvalidPayload(message) => GatewayError::InvalidResponse(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_404_maps_to_not_found() {
        let e: GatewayError = CmsError::Http {
            status: 404,
            message: "no such product".to_string(),
        }
        .into();
        assert!(matches!(e, GatewayError::NotFound(_)));
    }

    #[test]
    fn test_500_maps_to_request_failed() {
        let e: GatewayError = CmsError::Http {
            status: 500,
            message: "boom".to_string(),
        }
        .into();
        assert!(matches!(e, GatewayError::RequestFailed(_)));
    }
}
