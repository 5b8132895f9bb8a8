use serde_json::json;
use thiserror::Error;
use vercel_runtime::{Body, Response, StatusCode};

use crate::json_response;

pub const GENERIC_ERROR: &str = "An internal server error occurred.";

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("API token is not configured")]
    MissingToken,
    #[error("API credentials are not configured")]
    MissingCredentials,
    #[error("Invalid upstream base URL {0}")]
    BaseUrl(String),
    #[error("Authentication failed with status: {0}")]
    LoginFailed(u16),
    #[error("Token not found in login response.")]
    TokenNotFound,
    #[error("API request failed: {text}")]
    Upstream { status: u16, text: String },
    #[error("{0}")]
    Network(#[from] reqwest::Error),
    #[error("Invalid JSON in upstream response: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProxyError {
    /// Upstream failures keep their status, everything else is a 500
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR.to_owned()
        } else {
            message
        }
    }

    /// Renders the error as `{"error": message}`
    pub fn into_response(self) -> Response<Body> {
        json_response(self.status(), &json!({ "error": self.message() }))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn upstream_status_passes_through() {
        let err = ProxyError::Upstream {
            status: 404,
            text: "Not Found".to_string(),
        };
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), "API request failed: Not Found");
    }

    #[test]
    fn auth_and_config_failures_are_500() {
        for err in [
            ProxyError::MissingToken,
            ProxyError::MissingCredentials,
            ProxyError::LoginFailed(401),
            ProxyError::TokenNotFound,
        ] {
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }
    }

    #[test]
    fn login_failure_names_status() {
        assert_eq!(
            ProxyError::LoginFailed(403).message(),
            "Authentication failed with status: 403"
        );
    }

    #[test]
    fn upstream_without_reason_keeps_prefix() {
        let err = ProxyError::Upstream {
            status: 599,
            text: String::new(),
        };
        assert_eq!(err.message(), "API request failed: ");
        assert_eq!(err.status().as_u16(), 599);
    }

    #[test]
    fn renders_json_error_body() {
        let resp = ProxyError::MissingToken.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        match resp.body() {
            Body::Text(t) => {
                let v: serde_json::Value = serde_json::from_str(t).unwrap();
                assert_eq!(v, json!({ "error": "API token is not configured" }));
            }
            _ => panic!("expected a text body"),
        }
    }
}
