//! HTTP error responses.
//!
//! Every failure surfaces as a JSON `{message, type}` body. The mapping
//! follows the service's error taxonomy: configuration errors are 5xx,
//! missing or rejected input is 400, failed authentication is 401.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Serialize;
use tracing::error;

/// Body shape of every error response.
#[derive(Serialize, Debug)]
struct ErrorBody {
    message: String,
    #[serde(rename = "type")]
    error_type: String,
}

/// An HTTP-mappable service error.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    error_type: &'static str,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, error_type: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            error_type,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "BadRequest", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "NotFound", message)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn error_type(&self) -> &'static str {
        self.error_type
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        error!("request failed: {}", self);
        let body = ErrorBody {
            message: self.message,
            error_type: self.error_type.to_string(),
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<formgate_captcha::registry::Error> for ApiError {
    fn from(error: formgate_captcha::registry::Error) -> Self {
        use formgate_captcha::registry::Error::*;
        match &error {
            SettingsNotRegistered { .. } => Self::new(
                StatusCode::SERVICE_UNAVAILABLE,
                "SettingsNotRegistered",
                error.to_string(),
            ),
            _ => Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                "PrivateKeyNotConfigured",
                error.to_string(),
            ),
        }
    }
}

impl From<formgate_core::captcha::Error> for ApiError {
    fn from(error: formgate_core::captcha::Error) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "CaptchaError",
            error.to_string(),
        )
    }
}

impl From<formgate_core::store::Error> for ApiError {
    fn from(error: formgate_core::store::Error) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "StoreError",
            error.to_string(),
        )
    }
}

impl From<formgate_core::mailer::Error> for ApiError {
    fn from(error: formgate_core::mailer::Error) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "MailerError",
            error.to_string(),
        )
    }
}

impl From<formgate_mailer::message::Error> for ApiError {
    fn from(error: formgate_mailer::message::Error) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "MailerError",
            error.to_string(),
        )
    }
}

impl From<crate::auth::Error> for ApiError {
    fn from(error: crate::auth::Error) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized", error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::bad_request("No captcha token provided.");
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.error_type(), "BadRequest");
        assert_eq!(error.message(), "No captcha token provided.");
    }

    #[test]
    fn test_settings_error_maps_to_503() {
        let error: ApiError = formgate_captcha::registry::Error::SettingsNotRegistered {
            provider: "recaptcha".to_string(),
            field: "public_key",
        }
        .into();

        assert_eq!(error.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(error.error_type(), "SettingsNotRegistered");
        assert!(error.message().contains("public_key"));
    }

    #[test]
    fn test_private_key_error_maps_to_500() {
        let error: ApiError = formgate_captcha::registry::Error::PrivateKeyNotConfigured {
            provider: "recaptcha".to_string(),
        }
        .into();

        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(error.message().contains("No recaptcha private key configured"));
    }

    #[test]
    fn test_auth_error_maps_to_401() {
        let error: ApiError = crate::auth::Error::NoCredentials.into();
        assert_eq!(error.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_into_response_carries_status() {
        let response = ApiError::not_found("Document not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_body_field_names() {
        let body = ErrorBody {
            message: "m".to_string(),
            error_type: "T".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "m");
        assert_eq!(json["type"], "T");
    }
}
