use axum::{
    http::StatusCode as HttpStatus,
    response::{IntoResponse, Response},
    Json,
};
use folio_core::auth::{auth_error_envelope, AuthError};
use folio_core::envelope::{Envelope, StatusCode};
use serde::Serialize;

/// An [`Envelope`] as an HTTP response whose status matches `status_code`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply<T = serde_json::Value>(pub Envelope<T>);

impl<T> Reply<T> {
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self(Envelope::new(status_code, message))
    }

    pub fn with_payload(self, payload: T) -> Self {
        Self(self.0.with_payload(payload))
    }

    pub fn status_code(&self) -> StatusCode {
        self.0.status_code
    }
}

impl<T: Serialize> IntoResponse for Reply<T> {
    fn into_response(self) -> Response {
        let status = HttpStatus::from_u16(self.0.status_code.as_u16())
            .unwrap_or(HttpStatus::INTERNAL_SERVER_ERROR);
        (status, Json(self.0)).into_response()
    }
}

impl<T> From<AuthError> for Reply<T> {
    fn from(error: AuthError) -> Self {
        match &error {
            AuthError::Captcha(_) | AuthError::Crypto(_) | AuthError::Storage(_) => {
                tracing::error!(error = %error, "auth request failed");
            }
            _ => tracing::debug!(error = %error, "auth request rejected"),
        }
        Self(auth_error_envelope(&error).without_payload())
    }
}
