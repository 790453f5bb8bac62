//! Pure functions mapping [`AuthError`] to envelope fields.

use super::AuthError;
use crate::envelope::{messages, Envelope, StatusCode};

pub fn auth_error_to_status_code(error: &AuthError) -> StatusCode {
    match error {
        AuthError::MissingToken | AuthError::NotAuthenticated => StatusCode::Unauthenticated,
        AuthError::InvalidToken(_) | AuthError::ExpiredToken => StatusCode::InvalidToken,
        AuthError::NotActive | AuthError::NotAuthorized => StatusCode::Forbidden,
        AuthError::InvalidCredentials
        | AuthError::InvalidRegistration(_)
        | AuthError::UserAlreadyExists
        | AuthError::InvalidCaptcha => StatusCode::BadRequest,
        AuthError::Captcha(_) | AuthError::Crypto(_) | AuthError::Storage(_) => {
            StatusCode::InternalServerError
        }
    }
}

/// Client-facing message. Internal details never appear here.
pub fn auth_error_message(error: &AuthError) -> &'static str {
    match error {
        AuthError::MissingToken => messages::MISSING_TOKEN,
        AuthError::InvalidToken(_) => messages::INVALID_TOKEN,
        AuthError::ExpiredToken => messages::EXPIRED_TOKEN,
        AuthError::NotAuthenticated => messages::ERROR_USER_IS_NOT_AUTHENTICATED,
        AuthError::NotActive => messages::ERROR_USER_IS_NOT_ACTIVE,
        AuthError::NotAuthorized => messages::ERROR_USER_IS_NOT_AUTHORIZED,
        AuthError::InvalidCredentials => messages::INCORRECT_CREDENTIALS_FOR_LOGIN,
        AuthError::InvalidRegistration(_) => messages::INCORRECT_CREDENTIALS_FOR_REGISTER,
        AuthError::UserAlreadyExists => messages::ERROR_USER_ALREADY_EXISTS,
        AuthError::InvalidCaptcha => messages::INVALID_RECAPTCHA_ERROR,
        AuthError::Captcha(_) | AuthError::Crypto(_) | AuthError::Storage(_) => {
            messages::GENERIC_SERVER_ERROR
        }
    }
}

pub fn auth_error_envelope(error: &AuthError) -> Envelope {
    Envelope::new(auth_error_to_status_code(error), auth_error_message(error))
}
