mod error;
mod functions;
mod http_mapping;
mod requests;
mod traits;
mod types;
mod validation;

pub use error::AuthError;
pub use functions::{
    authorize, calculate_expiry, generate_session_id, is_session_expired, login_message,
    new_session, promotes_to_owner,
};
pub use http_mapping::{auth_error_envelope, auth_error_message, auth_error_to_status_code};
pub use requests::{LoginRequest, LoginUser, RegisterRequest, RegisterUser, UpdateUserRequest};
pub use traits::{CaptchaVerifier, SessionGateway};
pub use types::{Claims, Session, SessionId};
pub use validation::{
    is_valid_email, validate_password, validate_registration, validate_username,
};
