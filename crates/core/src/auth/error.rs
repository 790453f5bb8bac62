use thiserror::Error;

/// Failures of the authorization gate and of the account flows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("authentication token was not provided")]
    MissingToken,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("token expired")]
    ExpiredToken,

    #[error("user is not authenticated")]
    NotAuthenticated,

    #[error("user is not verified")]
    NotActive,

    #[error("user is not an admin")]
    NotAuthorized,

    #[error("wrong username or password")]
    InvalidCredentials,

    #[error("invalid registration: {0}")]
    InvalidRegistration(String),

    #[error("user already exists")]
    UserAlreadyExists,

    #[error("captcha rejected")]
    InvalidCaptcha,

    #[error("captcha verification failed: {0}")]
    Captcha(String),

    #[error("cryptographic failure: {0}")]
    Crypto(String),

    #[error("storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Whether a request failing with this error must also be logged out.
    ///
    /// Covers the token stage of the gate: a missing, undecodable or expired
    /// token, or a token whose user or session is gone.
    pub fn forces_logout(&self) -> bool {
        matches!(
            self,
            Self::MissingToken
                | Self::InvalidToken(_)
                | Self::ExpiredToken
                | Self::NotAuthenticated
        )
    }
}

impl From<crate::storage::RepositoryError> for AuthError {
    fn from(error: crate::storage::RepositoryError) -> Self {
        Self::Storage(error.to_string())
    }
}
