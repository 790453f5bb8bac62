use async_trait::async_trait;

use super::{AuthError, Session, SessionId};
use crate::storage;

/// Session storage abstraction.
#[async_trait]
pub trait SessionGateway: Send + Sync {
    /// Store a new session.
    async fn create_session(&self, session: &Session) -> storage::Result<()>;

    /// Retrieve session by ID.
    async fn get_session(&self, id: &SessionId) -> storage::Result<Option<Session>>;

    /// Delete a specific session.
    async fn delete_session(&self, id: &SessionId) -> storage::Result<()>;

    /// Delete all sessions for a user.
    async fn delete_user_sessions(&self, user_id: i64) -> storage::Result<()>;
}

/// Human-verification check guarding the public forms.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// `Err(AuthError::InvalidCaptcha)` when the response token is missing or rejected.
    async fn verify(&self, response: Option<&str>) -> Result<(), AuthError>;
}
