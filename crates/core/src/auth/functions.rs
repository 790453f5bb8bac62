use chrono::{DateTime, Duration, Utc};
use rand::{distr::Alphanumeric, Rng};

use super::{AuthError, Session, SessionId};
use crate::content::User;
use crate::envelope::messages;

/// Generate a cryptographically random session ID.
pub fn generate_session_id() -> SessionId {
    let id: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect();
    SessionId::new(id)
}

/// Check if a session has expired.
pub fn is_session_expired(session: &Session, now: DateTime<Utc>) -> bool {
    session.expires_at <= now
}

/// Calculate session expiry from creation time and TTL.
pub fn calculate_expiry(created_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    created_at + ttl
}

/// Builds a fresh session for `user_id`.
pub fn new_session(user_id: i64, now: DateTime<Utc>, ttl: Duration) -> Session {
    Session {
        id: generate_session_id(),
        user_id,
        created_at: now,
        expires_at: calculate_expiry(now, ttl),
    }
}

/// The last stage of the gate: the user must be verified, then admin.
pub fn authorize(user: &User) -> Result<(), AuthError> {
    if !user.is_verified {
        return Err(AuthError::NotActive);
    }
    if !user.is_admin {
        return Err(AuthError::NotAuthorized);
    }
    Ok(())
}

pub fn login_message(user: &User) -> &'static str {
    if authorize(user).is_ok() {
        messages::SUCCESSFULLY_LOGGED_IN_AS_ADMIN
    } else {
        messages::SUCCESSFULLY_LOGGED_IN
    }
}

/// Whether a new registration should become the site owner.
pub fn promotes_to_owner(existing_users: u64, promote_first_user: bool) -> bool {
    promote_first_user && existing_users == 0
}
