//! Axum extractors implementing the authorization gate.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, HeaderMap},
};
use axum_extra::extract::CookieJar;
use chrono::Utc;
use folio_core::auth::{authorize, is_session_expired, AuthError, Session, SessionId};
use folio_core::content::User;

use crate::error::GateRejection;
use crate::AuthState;

/// A request carrying a valid token for a live session.
pub struct Authenticated {
    pub user: User,
    pub session: Session,
}

/// A request from a verified admin. Guards every content write.
pub struct AdminUser(pub User);

/// Runs the token stage of the gate.
///
/// On token failures that name a session, that session is deleted so the
/// stale identity cannot be retried.
pub async fn authenticate(
    state: &AuthState,
    headers: &HeaderMap,
) -> Result<Authenticated, AuthError> {
    let jar = CookieJar::from_headers(headers);
    let token = jar
        .get(&state.config.cookie_name)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or(AuthError::MissingToken)?;

    let claims = state.tokens.decode(&token)?;
    let session_id = claims.session_id();

    let result = if claims.is_expired(Utc::now()) {
        Err(AuthError::ExpiredToken)
    } else {
        check_session(state, claims.user_id(), &session_id).await
    };
    if let Err(error) = &result {
        if error.forces_logout() {
            forget_session(state, &session_id).await;
        }
    }
    result
}

async fn check_session(
    state: &AuthState,
    user_id: Option<i64>,
    session_id: &SessionId,
) -> Result<Authenticated, AuthError> {
    let user_id =
        user_id.ok_or_else(|| AuthError::InvalidToken("subject is not a user id".to_string()))?;

    let user = state
        .users
        .get_by_id(user_id)
        .await?
        .ok_or_else(|| AuthError::InvalidToken("subject no longer exists".to_string()))?;

    let session = state
        .sessions
        .get_session(session_id)
        .await?
        .ok_or(AuthError::NotAuthenticated)?;

    if session.user_id != user.id {
        return Err(AuthError::InvalidToken(
            "session belongs to another user".to_string(),
        ));
    }
    if is_session_expired(&session, Utc::now()) {
        return Err(AuthError::ExpiredToken);
    }

    Ok(Authenticated { user, session })
}

async fn forget_session(state: &AuthState, session_id: &SessionId) {
    if let Err(e) = state.sessions.delete_session(session_id).await {
        tracing::warn!(session_id = %session_id, error = %e, "failed to delete rejected session");
    }
}

impl<S> FromRequestParts<S> for Authenticated
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        authenticate(&auth_state, &parts.headers)
            .await
            .map_err(|e| GateRejection::new(e, &auth_state.config))
    }
}

impl<S> FromRequestParts<S> for AdminUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = GateRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let Authenticated { user, .. } = authenticate(&auth_state, &parts.headers)
            .await
            .map_err(|e| GateRejection::new(e, &auth_state.config))?;

        authorize(&user).map_err(|e| GateRejection::new(e, &auth_state.config))?;
        Ok(AdminUser(user))
    }
}
