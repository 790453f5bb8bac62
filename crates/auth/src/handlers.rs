//! HTTP handlers for auth routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{post, put},
    Json, Router,
};
use axum_extra::extract::CookieJar;
use chrono::{Duration, Utc};
use folio_core::auth::{
    login_message, new_session, promotes_to_owner, validate_registration, AuthError, Claims,
    LoginRequest, RegisterRequest, RegisterUser, UpdateUserRequest,
};
use folio_core::content::User;
use folio_core::envelope::{messages, StatusCode};

use crate::cookies::{expired_cookie, session_cookie};
use crate::extractors::{AdminUser, Authenticated};
use crate::password::{hash_password, verify_password};
use crate::{AuthState, Reply};

/// Creates the auth router.
///
/// Routes:
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login` - Start a session and set the token cookie
/// - `POST /auth/logout` - End the current session
/// - `PUT /auth/users` - Change a user's admin and verified flags (admin only)
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/users", put(update_user))
}

/// Validates, hashes and stores a new account.
pub async fn create_account(
    state: &AuthState,
    user: RegisterUser,
    owner: bool,
) -> Result<User, AuthError> {
    let user = new_user(user, owner).await?;
    insert_user(state, user).await
}

async fn new_user(user: RegisterUser, owner: bool) -> Result<User, AuthError> {
    let user = validate_registration(user)?;
    let password_hash = hash_password(user.password).await?;
    let now = Utc::now();
    Ok(User {
        id: 0,
        email: user.email,
        username: user.username,
        password_hash,
        is_admin: owner,
        is_verified: owner,
        created_at: now,
        updated_at: now,
    })
}

async fn insert_user(state: &AuthState, user: User) -> Result<User, AuthError> {
    match state.users.save(&user).await {
        Ok(true) => Ok(user),
        Ok(false) => Err(AuthError::Storage("user was not inserted".to_string())),
        Err(e) if e.is_duplicate() => Err(AuthError::UserAlreadyExists),
        Err(e) => Err(e.into()),
    }
}

/// Creates the configured owner account unless that username already exists.
///
/// Returns whether an account was created.
pub async fn ensure_owner(state: &AuthState) -> Result<bool, AuthError> {
    let Some(owner) = state.config.owner.clone() else {
        return Ok(false);
    };
    if state.users.get_by_key(&owner.username).await?.is_some() {
        return Ok(false);
    }

    let user = RegisterUser {
        email: owner.email,
        username: owner.username,
        password: owner.password,
    };
    let user = create_account(state, user, true).await?;
    tracing::info!(username = %user.username, "owner account created");
    Ok(true)
}

async fn register(
    State(state): State<AuthState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Reply, Reply> {
    let Json(request) = payload.map_err(|e| AuthError::InvalidRegistration(e.body_text()))?;
    state.captcha.verify(request.recaptcha.as_deref()).await?;

    let mut user = new_user(request.user, false).await?;

    // Count and insert under one lock: at most one first registration.
    let _registering = state.registrations.lock().await;
    let existing = state.users.count().await.map_err(AuthError::from)?;
    let owner = promotes_to_owner(existing, state.config.promote_first_user);
    user.is_admin = owner;
    user.is_verified = owner;
    let user = insert_user(&state, user).await?;

    tracing::info!(username = %user.username, owner, "user registered");
    Ok(Reply::new(StatusCode::Created, messages::SUCCESSFULLY_REGISTERED))
}

async fn login(
    State(state): State<AuthState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Reply), Reply> {
    let Json(request) = payload.map_err(|_| AuthError::InvalidCredentials)?;
    state.captcha.verify(request.recaptcha.as_deref()).await?;

    let user = state
        .users
        .get_by_key(request.user.username.trim())
        .await
        .map_err(AuthError::from)?
        .ok_or(AuthError::InvalidCredentials)?;

    if !verify_password(request.user.password, user.password_hash.clone()).await? {
        return Err(AuthError::InvalidCredentials.into());
    }

    let session = new_session(
        user.id,
        Utc::now(),
        Duration::seconds(state.config.token_ttl_seconds()),
    );
    state
        .sessions
        .create_session(&session)
        .await
        .map_err(AuthError::from)?;
    let token = state.tokens.encode(&Claims::for_session(&session))?;

    tracing::info!(username = %user.username, "user logged in");
    let jar = jar.add(session_cookie(&state.config, token));
    Ok((jar, Reply::new(StatusCode::Ok, login_message(&user))))
}

async fn logout(
    State(state): State<AuthState>,
    Authenticated { user, session }: Authenticated,
    jar: CookieJar,
) -> Result<(CookieJar, Reply), Reply> {
    state
        .sessions
        .delete_session(&session.id)
        .await
        .map_err(AuthError::from)?;

    tracing::info!(username = %user.username, "user logged out");
    let jar = jar.add(expired_cookie(&state.config));
    Ok((jar, Reply::new(StatusCode::Ok, messages::SUCCESSFULLY_LOGGED_OUT)))
}

async fn update_user(
    State(state): State<AuthState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Reply, Reply> {
    let Json(request) = payload
        .map_err(|_| Reply::new(StatusCode::BadRequest, messages::INVALID_USER_UPDATE))?;

    let Some(mut user) = state
        .users
        .get_by_key(request.username.trim())
        .await
        .map_err(AuthError::from)?
    else {
        return Err(Reply::new(StatusCode::NotFound, messages::USER_NOT_FOUND));
    };

    user.is_admin = request.is_admin;
    user.is_verified = request.is_verified;
    user.updated_at = Utc::now();

    if !state.users.update(&user).await.map_err(AuthError::from)? {
        return Err(Reply::new(StatusCode::NotFound, messages::USER_NOT_FOUND));
    }

    tracing::info!(
        admin = %admin.username,
        username = %user.username,
        is_admin = user.is_admin,
        is_verified = user.is_verified,
        "user roles updated"
    );
    Ok(Reply::new(StatusCode::Ok, messages::USER_UPDATED))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Method, Request, Response},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::testing::{test_state, MemorySessions, MemoryUsers};

    const PASSWORD: &str = "Secretpass1";

    fn app(state: AuthState) -> Router {
        auth_routes().with_state(state)
    }

    fn fresh_state() -> AuthState {
        test_state(
            Arc::new(MemoryUsers::default()),
            Arc::new(MemorySessions::default()),
        )
    }

    fn json_request(method: Method, uri: &str, body: Value, cookie: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json(response: Response<Body>) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn token_cookie(response: &Response<Body>) -> String {
        let set_cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap();
        set_cookie.split(';').next().unwrap().to_string()
    }

    async fn register(state: &AuthState, username: &str) -> Response<Body> {
        let body = json!({
            "recaptcha": "ok",
            "user": {
                "email": format!("{username}@example.com"),
                "username": username,
                "password": PASSWORD,
            }
        });
        app(state.clone())
            .oneshot(json_request(Method::POST, "/auth/register", body, None))
            .await
            .unwrap()
    }

    async fn login(state: &AuthState, username: &str, password: &str) -> Response<Body> {
        let body = json!({"user": {"username": username, "password": password}});
        app(state.clone())
            .oneshot(json_request(Method::POST, "/auth/login", body, None))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn first_user_becomes_owner() {
        let state = fresh_state();

        let response = register(&state, "owner").await;
        assert_eq!(response.status().as_u16(), 201);
        assert_eq!(body_json(response).await["message"], messages::SUCCESSFULLY_REGISTERED);
        register(&state, "visitor").await;

        let owner = state.users.get_by_key("owner").await.unwrap().unwrap();
        let visitor = state.users.get_by_key("visitor").await.unwrap().unwrap();
        assert!(owner.is_admin && owner.is_verified);
        assert!(!visitor.is_admin && !visitor.is_verified);
        assert_ne!(owner.password_hash, PASSWORD);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_first_registrations_promote_one_owner() {
        let state = fresh_state();

        let (alice, bobby) = tokio::join!(
            tokio::spawn({
                let state = state.clone();
                async move { register(&state, "alice").await.status().as_u16() }
            }),
            tokio::spawn({
                let state = state.clone();
                async move { register(&state, "bobby").await.status().as_u16() }
            }),
        );
        assert_eq!((alice.unwrap(), bobby.unwrap()), (201, 201));

        let mut owners = 0;
        for username in ["alice", "bobby"] {
            let user = state.users.get_by_key(username).await.unwrap().unwrap();
            assert_eq!(user.is_admin, user.is_verified);
            owners += usize::from(user.is_admin);
        }
        assert_eq!(owners, 1);
    }

    #[tokio::test]
    async fn duplicate_registration_is_rejected() {
        let state = fresh_state();
        register(&state, "owner").await;

        let response = register(&state, "owner").await;

        assert_eq!(response.status().as_u16(), 400);
        assert_eq!(body_json(response).await["message"], messages::ERROR_USER_ALREADY_EXISTS);
    }

    #[tokio::test]
    async fn weak_password_is_rejected() {
        let state = fresh_state();
        let body = json!({
            "user": {"email": "a@example.com", "username": "ana", "password": "weak"}
        });

        let response = app(state)
            .oneshot(json_request(Method::POST, "/auth/register", body, None))
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        assert_eq!(
            body_json(response).await["message"],
            messages::INCORRECT_CREDENTIALS_FOR_REGISTER
        );
    }

    #[tokio::test]
    async fn rejected_captcha_blocks_registration() {
        let state = fresh_state();
        let body = json!({
            "recaptcha": "bad",
            "user": {"email": "a@example.com", "username": "ana", "password": PASSWORD}
        });

        let response = app(state.clone())
            .oneshot(json_request(Method::POST, "/auth/register", body, None))
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400);
        assert_eq!(body_json(response).await["message"], messages::INVALID_RECAPTCHA_ERROR);
        assert_eq!(state.users.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn login_sets_http_only_token_cookie() {
        let state = fresh_state();
        register(&state, "owner").await;

        let response = login(&state, "owner", PASSWORD).await;

        assert_eq!(response.status().as_u16(), 200);
        let set_cookie = response.headers().get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(set_cookie.starts_with("token="));
        assert!(set_cookie.contains("HttpOnly"));
        assert_eq!(
            body_json(response).await["message"],
            messages::SUCCESSFULLY_LOGGED_IN_AS_ADMIN
        );
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let state = fresh_state();
        register(&state, "owner").await;

        let response = login(&state, "owner", "Wrongpass1").await;

        assert_eq!(response.status().as_u16(), 400);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn logout_ends_the_session() {
        let state = fresh_state();
        register(&state, "owner").await;
        let cookie = token_cookie(&login(&state, "owner", PASSWORD).await);

        let response = app(state.clone())
            .oneshot(json_request(Method::POST, "/auth/logout", json!({}), Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), 200);

        let again = app(state)
            .oneshot(json_request(Method::POST, "/auth/logout", json!({}), Some(&cookie)))
            .await
            .unwrap();
        assert_eq!(again.status().as_u16(), 401);
        assert!(again.headers().get(header::SET_COOKIE).is_some());
        assert_eq!(
            body_json(again).await["message"],
            messages::ERROR_USER_IS_NOT_AUTHENTICATED
        );
    }

    #[tokio::test]
    async fn logout_without_cookie_is_missing_token() {
        let response = app(fresh_state())
            .oneshot(json_request(Method::POST, "/auth/logout", json!({}), None))
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 401);
        assert!(response.headers().get(header::SET_COOKIE).is_some());
        assert_eq!(body_json(response).await["message"], messages::MISSING_TOKEN);
    }

    #[tokio::test]
    async fn admin_can_verify_another_user() {
        let state = fresh_state();
        register(&state, "owner").await;
        register(&state, "editor").await;
        let cookie = token_cookie(&login(&state, "owner", PASSWORD).await);

        let body = json!({"username": "editor", "is_admin": true, "is_verified": true});
        let response = app(state.clone())
            .oneshot(json_request(Method::PUT, "/auth/users", body, Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 200);
        let editor = state.users.get_by_key("editor").await.unwrap().unwrap();
        assert!(editor.is_admin && editor.is_verified);
    }

    #[tokio::test]
    async fn unverified_user_cannot_change_roles() {
        let state = fresh_state();
        register(&state, "owner").await;
        register(&state, "visitor").await;
        let cookie = token_cookie(&login(&state, "visitor", PASSWORD).await);

        let body = json!({"username": "visitor", "is_admin": true, "is_verified": true});
        let response = app(state)
            .oneshot(json_request(Method::PUT, "/auth/users", body, Some(&cookie)))
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 403);
        assert_eq!(body_json(response).await["message"], messages::ERROR_USER_IS_NOT_ACTIVE);
    }

    #[tokio::test]
    async fn owner_is_created_once() {
        let mut config = (*fresh_state().config).clone();
        config.owner = Some(crate::OwnerConfig {
            username: "owner".to_string(),
            email: "owner@example.com".to_string(),
            password: PASSWORD.to_string(),
        });
        let state = AuthState::new(
            Arc::new(MemoryUsers::default()),
            Arc::new(MemorySessions::default()),
            Arc::new(crate::testing::FakeCaptcha),
            config,
        );

        assert!(ensure_owner(&state).await.unwrap());
        assert!(!ensure_owner(&state).await.unwrap());
        let owner = state.users.get_by_key("owner").await.unwrap().unwrap();
        assert!(owner.is_admin && owner.is_verified);
    }
}
