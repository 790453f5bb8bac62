//! Shared fixtures for the HTTP tests.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
};
use folio_auth::{create_account, AuthConfig, AuthState};
use folio_core::auth::RegisterUser;
use folio_core::content::{ImageCompressor, User};
use folio_core::storage::Gateway;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::app::create_app;
use crate::captcha::DisabledCaptcha;
use crate::config::Config;
use crate::mailer::testing::RecordingMailer;
use crate::state::AppState;
use crate::storage::SqliteRepository;

pub const SECRET: &str = "test-secret";
pub const PASSWORD: &str = "Secretpass1";
/// A data URL whose image bytes are `hello`.
pub const PNG_DATA_URL: &str = "data:image/png;base64,aGVsbG8=";

/// Replaces every image with its first byte, so list payloads are recognizable.
pub struct FirstByte;

impl ImageCompressor for FirstByte {
    fn compress(&self, _image_format: &str, image: &[u8]) -> Option<Vec<u8>> {
        image.first().map(|b| vec![*b])
    }
}

pub struct TestApp {
    pub state: AppState,
    pub repository: Arc<SqliteRepository>,
    pub mailer: Arc<RecordingMailer>,
}

pub async fn test_app() -> TestApp {
    test_app_with(RecordingMailer::default(), 50).await
}

pub async fn test_app_with(mailer: RecordingMailer, email_daily_limit: u32) -> TestApp {
    let repository = Arc::new(SqliteRepository::new_in_memory().await.unwrap());
    let mut config = AuthConfig::new(SECRET);
    config.cookie_secure = false;
    let auth = AuthState::new(
        repository.clone(),
        repository.clone(),
        Arc::new(DisabledCaptcha),
        config,
    );
    let mailer = Arc::new(mailer);
    let state = AppState::new(
        repository.clone(),
        Arc::new(FirstByte),
        auth,
        mailer.clone(),
        email_daily_limit,
    );
    TestApp {
        state,
        repository,
        mailer,
    }
}

/// Sends one request through the full router and returns the status and JSON body.
pub async fn send(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> (u16, Value) {
    let (status, _, body) = send_raw(app, method, uri, body, cookie).await;
    (status, body)
}

/// Like [`send`], also returning the `Set-Cookie` header.
pub async fn send_raw(
    app: &TestApp,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> (u16, Option<String>, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = create_app(app.state.clone(), &Config::default())
        .oneshot(request)
        .await
        .unwrap();

    let status = response.status().as_u16();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, set_cookie, json)
}

/// Registers `username` with the given flags and returns a logged-in `token=...` cookie.
pub async fn cookie_for(app: &TestApp, username: &str, is_admin: bool, is_verified: bool) -> String {
    let user = create_account(
        &app.state.auth,
        RegisterUser {
            email: format!("{username}@example.com"),
            username: username.to_string(),
            password: PASSWORD.to_string(),
        },
        false,
    )
    .await
    .unwrap();
    let user = User {
        is_admin,
        is_verified,
        ..user
    };
    Gateway::<User>::update(app.repository.as_ref(), &user)
        .await
        .unwrap();

    login(app, username).await
}

/// Logs in `username` and returns the session cookie.
pub async fn login(app: &TestApp, username: &str) -> String {
    let (status, set_cookie, _) = send_raw(
        app,
        Method::POST,
        "/auth/login",
        Some(json!({"user": {"username": username, "password": PASSWORD}})),
        None,
    )
    .await;
    assert_eq!(status, 200);
    set_cookie
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string()
}

/// A verified admin's session cookie.
pub async fn admin_cookie(app: &TestApp) -> String {
    cookie_for(app, "owner", true, true).await
}
