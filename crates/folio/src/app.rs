use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method, StatusCode},
    routing::{get, post},
    Router,
};
use folio_auth::auth_routes;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    config::Config,
    handlers::{
        blogs::{create_blog, delete_blog, get_blogs, update_blog},
        categories::{create_category, delete_category, get_categories, update_category},
        email::send_email,
        favourites::{get_favourites, replace_favourites},
        health::ping,
        pictures::{
            create_picture, delete_picture, get_picture_years, get_pictures, update_picture,
        },
    },
    state::AppState,
};

/// CORS for the frontend.
///
/// Session cookies only travel cross-origin to an explicitly named origin,
/// so credentials are allowed only when `CORS_ORIGIN` is set.
fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    let origin = config
        .cors_origin
        .as_deref()
        .and_then(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        });

    match origin {
        Some(origin) => cors.allow_origin(origin).allow_credentials(true),
        None => cors.allow_origin(Any),
    }
}

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, config: &Config) -> Router {
    let content_routes = Router::new()
        .route(
            "/blog",
            get(get_blogs)
                .post(create_blog)
                .put(update_blog)
                .delete(delete_blog),
        )
        .route(
            "/category",
            get(get_categories)
                .post(create_category)
                .put(update_category)
                .delete(delete_category),
        )
        .route(
            "/picture",
            get(get_pictures)
                .post(create_picture)
                .put(update_picture)
                .delete(delete_picture),
        )
        .route("/picture/years", get(get_picture_years))
        .route("/home/pictures", get(get_favourites).put(replace_favourites))
        .route("/send_email", post(send_email))
        .route("/ping", get(ping).post(ping))
        .with_state(state.clone());

    Router::new()
        .merge(auth_routes().with_state(state.auth))
        .merge(content_routes)
        .layer(DefaultBodyLimit::max(config.max_body_bytes))
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout(),
        ))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::testing::{cookie_for, login, send, send_raw, test_app, PNG_DATA_URL};

    fn blog(title: &str) -> serde_json::Value {
        json!({"title": title, "content": "words", "image": PNG_DATA_URL})
    }

    #[tokio::test]
    async fn test_ping() {
        let app = test_app().await;

        for method in [Method::GET, Method::POST] {
            let (status, body) = send(&app, method, "/ping", None, None).await;
            assert_eq!(status, 200);
            assert_eq!(
                body,
                json!({"status": "success", "message": "Ping", "status_code": 200})
            );
        }
    }

    #[tokio::test]
    async fn test_register_login_post_and_list() {
        let app = test_app().await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/auth/register",
            Some(json!({
                "user": {"email": "ana@example.com", "username": "ana", "password": "Secretpass1"}
            })),
            None,
        )
        .await;
        assert_eq!(status, 201);
        assert_eq!(body["status_code"], 201);

        let cookie = login(&app, "ana").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/blog",
            Some(blog("First post")),
            Some(&cookie),
        )
        .await;
        assert_eq!(status, 201);
        assert_eq!(body["status_code"], 201);

        let (status, body) = send(&app, Method::GET, "/blog", None, None).await;
        assert_eq!(status, 200);
        let blogs = body["payload"].as_array().unwrap();
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0]["title"], "First post");
    }

    #[tokio::test]
    async fn test_gate_rejects_missing_and_garbled_tokens() {
        let app = test_app().await;

        let (status, set_cookie, body) =
            send_raw(&app, Method::POST, "/blog", Some(blog("Hello")), None).await;
        assert_eq!(status, 401);
        assert_eq!(body["message"], "Error, authentication token was not provided.");
        assert!(set_cookie.unwrap().contains("Max-Age=0"));

        let (status, body) = send(
            &app,
            Method::POST,
            "/blog",
            Some(blog("Hello")),
            Some("token=not-a-token"),
        )
        .await;
        assert_eq!(status, 498);
        assert_eq!(body["message"], "Error, authentication token is not valid.");
    }

    #[tokio::test]
    async fn test_gate_rejects_logged_out_session() {
        let app = test_app().await;
        let cookie = cookie_for(&app, "owner", true, true).await;

        let (status, _) = send(&app, Method::POST, "/auth/logout", None, Some(&cookie)).await;
        assert_eq!(status, 200);

        let (status, set_cookie, body) = send_raw(
            &app,
            Method::POST,
            "/blog",
            Some(blog("Hello")),
            Some(&cookie),
        )
        .await;
        assert_eq!(status, 401);
        assert_eq!(body["status"], "fail");
        assert!(set_cookie.unwrap().contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_gate_requires_verified_admin() {
        let app = test_app().await;

        let unverified = cookie_for(&app, "guest", true, false).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/blog",
            Some(blog("Hello")),
            Some(&unverified),
        )
        .await;
        assert_eq!(status, 403);
        assert_eq!(
            body["message"],
            "Error, this user is not active. Please verify your account via the email you provided."
        );

        let visitor = cookie_for(&app, "visitor", false, true).await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/blog",
            Some(blog("Hello")),
            Some(&visitor),
        )
        .await;
        assert_eq!(status, 403);
        assert_eq!(body["message"], "Error, this user is not authorized.");

        let (_, body) = send(&app, Method::GET, "/blog", None, None).await;
        assert_eq!(body["payload"], json!([]));
    }

    #[tokio::test]
    async fn test_duplicate_keeps_existing_entry() {
        let app = test_app().await;
        let cookie = cookie_for(&app, "owner", true, true).await;
        send(
            &app,
            Method::POST,
            "/blog",
            Some(blog("Hello")),
            Some(&cookie),
        )
        .await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/blog",
            Some(json!({"title": "Hello", "content": "other", "image": PNG_DATA_URL})),
            Some(&cookie),
        )
        .await;
        assert_eq!(status, 400);
        assert_eq!(body["message"], "Failed to insert blog due to duplicate title.");

        let (_, body) = send(&app, Method::GET, "/blog", None, None).await;
        let blogs = body["payload"].as_array().unwrap();
        assert_eq!(blogs.len(), 1);
        assert_eq!(blogs[0]["content"], "words");
    }

    #[tokio::test]
    async fn test_list_reflects_writes_after_being_cached() {
        let app = test_app().await;
        let cookie = cookie_for(&app, "owner", true, true).await;

        send(
            &app,
            Method::POST,
            "/blog",
            Some(blog("One")),
            Some(&cookie),
        )
        .await;
        let (_, body) = send(&app, Method::GET, "/blog", None, None).await;
        assert_eq!(body["payload"].as_array().unwrap().len(), 1);

        send(
            &app,
            Method::POST,
            "/blog",
            Some(blog("Two")),
            Some(&cookie),
        )
        .await;
        let (_, body) = send(&app, Method::GET, "/blog", None, None).await;
        assert_eq!(body["payload"].as_array().unwrap().len(), 2);

        send(&app, Method::DELETE, "/blog?title=One", None, Some(&cookie)).await;
        let (_, body) = send(&app, Method::GET, "/blog", None, None).await;
        assert_eq!(body["payload"][0]["title"], "Two");
    }

    fn large_blog(title: &str) -> serde_json::Value {
        // 3 MiB of base64, past axum's built-in 2 MiB body limit.
        let image = format!("data:image/png;base64,{}", "A".repeat(3 << 20));
        json!({"title": title, "content": "words", "image": image})
    }

    #[tokio::test]
    async fn test_large_image_is_accepted() {
        let app = test_app().await;
        let cookie = cookie_for(&app, "owner", true, true).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/blog",
            Some(large_blog("Panorama")),
            Some(&cookie),
        )
        .await;
        assert_eq!(status, 201);
        assert_eq!(body["status_code"], 201);

        let (_, body) = send(&app, Method::GET, "/blog", None, None).await;
        assert_eq!(body["payload"][0]["title"], "Panorama");
    }

    #[tokio::test]
    async fn test_body_over_configured_limit_is_rejected() {
        let app = test_app().await;
        let cookie = cookie_for(&app, "owner", true, true).await;
        let config = Config {
            max_body_bytes: 1024 * 1024,
            ..Config::default()
        };
        let request = Request::builder()
            .method(Method::POST)
            .uri("/blog")
            .header(header::COOKIE, cookie)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(large_blog("Panorama").to_string()))
            .unwrap();

        let response = create_app(app.state.clone(), &config)
            .oneshot(request)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let (_, body) = send(&app, Method::GET, "/blog", None, None).await;
        assert_eq!(body["payload"], json!([]));
    }

    #[tokio::test]
    async fn test_named_origin_gets_credentialed_cors() {
        let app = test_app().await;
        let config = Config {
            cors_origin: Some("https://folio.example".to_string()),
            ..Config::default()
        };
        let preflight = Request::builder()
            .method(Method::OPTIONS)
            .uri("/blog")
            .header(header::ORIGIN, "https://folio.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .body(Body::empty())
            .unwrap();

        let response = create_app(app.state.clone(), &config)
            .oneshot(preflight)
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://folio.example"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
    }

    #[tokio::test]
    async fn test_any_origin_without_credentials() {
        let app = test_app().await;
        let preflight = Request::builder()
            .method(Method::OPTIONS)
            .uri("/blog")
            .header(header::ORIGIN, "https://elsewhere.example")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
            .body(Body::empty())
            .unwrap();

        let response = create_app(app.state.clone(), &Config::default())
            .oneshot(preflight)
            .await
            .unwrap();

        let headers = response.headers();
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .is_none());
    }
}
