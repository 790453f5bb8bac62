pub mod blogs;
pub mod categories;
pub mod email;
pub mod error;
pub mod favourites;
pub mod health;
pub mod pictures;

use axum::{extract::rejection::JsonRejection, Json};
use folio_auth::Reply;
use folio_core::content::ContentError;
use folio_core::envelope::StatusCode;
use serde::Deserialize;

pub use error::Failure;

/// `?title=` selector of the blog and picture routes.
#[derive(Debug, Default, Deserialize)]
pub struct TitleQuery {
    pub title: Option<String>,
}

/// `?name=` selector of the category routes.
#[derive(Debug, Default, Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}

/// Trims a key parameter. A blank key is rejected with `message`.
fn key_param(key: &str, message: &'static str) -> Result<String, Reply> {
    let key = key.trim();
    if key.is_empty() {
        return Err(Reply::new(StatusCode::BadRequest, message));
    }
    Ok(key.to_string())
}

/// Unwraps a JSON body, replying 400 with `message` when it does not parse.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>, message: &'static str) -> Result<T, Reply> {
    payload.map(|Json(body)| body).map_err(|e| {
        tracing::debug!(error = %e.body_text(), "rejected request body");
        Reply::new(StatusCode::BadRequest, message)
    })
}

/// Replies 400 with `message` for a body that parsed but failed validation.
fn invalid(error: ContentError, message: &'static str) -> Reply {
    tracing::debug!(error = %error, "invalid request data");
    Reply::new(StatusCode::BadRequest, message)
}
