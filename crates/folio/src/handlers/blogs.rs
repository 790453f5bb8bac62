use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use folio_auth::{AdminUser, Reply};
use folio_core::content::{Blog, BlogRequest};
use folio_core::envelope::{messages, StatusCode};
use folio_core::storage::Gateway;

use super::{invalid, json_body, key_param, Failure, TitleQuery};
use crate::state::AppState;

/// One blog by title, or every blog with downsized images (GET /blog).
pub async fn get_blogs(
    State(state): State<AppState>,
    query: Result<Query<TitleQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return <Reply>::new(StatusCode::BadRequest, messages::GET_BLOG_WRONG_PARAMETER)
            .into_response();
    };

    match query.title {
        Some(title) => get_blog(&state, &title).await.into_response(),
        None => list_blogs(&state).await.into_response(),
    }
}

async fn get_blog(state: &AppState, title: &str) -> Result<Reply<Blog>, Reply> {
    let title = key_param(title, messages::GET_BLOG_WRONG_PARAMETER)?;

    match state.blogs.get_by_key(&title).await {
        Ok(Some(blog)) => {
            Ok(Reply::new(StatusCode::Ok, messages::GET_BLOG_BY_TITLE_SUCCESS).with_payload(blog))
        }
        Ok(None) => Err(Reply::new(
            StatusCode::NotFound,
            messages::GET_BLOG_BY_TITLE_NOT_FOUND,
        )),
        Err(e) => Err(Failure::new(messages::GET_BLOG_BY_TITLE_FAIL).reply(e)),
    }
}

async fn list_blogs(state: &AppState) -> Response {
    match state.blogs.get_all_compressed().await {
        Ok(blogs) => Reply::new(StatusCode::Ok, messages::GET_ALL_BLOGS_SUCCESS)
            .with_payload(blogs)
            .into_response(),
        Err(e) => Failure::new(messages::GET_ALL_BLOGS_FAIL)
            .reply(e)
            .into_response(),
    }
}

/// Create a blog (POST /blog).
pub async fn create_blog(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<BlogRequest>, JsonRejection>,
) -> Result<Reply, Reply> {
    let blog = json_body(payload, messages::INVALID_BLOG_DATA)?
        .into_blog(Utc::now())
        .map_err(|e| invalid(e, messages::INVALID_BLOG_DATA))?;

    match state.blogs.save(&blog).await {
        Ok(true) => {
            tracing::info!(admin = %admin.username, title = %blog.title, "blog created");
            Ok(Reply::new(StatusCode::Created, messages::POST_BLOG_SUCCESS))
        }
        Ok(false) => Err(Reply::new(
            StatusCode::InternalServerError,
            messages::POST_BLOG_FAIL,
        )),
        Err(e) => Err(Failure::new(messages::POST_BLOG_FAIL)
            .duplicate(messages::POST_BLOG_FAIL_DUPLICATE)
            .reply(e)),
    }
}

/// Replace a blog's content and image, addressed by title (PUT /blog).
pub async fn update_blog(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<BlogRequest>, JsonRejection>,
) -> Result<Reply, Reply> {
    let blog = json_body(payload, messages::INVALID_BLOG_DATA)?
        .into_blog(Utc::now())
        .map_err(|e| invalid(e, messages::INVALID_BLOG_DATA))?;

    match state.blogs.update(&blog).await {
        Ok(true) => {
            tracing::info!(admin = %admin.username, title = %blog.title, "blog updated");
            Ok(Reply::new(StatusCode::Ok, messages::UPDATE_BLOG_SUCCESS))
        }
        Ok(false) => Err(Reply::new(
            StatusCode::NotFound,
            messages::UPDATE_BLOG_NOT_FOUND,
        )),
        Err(e) => Err(Failure::new(messages::UPDATE_BLOG_FAIL).reply(e)),
    }
}

/// Delete a blog by title (DELETE /blog?title=).
pub async fn delete_blog(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    query: Result<Query<TitleQuery>, QueryRejection>,
) -> Result<Reply, Reply> {
    let title = query
        .ok()
        .and_then(|Query(q)| q.title)
        .unwrap_or_default();
    let title = key_param(&title, messages::GET_BLOG_WRONG_PARAMETER)?;

    match state.blogs.delete_by_key(&title).await {
        Ok(true) => {
            tracing::info!(admin = %admin.username, title = %title, "blog deleted");
            Ok(Reply::new(StatusCode::Ok, messages::DELETE_BLOG_SUCCESS))
        }
        Ok(false) => Err(Reply::new(
            StatusCode::NotFound,
            messages::DELETE_BLOG_FAIL_NOT_FOUND,
        )),
        Err(e) => Err(Failure::new(messages::DELETE_BLOG_FAIL).reply(e)),
    }
}
