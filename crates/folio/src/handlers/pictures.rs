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
use folio_core::content::{distinct_years, Category, Picture, PictureRequest};
use folio_core::envelope::{messages, StatusCode};
use folio_core::storage::Gateway;

use super::{invalid, json_body, key_param, Failure, TitleQuery};
use crate::state::AppState;

/// One picture by title, or every picture with downsized images (GET /picture).
pub async fn get_pictures(
    State(state): State<AppState>,
    query: Result<Query<TitleQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return <Reply>::new(StatusCode::BadRequest, messages::GET_PICTURE_WRONG_PARAMETER)
            .into_response();
    };

    match query.title {
        Some(title) => get_picture(&state, &title).await.into_response(),
        None => match state.pictures.get_all_compressed().await {
            Ok(pictures) => Reply::new(StatusCode::Ok, messages::GET_ALL_PICTURES_SUCCESS)
                .with_payload(pictures)
                .into_response(),
            Err(e) => Failure::new(messages::GET_ALL_PICTURES_FAIL)
                .reply(e)
                .into_response(),
        },
    }
}

async fn get_picture(state: &AppState, title: &str) -> Result<Reply<Picture>, Reply> {
    let title = key_param(title, messages::GET_PICTURE_WRONG_PARAMETER)?;

    match state.pictures.get_by_key(&title).await {
        Ok(Some(picture)) => Ok(Reply::new(
            StatusCode::Ok,
            messages::GET_PICTURE_BY_TITLE_SUCCESS,
        )
        .with_payload(picture)),
        Ok(None) => Err(Reply::new(
            StatusCode::NotFound,
            messages::GET_PICTURE_BY_TITLE_NOT_FOUND,
        )),
        Err(e) => Err(Failure::new(messages::GET_PICTURE_BY_TITLE_FAIL).reply(e)),
    }
}

/// Years in which pictures were added, newest first (GET /picture/years).
pub async fn get_picture_years(State(state): State<AppState>) -> Result<Reply<Vec<i32>>, Reply> {
    let pictures = state
        .pictures
        .get_all()
        .await
        .map_err(|e| Failure::new(messages::GET_PICTURE_YEARS_FAIL).reply(e))?;

    Ok(Reply::new(StatusCode::Ok, messages::GET_PICTURE_YEARS_SUCCESS)
        .with_payload(distinct_years(&pictures)))
}

/// Validates a picture body and resolves its category by name.
async fn picture_from_request(
    state: &AppState,
    payload: Result<Json<PictureRequest>, JsonRejection>,
    internal: &'static str,
) -> Result<Picture, Reply> {
    let request = json_body(payload, messages::INVALID_PICTURE_DATA)?;
    let name = request
        .category_name()
        .map_err(|e| invalid(e, messages::INVALID_PICTURE_DATA))?
        .to_string();

    let category: Category = state
        .categories
        .get_by_key(&name)
        .await
        .map_err(|e| Failure::new(internal).reply(e))?
        .ok_or_else(|| Reply::new(StatusCode::NotFound, messages::PICTURE_CATEGORY_NOT_FOUND))?;

    request
        .into_picture(&category, Utc::now())
        .map_err(|e| invalid(e, messages::INVALID_PICTURE_DATA))
}

/// Create a picture in an existing category (POST /picture).
pub async fn create_picture(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<PictureRequest>, JsonRejection>,
) -> Result<Reply, Reply> {
    let picture = picture_from_request(&state, payload, messages::POST_PICTURE_FAIL).await?;

    match state.pictures.save(&picture).await {
        Ok(true) => {
            tracing::info!(
                admin = %admin.username,
                title = %picture.title,
                category = %picture.category,
                "picture created"
            );
            Ok(Reply::new(StatusCode::Created, messages::POST_PICTURE_SUCCESS))
        }
        Ok(false) => Err(Reply::new(
            StatusCode::InternalServerError,
            messages::POST_PICTURE_FAIL,
        )),
        Err(e) => Err(Failure::new(messages::POST_PICTURE_FAIL)
            .duplicate(messages::POST_PICTURE_FAIL_DUPLICATE)
            .invalid(messages::PICTURE_CATEGORY_NOT_FOUND)
            .reply(e)),
    }
}

/// Replace a picture's description, category and image, addressed by title (PUT /picture).
pub async fn update_picture(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<PictureRequest>, JsonRejection>,
) -> Result<Reply, Reply> {
    let picture = picture_from_request(&state, payload, messages::UPDATE_PICTURE_FAIL).await?;

    match state.pictures.update(&picture).await {
        Ok(true) => {
            tracing::info!(admin = %admin.username, title = %picture.title, "picture updated");
            Ok(Reply::new(StatusCode::Ok, messages::UPDATE_PICTURE_SUCCESS))
        }
        Ok(false) => Err(Reply::new(
            StatusCode::NotFound,
            messages::UPDATE_PICTURE_NOT_FOUND,
        )),
        Err(e) => Err(Failure::new(messages::UPDATE_PICTURE_FAIL)
            .invalid(messages::PICTURE_CATEGORY_NOT_FOUND)
            .reply(e)),
    }
}

/// Delete a picture by title, dropping it from the favourites (DELETE /picture?title=).
pub async fn delete_picture(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    query: Result<Query<TitleQuery>, QueryRejection>,
) -> Result<Reply, Reply> {
    let title = query.ok().and_then(|Query(q)| q.title).unwrap_or_default();
    let title = key_param(&title, messages::GET_PICTURE_WRONG_PARAMETER)?;

    match state.pictures.delete_by_key(&title).await {
        Ok(true) => {
            tracing::info!(admin = %admin.username, title = %title, "picture deleted");
            Ok(Reply::new(StatusCode::Ok, messages::DELETE_PICTURE_SUCCESS))
        }
        Ok(false) => Err(Reply::new(
            StatusCode::NotFound,
            messages::DELETE_PICTURE_FAIL_NOT_FOUND,
        )),
        Err(e) => Err(Failure::new(messages::DELETE_PICTURE_FAIL).reply(e)),
    }
}
