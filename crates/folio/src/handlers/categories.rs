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
use folio_core::content::{Category, CategoryRequest};
use folio_core::envelope::{messages, StatusCode};
use folio_core::storage::Gateway;

use super::{invalid, json_body, key_param, Failure, NameQuery};
use crate::state::AppState;

/// One category by name, or every category by descending weight (GET /category).
pub async fn get_categories(
    State(state): State<AppState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Response {
    let Ok(Query(query)) = query else {
        return <Reply>::new(StatusCode::BadRequest, messages::GET_CATEGORY_WRONG_PARAMETER)
            .into_response();
    };

    match query.name {
        Some(name) => get_category(&state, &name).await.into_response(),
        None => match state.categories.get_all().await {
            Ok(categories) => Reply::new(StatusCode::Ok, messages::GET_ALL_CATEGORIES_SUCCESS)
                .with_payload(categories)
                .into_response(),
            Err(e) => Failure::new(messages::GET_ALL_CATEGORIES_FAIL)
                .reply(e)
                .into_response(),
        },
    }
}

async fn get_category(state: &AppState, name: &str) -> Result<Reply<Category>, Reply> {
    let name = key_param(name, messages::GET_CATEGORY_WRONG_PARAMETER)?;

    match state.categories.get_by_key(&name).await {
        Ok(Some(category)) => Ok(Reply::new(
            StatusCode::Ok,
            messages::GET_CATEGORY_BY_NAME_SUCCESS,
        )
        .with_payload(category)),
        Ok(None) => Err(Reply::new(
            StatusCode::NotFound,
            messages::GET_CATEGORY_BY_NAME_NOT_FOUND,
        )),
        Err(e) => Err(Failure::new(messages::GET_CATEGORY_BY_NAME_FAIL).reply(e)),
    }
}

/// Create a category (POST /category).
pub async fn create_category(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Reply, Reply> {
    let category = json_body(payload, messages::INVALID_CATEGORY_DATA)?
        .into_category(Utc::now())
        .map_err(|e| invalid(e, messages::INVALID_CATEGORY_DATA))?;

    match state.categories.save(&category).await {
        Ok(true) => {
            tracing::info!(admin = %admin.username, name = %category.name, "category created");
            Ok(Reply::new(StatusCode::Created, messages::POST_CATEGORY_SUCCESS))
        }
        Ok(false) => Err(Reply::new(
            StatusCode::InternalServerError,
            messages::POST_CATEGORY_FAIL,
        )),
        Err(e) => Err(Failure::new(messages::POST_CATEGORY_FAIL)
            .duplicate(messages::POST_CATEGORY_FAIL_DUPLICATE)
            .reply(e)),
    }
}

/// Change a category's weight and flags, addressed by name (PUT /category).
pub async fn update_category(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> Result<Reply, Reply> {
    let category = json_body(payload, messages::INVALID_CATEGORY_DATA)?
        .into_category(Utc::now())
        .map_err(|e| invalid(e, messages::INVALID_CATEGORY_DATA))?;

    match state.categories.update(&category).await {
        Ok(true) => {
            tracing::info!(admin = %admin.username, name = %category.name, "category updated");
            Ok(Reply::new(StatusCode::Ok, messages::UPDATE_CATEGORY_SUCCESS))
        }
        Ok(false) => Err(Reply::new(
            StatusCode::NotFound,
            messages::UPDATE_CATEGORY_NOT_FOUND,
        )),
        Err(e) => Err(Failure::new(messages::UPDATE_CATEGORY_FAIL).reply(e)),
    }
}

/// Delete an unused category by name (DELETE /category?name=).
pub async fn delete_category(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Reply, Reply> {
    let name = query.ok().and_then(|Query(q)| q.name).unwrap_or_default();
    let name = key_param(&name, messages::GET_CATEGORY_WRONG_PARAMETER)?;

    match state.categories.delete_by_key(&name).await {
        Ok(true) => {
            tracing::info!(admin = %admin.username, name = %name, "category deleted");
            Ok(Reply::new(StatusCode::Ok, messages::DELETE_CATEGORY_SUCCESS))
        }
        Ok(false) => Err(Reply::new(
            StatusCode::NotFound,
            messages::DELETE_CATEGORY_FAIL_NOT_FOUND,
        )),
        Err(e) => Err(Failure::new(messages::DELETE_CATEGORY_FAIL)
            .in_use(messages::DELETE_CATEGORY_FAIL_IS_IN_USE)
            .reply(e)),
    }
}
