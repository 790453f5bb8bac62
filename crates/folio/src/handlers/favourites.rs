use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use folio_auth::{AdminUser, Reply};
use folio_core::content::{FavouritePicture, FavouritesRequest};
use folio_core::envelope::{messages, StatusCode};
use folio_core::storage::FavouriteGateway;

use super::{invalid, json_body, Failure};
use crate::state::AppState;

/// Pictures selected for the home page, with downsized images (GET /home/pictures).
pub async fn get_favourites(
    State(state): State<AppState>,
) -> Result<Reply<Arc<Vec<FavouritePicture>>>, Reply> {
    let favourites = state
        .favourites
        .get_all_compressed()
        .await
        .map_err(|e| Failure::new(messages::GET_FAVOURITE_PICTURES_FAIL).reply(e))?;

    Ok(Reply::new(StatusCode::Ok, messages::GET_FAVOURITE_PICTURES_SUCCESS).with_payload(favourites))
}

/// Replace the home page selection (PUT /home/pictures).
///
/// Accepts picture titles or picture objects. Nothing changes when any
/// title is unknown.
pub async fn replace_favourites(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    payload: Result<Json<FavouritesRequest>, JsonRejection>,
) -> Result<Reply, Reply> {
    let titles = json_body(payload, messages::INVALID_FAVOURITE_PICTURES_DATA)?
        .into_titles()
        .map_err(|e| invalid(e, messages::INVALID_FAVOURITE_PICTURES_DATA))?;

    state
        .favourites
        .replace_all(&titles)
        .await
        .map_err(|e| {
            Failure::new(messages::UPDATE_FAVOURITE_PICTURES_FAIL)
                .not_found(messages::UPDATE_FAVOURITE_PICTURES_NOT_FOUND)
                .reply(e)
        })?;

    tracing::info!(admin = %admin.username, count = titles.len(), "favourites replaced");
    Ok(Reply::new(
        StatusCode::Created,
        messages::UPDATE_FAVOURITE_PICTURES_SUCCESS,
    ))
}
