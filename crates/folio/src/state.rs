//! Application state shared by every handler.

use std::sync::Arc;

use axum::extract::FromRef;
use folio_auth::AuthState;
use folio_core::cache::Invalidate;
use folio_core::content::{Blog, Category, ImageCompressor, Picture};

use crate::mailer::{DailyLimiter, Mailer};
use crate::storage::{CachedFavourites, CachedGateway, SqliteRepository};

#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<CachedGateway<Blog>>,
    pub categories: Arc<CachedGateway<Category>>,
    pub pictures: Arc<CachedGateway<Picture>>,
    pub favourites: Arc<CachedFavourites>,
    pub auth: AuthState,
    pub mailer: Arc<dyn Mailer>,
    pub email_limit: Arc<DailyLimiter>,
}

impl AppState {
    /// Wires the cached gateways over `repository`.
    ///
    /// Favourites embed pictures and pictures embed their category name, so
    /// category writes invalidate both and picture writes invalidate favourites.
    pub fn new(
        repository: Arc<SqliteRepository>,
        compressor: Arc<dyn ImageCompressor>,
        auth: AuthState,
        mailer: Arc<dyn Mailer>,
        email_daily_limit: u32,
    ) -> Self {
        let favourites = Arc::new(
            CachedFavourites::new(repository.clone()).with_compressor(compressor.clone()),
        );
        let pictures = Arc::new(
            CachedGateway::<Picture>::new(repository.clone())
                .with_compressor(compressor.clone())
                .invalidates(favourites.clone() as Arc<dyn Invalidate>),
        );
        let categories = Arc::new(
            CachedGateway::<Category>::new(repository.clone())
                .invalidates(pictures.clone() as Arc<dyn Invalidate>)
                .invalidates(favourites.clone() as Arc<dyn Invalidate>),
        );
        let blogs = Arc::new(CachedGateway::<Blog>::new(repository).with_compressor(compressor));

        Self {
            blogs,
            categories,
            pictures,
            favourites,
            auth,
            mailer,
            email_limit: Arc::new(DailyLimiter::new(email_daily_limit)),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        state.auth.clone()
    }
}
