//! Startup tasks run before the server accepts connections.

use std::path::Path;

use anyhow::{Context, Result};
use folio_core::content::parse_title_list;
use folio_core::storage::{FavouriteGateway, RepositoryError};

/// Replaces the favourites with the titles listed in `path`, one per line.
///
/// Returns how many titles were applied. An empty file, or one naming a
/// picture that does not exist, leaves the favourites untouched.
pub async fn seed_favourites(favourites: &dyn FavouriteGateway, path: &Path) -> Result<usize> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read favourites file {}", path.display()))?;

    let titles = parse_title_list(&contents);
    if titles.is_empty() {
        tracing::warn!(path = %path.display(), "favourites file lists no pictures");
        return Ok(0);
    }

    match favourites.replace_all(&titles).await {
        Ok(_) => {
            tracing::info!(count = titles.len(), "favourites seeded");
            Ok(titles.len())
        }
        Err(RepositoryError::NotFound { id, .. }) => {
            tracing::warn!(title = %id, "favourites file names an unknown picture, skipping seed");
            Ok(0)
        }
        Err(e) => Err(e).context("failed to seed favourites"),
    }
}
