//! Pure functions for mapping repository errors to envelope status codes.

use super::RepositoryError;
use crate::envelope::StatusCode;

/// Maps a [`RepositoryError`] to the envelope status code vocabulary.
///
/// - `NotFound` -> 404
/// - `AlreadyExists`, `InUse`, `InvalidData` -> 400
/// - `ConnectionFailed`, `QueryFailed`, `Serialization` -> 500
///
/// # Examples
///
/// ```
/// use folio_core::envelope::StatusCode;
/// use folio_core::storage::{repository_error_to_status_code, RepositoryError};
///
/// let error = RepositoryError::AlreadyExists {
///     entity_type: "Blog",
///     id: "First post".to_string(),
/// };
/// assert_eq!(repository_error_to_status_code(&error), StatusCode::BadRequest);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> StatusCode {
    match error {
        RepositoryError::NotFound { .. } => StatusCode::NotFound,
        RepositoryError::AlreadyExists { .. } => StatusCode::BadRequest,
        RepositoryError::InUse { .. } => StatusCode::BadRequest,
        RepositoryError::InvalidData(_) => StatusCode::BadRequest,
        RepositoryError::ConnectionFailed(_) => StatusCode::InternalServerError,
        RepositoryError::QueryFailed(_) => StatusCode::InternalServerError,
        RepositoryError::Serialization(_) => StatusCode::InternalServerError,
    }
}
