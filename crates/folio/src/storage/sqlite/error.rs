//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from `folio_core::storage`.
//! Constraint violations are recognised by their extended result codes.

use folio_core::storage::RepositoryError;

fn constraint_code(err: &rusqlite::Error) -> Option<std::ffi::c_int> {
    match err {
        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Some(sqlite_err.extended_code)
        }
        _ => None,
    }
}

/// Maps a rusqlite error concerning the entity keyed `id`.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_UNIQUE` / `SQLITE_CONSTRAINT_PRIMARYKEY` → `RepositoryError::AlreadyExists`
/// - `SQLITE_CONSTRAINT_FOREIGNKEY` → `RepositoryError::InvalidData`
/// - Connection errors → `RepositoryError::ConnectionFailed`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, entity_type: &'static str, id: &str) -> RepositoryError {
    match constraint_code(err) {
        Some(rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE)
        | Some(rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY) => RepositoryError::AlreadyExists {
            entity_type,
            id: id.to_string(),
        },
        Some(rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY) => RepositoryError::InvalidData(
            format!("Foreign key constraint violation for {entity_type} {id}"),
        ),
        _ => match err {
            rusqlite::Error::SqliteFailure(sqlite_err, _)
                if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
            {
                RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity_type,
                id: id.to_string(),
            },
            _ => RepositoryError::QueryFailed(err.to_string()),
        },
    }
}

/// Maps a tokio_rusqlite error concerning the entity keyed `id`.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let id = id.into();
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => {
            map_rusqlite_error(rusqlite_err, entity_type, &id)
        }
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a failed delete, reporting a foreign key violation as the row still being in use.
pub fn map_delete_error(
    err: tokio_rusqlite::Error,
    entity_type: &'static str,
    id: impl Into<String>,
) -> RepositoryError {
    let id = id.into();
    match map_tokio_rusqlite_error(err, entity_type, id.clone()) {
        RepositoryError::InvalidData(_) => RepositoryError::InUse { entity_type, id },
        other => other,
    }
}
