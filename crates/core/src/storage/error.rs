use thiserror::Error;

/// Errors that can occur during gateway operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    /// A unique constraint rejected the write.
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    /// A foreign key still references the row being deleted.
    #[error("{entity_type} is still referenced: {id}")]
    InUse {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::AlreadyExists { .. })
    }
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::NotFound {
            entity_type: "Blog",
            id: "First post".to_string(),
        };
        assert_eq!(error.to_string(), "Blog not found: First post");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::AlreadyExists {
            entity_type: "Category",
            id: "Landscapes".to_string(),
        };
        assert_eq!(error.to_string(), "Category already exists: Landscapes");
        assert!(error.is_duplicate());
    }

    #[test]
    fn test_repository_error_in_use_display() {
        let error = RepositoryError::InUse {
            entity_type: "Category",
            id: "Landscapes".to_string(),
        };
        assert_eq!(error.to_string(), "Category is still referenced: Landscapes");
        assert!(!error.is_duplicate());
    }

    #[test]
    fn test_repository_error_connection_failed_display() {
        let error = RepositoryError::ConnectionFailed("database is locked".to_string());
        assert_eq!(error.to_string(), "Connection failed: database is locked");
    }

    #[test]
    fn test_repository_error_query_failed_display() {
        let error = RepositoryError::QueryFailed("no such table: blogs".to_string());
        assert_eq!(error.to_string(), "Query failed: no such table: blogs");
    }

    #[test]
    fn test_repository_error_serialization_display() {
        let error = RepositoryError::Serialization("bad timestamp".to_string());
        assert_eq!(error.to_string(), "Serialization error: bad timestamp");
    }

    #[test]
    fn test_repository_error_invalid_data_display() {
        let error = RepositoryError::InvalidData("foreign key violation".to_string());
        assert_eq!(error.to_string(), "Invalid data: foreign key violation");
    }
}
