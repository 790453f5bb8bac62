use thiserror::Error;

/// Reasons a request body cannot become an entity.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("{0} must not be empty")]
    EmptyField(&'static str),
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("invalid image: {0}")]
    InvalidImage(String),
    #[error("weight must be a finite number")]
    InvalidWeight,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("no picture titles supplied")]
    NoTitles,
}
