use folio_auth::Reply;
use folio_core::envelope::StatusCode;
use folio_core::storage::{repository_error_to_status_code, RepositoryError};

/// Client messages for the storage failures one operation can run into.
///
/// Failure kinds without a message are unexpected for that operation and
/// reply with the internal error message.
#[derive(Debug, Clone, Copy)]
pub struct Failure {
    internal: &'static str,
    not_found: Option<&'static str>,
    duplicate: Option<&'static str>,
    in_use: Option<&'static str>,
    invalid: Option<&'static str>,
}

impl Failure {
    pub const fn new(internal: &'static str) -> Self {
        Self {
            internal,
            not_found: None,
            duplicate: None,
            in_use: None,
            invalid: None,
        }
    }

    pub const fn not_found(mut self, message: &'static str) -> Self {
        self.not_found = Some(message);
        self
    }

    pub const fn duplicate(mut self, message: &'static str) -> Self {
        self.duplicate = Some(message);
        self
    }

    pub const fn in_use(mut self, message: &'static str) -> Self {
        self.in_use = Some(message);
        self
    }

    /// Message for a rejected reference, e.g. a picture pointing at a removed category.
    pub const fn invalid(mut self, message: &'static str) -> Self {
        self.invalid = Some(message);
        self
    }

    pub fn reply(&self, error: RepositoryError) -> Reply {
        let message = match &error {
            RepositoryError::NotFound { .. } => self.not_found,
            RepositoryError::AlreadyExists { .. } => self.duplicate,
            RepositoryError::InUse { .. } => self.in_use,
            RepositoryError::InvalidData(_) => self.invalid,
            _ => None,
        };

        match message {
            Some(message) => {
                tracing::debug!(error = %error, "request rejected by storage");
                let status = match &error {
                    RepositoryError::InvalidData(_) => StatusCode::NotFound,
                    _ => repository_error_to_status_code(&error),
                };
                Reply::new(status, message)
            }
            None => {
                tracing::error!(error = %error, "storage operation failed");
                Reply::new(StatusCode::InternalServerError, self.internal)
            }
        }
    }
}
