//! Controllers orchestrating data sources for the dashboard views.

use thiserror::Error;

use crate::forms::FieldErrors;
use crate::repository::errors::RepositoryError;

pub mod clients;
pub mod dashboard;
pub mod search;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    /// Submitted form failed field checks; nothing was sent.
    #[error("form validation failed")]
    Validation(FieldErrors),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Text for notifications and inline error states; `fallback` is used
    /// when the error carries no message of its own.
    pub fn user_message(&self, fallback: &str) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            fallback.to_string()
        } else {
            message
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ServiceError::Validation(errors) => Some(errors),
            ServiceError::Repository(_) => None,
        }
    }
}
