use thiserror::Error;

use crate::domain::types::TypeConstraintError;

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Non-success HTTP response, or a request that never got one.
    #[error("{message}")]
    Transport {
        status: Option<u16>,
        message: String,
    },

    #[error("Client not found")]
    NotFound,

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl RepositoryError {
    /// Builds the error for a non-success status, preferring the message
    /// carried in the response body.
    pub fn from_status(status: u16, body_message: Option<String>) -> Self {
        let message = body_message
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("HTTP error {status}"));
        RepositoryError::Transport {
            status: Some(status),
            message,
        }
    }

    /// HTTP status of a transport failure, when the service answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            RepositoryError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return RepositoryError::Unexpected(format!("Invalid response body: {err}"));
        }
        RepositoryError::Transport {
            status: err.status().map(|s| s.as_u16()),
            message: format!("Connection error: {err}"),
        }
    }
}

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::Unexpected(val.to_string())
    }
}
