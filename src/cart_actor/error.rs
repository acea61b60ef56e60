use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Cart change rejected: {0}")]
    Rejected(String),
    #[error("Cart storage error: {0}")]
    StorageError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CartError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CartError::Rejected(format!("Item not found: {}", id)),
            FrameworkError::Rejected(reason) => CartError::Rejected(reason),
            FrameworkError::Storage(reason) => CartError::StorageError(reason),
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}
