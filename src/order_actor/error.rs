use thiserror::Error;

use crate::actor_framework::FrameworkError;
use crate::cart_actor::CartError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Missing information: {}", .0.join(", "))]
    MissingInformation(Vec<String>),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Order database error: {0}")]
    DatabaseError(String),
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for OrderError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::Rejected(reason) => OrderError::ValidationError(reason),
            FrameworkError::Storage(reason) => OrderError::DatabaseError(reason),
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
