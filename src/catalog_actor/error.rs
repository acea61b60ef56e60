use thiserror::Error;

use crate::actor_framework::FrameworkError;

/// Errors that can occur while reading or seeding the catalog.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    #[error("Restaurant not found: {0}")]
    RestaurantNotFound(String),
    #[error("Catalog is read-only: {0}")]
    ReadOnly(String),
    #[error("Catalog database error: {0}")]
    DatabaseError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl From<FrameworkError> for CatalogError {
    fn from(e: FrameworkError) -> Self {
        match e {
            FrameworkError::NotFound(id) => CatalogError::RestaurantNotFound(id),
            FrameworkError::Rejected(reason) => CatalogError::ReadOnly(reason),
            FrameworkError::Storage(reason) => CatalogError::DatabaseError(reason),
            other => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}
