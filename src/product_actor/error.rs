use thiserror::Error;

use crate::actor_framework::FrameworkError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("{0}")]
    NotFound(String),
    #[error("Product validation error: {0}")]
    ValidationError(String),
    #[error("Product was modified concurrently: {0}")]
    Conflict(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl ProductError {
    pub fn missing_id(id: i32) -> Self {
        ProductError::NotFound(format!("Product with ID {id} was not found."))
    }
}

impl From<FrameworkError> for ProductError {
    fn from(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => ProductError::NotFound(format!("Product with ID {id} was not found.")),
            FrameworkError::Rejected(reason) => ProductError::ValidationError(reason),
            e @ FrameworkError::Conflict { .. } => ProductError::Conflict(e.to_string()),
            e @ (FrameworkError::ActorClosed | FrameworkError::ActorDropped) => {
                ProductError::ActorCommunicationError(e.to_string())
            }
        }
    }
}
