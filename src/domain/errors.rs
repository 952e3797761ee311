use thiserror::Error;

use super::lifecycle::TransitionError;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    IllegalTransition(#[from] TransitionError),
    #[error("Order is already assigned to a courier")]
    AlreadyAssigned,
    #[error("Insufficient stock")]
    OutOfStock,
    #[error("Delivery location is not set")]
    MissingLocation,
    #[error("Order was modified concurrently, retry the request")]
    ConcurrentUpdate,
    #[error("Internal error: {0}")]
    Internal(String),
}
