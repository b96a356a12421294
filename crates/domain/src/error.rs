//! Domain error types.

use store::{StoreError, ValidationErrors};
use thiserror::Error;

/// Reasons the capacity validator refuses an assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Bag is disabled")]
    BagDisabled,

    #[error("Insufficient capacity in bag")]
    InsufficientCapacity,
}

impl Rejection {
    /// Stable label used for metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            Rejection::BagDisabled => "bag_disabled",
            Rejection::InsufficientCapacity => "insufficient_capacity",
        }
    }
}

/// Errors that can occur during inventory operations.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced bag or cuboid doesn't exist.
    #[error("not found")]
    NotFound,

    /// Resolving a referenced record failed in the store.
    #[error("{0}")]
    LookupFailed(StoreError),

    /// The capacity validator refused the assignment.
    #[error("{0}")]
    Rejected(#[from] Rejection),

    /// The store refused a record because of a field constraint.
    #[error("{0}")]
    Validation(ValidationErrors),

    /// A read or write failed in the store.
    #[error("{0}")]
    Storage(StoreError),
}

impl DomainError {
    /// Classifies an error raised while resolving a referenced record.
    pub fn from_lookup(err: StoreError) -> Self {
        if err.is_not_found() {
            DomainError::NotFound
        } else {
            DomainError::LookupFailed(err)
        }
    }

    /// Classifies an error raised by a list or write call.
    pub fn from_write(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => DomainError::Validation(errors),
            err if err.is_not_found() => DomainError::NotFound,
            err => DomainError::Storage(err),
        }
    }
}
