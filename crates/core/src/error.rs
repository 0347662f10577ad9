//! Domain error model.
//!
//! Only deterministic business failures live here. Missing records are
//! `DirectoryError::NotFound` and authorization failures are `AuthzError`;
//! neither belongs to the domain layer.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or out-of-range input (blank name, negative limit, fee
    /// outside 0..=100).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A structural rule was broken while assembling a record, such as an
    /// operator principal without a company binding.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier string did not parse as a UUID.
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
