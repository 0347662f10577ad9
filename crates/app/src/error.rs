use thiserror::Error;

use credline_core::DomainError;
use credline_directory::DirectoryError;
use credline_identity::{AuthzError, IdentityError};
use credline_ledger::LedgerError;

/// Application operation error: the union of every layer's failure modes.
///
/// Variants are transparent so callers can match on the underlying error
/// without unwrapping a wrapper message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Directory(#[from] DirectoryError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error(transparent)]
    Authz(#[from] AuthzError),

    #[error("internal error: {0}")]
    Internal(String),
}
