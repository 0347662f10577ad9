use std::sync::Arc;

use thiserror::Error;

use crate::principal::Principal;

/// Identity provider operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Unknown email or wrong secret. Deliberately does not say which.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("session storage failure: {0}")]
    Storage(String),
}

/// Authentication boundary.
///
/// Session-token transport is out of scope; implementations only need to
/// answer "who is acting right now".
pub trait IdentityProvider: Send + Sync {
    /// Authenticate a principal and open a session for it.
    fn authenticate(&self, email: &str, secret: &str) -> Result<Principal, IdentityError>;

    /// The currently authenticated principal, if a session is open.
    fn current_principal(&self) -> Option<Principal>;

    /// Close the current session. Closing an absent session is a no-op.
    fn end_session(&self);
}

impl<P> IdentityProvider for Arc<P>
where
    P: IdentityProvider + ?Sized,
{
    fn authenticate(&self, email: &str, secret: &str) -> Result<Principal, IdentityError> {
        (**self).authenticate(email, secret)
    }

    fn current_principal(&self) -> Option<Principal> {
        (**self).current_principal()
    }

    fn end_session(&self) {
        (**self).end_session()
    }
}
