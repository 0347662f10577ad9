use std::collections::HashMap;
use std::sync::RwLock;

use crate::principal::Principal;
use crate::provider::{IdentityError, IdentityProvider};

struct UserEntry {
    secret: String,
    principal: Principal,
}

/// In-memory identity provider for tests, dev and demos.
///
/// Holds registered accounts and at most one open session. Like the in-memory
/// directory, this backend is selected explicitly, never substituted at call
/// time after a failed remote call.
#[derive(Default)]
pub struct InMemoryIdentity {
    users: RwLock<HashMap<String, UserEntry>>,
    session: RwLock<Option<Principal>>,
}

impl InMemoryIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an account. Emails are matched case-insensitively.
    pub fn register(&self, principal: Principal, secret: impl Into<String>) {
        if let Ok(mut users) = self.users.write() {
            users.insert(
                principal.email().to_lowercase(),
                UserEntry {
                    secret: secret.into(),
                    principal,
                },
            );
        }
    }
}

fn poisoned(_: impl core::fmt::Debug) -> IdentityError {
    IdentityError::Storage("lock poisoned".to_string())
}

impl IdentityProvider for InMemoryIdentity {
    fn authenticate(&self, email: &str, secret: &str) -> Result<Principal, IdentityError> {
        let users = self.users.read().map_err(poisoned)?;
        let entry = users
            .get(&email.to_lowercase())
            .ok_or(IdentityError::InvalidCredentials)?;
        if entry.secret != secret {
            return Err(IdentityError::InvalidCredentials);
        }

        let principal = entry.principal.clone();
        drop(users);

        let mut session = self.session.write().map_err(poisoned)?;
        *session = Some(principal.clone());

        tracing::debug!(principal = %principal.id(), role = %principal.role(), "session opened");
        Ok(principal)
    }

    fn current_principal(&self) -> Option<Principal> {
        self.session.read().ok()?.clone()
    }

    fn end_session(&self) {
        if let Ok(mut session) = self.session.write() {
            *session = None;
        }
    }
}
