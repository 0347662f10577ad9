//! Authentication and authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: principals are
//! plain values, authorization checks are pure functions, and session handling
//! sits behind the [`IdentityProvider`] trait.

pub mod authorize;
pub mod in_memory;
pub mod principal;
pub mod provider;

pub use authorize::{AuthzError, require_admin, require_company_access};
pub use in_memory::InMemoryIdentity;
pub use principal::{Principal, Role};
pub use provider::{IdentityError, IdentityProvider};
