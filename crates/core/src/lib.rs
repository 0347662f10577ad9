//! Domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the `Money` value type and the domain error model.

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{ClientId, CompanyId, PurchaseId, UserId};
pub use money::Money;
