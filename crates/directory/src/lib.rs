//! Directory store: persistence boundary for companies, clients and purchases.
//!
//! The engine only ever talks to the [`DirectoryStore`] trait. The in-memory
//! backend here is a real, explicitly selected implementation (tests, dev,
//! demos), never a silent fallback substituted after a caught remote failure.

pub mod in_memory;
pub mod store;

pub use in_memory::InMemoryDirectory;
pub use store::{DirectoryError, DirectoryStore, PurchaseFilter};
