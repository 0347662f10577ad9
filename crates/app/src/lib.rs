//! Application layer: wires the directory store, identity provider and the
//! limit engine together behind authorized, per-client-serialized operations.

pub mod config;
pub mod error;
pub mod service;

mod integration_tests;

pub use config::{AppConfig, ConfigError, DirectoryBackend};
pub use error::AppError;
pub use service::{ClientStatement, CreditService};
