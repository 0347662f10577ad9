//! Ledger & Limit Engine.
//!
//! Pure domain logic only: available-limit computation over a purchase ledger,
//! limit-gated purchase creation, the purchase status state machine and the
//! derived aggregate views. No IO, no HTTP, no persistence concerns; every
//! operation is a function of explicitly passed data so any caller (UI, batch
//! job, test) gets identical results.

pub mod engine;
pub mod error;
pub mod purchase;
pub mod views;

pub use engine::{available_limit, change_status, record_purchase};
pub use error::LedgerError;
pub use purchase::{Purchase, PurchaseStatus};
pub use views::{
    CompanySummary, SystemSummary, company_summary, granted_limit, outstanding_receivable,
    system_summary,
};
