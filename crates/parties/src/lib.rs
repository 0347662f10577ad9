//! Parties domain module (companies and their credit clients).
//!
//! This crate contains business rules for registered companies and the credit
//! clients they sponsor, implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod client;
pub mod company;

pub use client::{ClientStatus, ClientUpdate, CreditClient, NewClient};
pub use company::{Company, CompanyUpdate, Contact, NewCompany};
