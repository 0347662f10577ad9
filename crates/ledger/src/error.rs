//! Limit-engine error taxonomy.
//!
//! Every variant carries enough context (which client, which limit, the
//! attempted value) for the caller to render an actionable message. All
//! conditions are local, synchronous and recoverable.

use thiserror::Error;

use credline_core::{ClientId, Money, PurchaseId};
use credline_parties::ClientStatus;

use crate::purchase::PurchaseStatus;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Purchase value was zero or negative. Checked before any limit math.
    #[error("purchase value must be positive (got {value})")]
    InvalidValue { value: Money },

    /// Purchase attempted against a client that is not approved.
    #[error("client {client_id} is not approved for purchases (status: {status})")]
    ClientNotApproved {
        client_id: ClientId,
        status: ClientStatus,
    },

    /// Purchase would exceed the client's available headroom.
    #[error(
        "purchase of {attempted} exceeds available limit {available} \
         for client {client_id} (approved limit {approved_limit})"
    )]
    LimitExceeded {
        client_id: ClientId,
        attempted: Money,
        available: Money,
        approved_limit: Money,
    },

    /// Disallowed purchase status change.
    #[error("illegal status transition {from} -> {to} for purchase {purchase_id}")]
    IllegalTransition {
        purchase_id: PurchaseId,
        from: PurchaseStatus,
        to: PurchaseStatus,
    },
}
