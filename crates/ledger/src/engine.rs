//! Limit accounting over a purchase ledger.
//!
//! All functions here are pure: no IO, no hidden state, no retries.
//! Persistence is the caller's concern; [`record_purchase`] ends its contract
//! at producing a valid, limit-respecting record. Callers must serialize
//! purchase creation per client (see `credline-app`), otherwise two concurrent
//! headroom checks can both pass.

use chrono::{DateTime, NaiveDate, Utc};

use credline_core::{Money, PurchaseId};
use credline_parties::CreditClient;

use crate::error::LedgerError;
use crate::purchase::{Purchase, PurchaseStatus};

/// Compute the client's available credit headroom.
///
/// `purchases` must be the complete set of purchases belonging to `client`.
/// Usage is the sum of active and overdue purchase values; paid purchases no
/// longer occupy headroom. The result is signed and never clamped: a negative
/// value means "no further purchases permitted" (possible when a limit was
/// lowered below outstanding usage), not an error.
pub fn available_limit(client: &CreditClient, purchases: &[Purchase]) -> Money {
    let used: Money = purchases
        .iter()
        .filter(|p| p.occupies_limit())
        .map(Purchase::value)
        .sum();
    client.approved_limit() - used
}

/// Gate a new purchase against the client's available headroom.
///
/// Rejections, in check order:
/// - [`LedgerError::InvalidValue`] when `value <= 0` (before any limit math);
/// - [`LedgerError::ClientNotApproved`] when the client is not approved;
/// - [`LedgerError::LimitExceeded`] when `value` exceeds availability
///   (`value == available` is permitted).
///
/// On success returns a fresh `Active` purchase with a newly allocated id and
/// a due date of `purchase_date + 30 days`. The record is not persisted here.
pub fn record_purchase(
    client: &CreditClient,
    existing: &[Purchase],
    value: Money,
    purchase_date: NaiveDate,
    recorded_at: DateTime<Utc>,
) -> Result<Purchase, LedgerError> {
    if !value.is_positive() {
        return Err(LedgerError::InvalidValue { value });
    }

    if !client.is_approved() {
        return Err(LedgerError::ClientNotApproved {
            client_id: client.id(),
            status: client.status(),
        });
    }

    let available = available_limit(client, existing);
    if value > available {
        return Err(LedgerError::LimitExceeded {
            client_id: client.id(),
            attempted: value,
            available,
            approved_limit: client.approved_limit(),
        });
    }

    Ok(Purchase::new(
        PurchaseId::new(),
        client.id(),
        value,
        purchase_date,
        recorded_at,
    ))
}

/// Apply an explicit status change, enforcing the hardened transition table.
///
/// Moving to `Paid` frees headroom on the next [`available_limit`]
/// computation; `Active → Overdue` has a reporting effect only.
pub fn change_status(
    purchase: &mut Purchase,
    new_status: PurchaseStatus,
) -> Result<(), LedgerError> {
    let from = purchase.status();
    if !from.can_transition(new_status) {
        return Err(LedgerError::IllegalTransition {
            purchase_id: purchase.id(),
            from,
            to: new_status,
        });
    }
    purchase.set_status(new_status);
    Ok(())
}
