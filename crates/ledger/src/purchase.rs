use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use credline_core::{ClientId, Money, PurchaseId};

/// Number of calendar days between purchase date and due date.
pub const DUE_DATE_DAYS: u64 = 30;

/// Purchase settlement lifecycle.
///
/// Transitions are explicit operator actions; the engine never derives
/// `Overdue` from wall-clock time. `Paid` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PurchaseStatus {
    Active,
    Overdue,
    Paid,
}

impl PurchaseStatus {
    /// The hardened transition table: `Active → Overdue`, `Active → Paid`,
    /// `Overdue → Paid`. Everything else (including `Overdue → Active` and
    /// any transition out of `Paid`) is rejected.
    pub fn can_transition(self, to: PurchaseStatus) -> bool {
        use PurchaseStatus::*;
        matches!((self, to), (Active, Overdue) | (Active, Paid) | (Overdue, Paid))
    }
}

impl core::fmt::Display for PurchaseStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PurchaseStatus::Active => f.write_str("active"),
            PurchaseStatus::Overdue => f.write_str("overdue"),
            PurchaseStatus::Paid => f.write_str("paid"),
        }
    }
}

/// A purchase recorded against a client's credit limit.
///
/// Value, dates and the owning client are immutable after creation; only the
/// status evolves, through [`crate::engine::change_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    id: PurchaseId,
    client_id: ClientId,
    value: Money,
    purchase_date: NaiveDate,
    /// Derived once at creation: `purchase_date + 30 days`.
    due_date: NaiveDate,
    status: PurchaseStatus,
    created_at: DateTime<Utc>,
}

impl Purchase {
    pub(crate) fn new(
        id: PurchaseId,
        client_id: ClientId,
        value: Money,
        purchase_date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            client_id,
            value,
            purchase_date,
            due_date: Self::due_date_for(purchase_date),
            status: PurchaseStatus::Active,
            created_at,
        }
    }

    /// Due-date law: 30 calendar days after the purchase date, with month and
    /// year rollover handled by standard date arithmetic.
    pub fn due_date_for(purchase_date: NaiveDate) -> NaiveDate {
        purchase_date + Days::new(DUE_DATE_DAYS)
    }

    pub(crate) fn set_status(&mut self, status: PurchaseStatus) {
        self.status = status;
    }

    pub fn id(&self) -> PurchaseId {
        self.id
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn value(&self) -> Money {
        self.value
    }

    pub fn purchase_date(&self) -> NaiveDate {
        self.purchase_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn status(&self) -> PurchaseStatus {
        self.status
    }

    /// Whether this purchase currently occupies limit headroom.
    ///
    /// Paid purchases no longer count against the client's limit.
    pub fn occupies_limit(&self) -> bool {
        matches!(self.status, PurchaseStatus::Active | PurchaseStatus::Overdue)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
