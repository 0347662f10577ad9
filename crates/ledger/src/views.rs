//! Derived, read-only aggregate views.
//!
//! Views are recomputed on demand from explicitly passed data, never cached or
//! stored. The company and system summaries back the operator and admin
//! dashboards respectively.

use serde::Serialize;

use credline_core::Money;
use credline_parties::{Company, CreditClient};

use crate::purchase::Purchase;

/// Outstanding receivable: the sum of values over active and overdue
/// purchases. Paid purchases are settled and excluded.
pub fn outstanding_receivable(purchases: &[Purchase]) -> Money {
    purchases
        .iter()
        .filter(|p| p.occupies_limit())
        .map(Purchase::value)
        .sum()
}

/// Total granted limit: the sum of approved limits over **approved** clients.
///
/// Pending clients are excluded; their limit is a request, not a grant.
pub fn granted_limit(clients: &[CreditClient]) -> Money {
    clients
        .iter()
        .filter(|c| c.is_approved())
        .map(CreditClient::approved_limit)
        .sum()
}

/// Per-company dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompanySummary {
    pub total_clients: usize,
    pub approved_clients: usize,
    pub outstanding_receivable: Money,
    pub granted_limit: Money,
    pub overdue_purchases: usize,
}

/// Compute the company dashboard from that company's clients and purchases.
pub fn company_summary(clients: &[CreditClient], purchases: &[Purchase]) -> CompanySummary {
    CompanySummary {
        total_clients: clients.len(),
        approved_clients: clients.iter().filter(|c| c.is_approved()).count(),
        outstanding_receivable: outstanding_receivable(purchases),
        granted_limit: granted_limit(clients),
        overdue_purchases: purchases
            .iter()
            .filter(|p| p.status() == crate::purchase::PurchaseStatus::Overdue)
            .count(),
    }
}

/// System-wide dashboard figures (admin view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemSummary {
    pub companies: usize,
    pub clients: usize,
    pub outstanding_receivable: Money,
    pub granted_limit: Money,
}

/// Compute the admin dashboard across all companies.
pub fn system_summary(
    companies: &[Company],
    clients: &[CreditClient],
    purchases: &[Purchase],
) -> SystemSummary {
    SystemSummary {
        companies: companies.len(),
        clients: clients.len(),
        outstanding_receivable: outstanding_receivable(purchases),
        granted_limit: granted_limit(clients),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{change_status, record_purchase};
    use crate::purchase::PurchaseStatus;
    use chrono::{NaiveDate, Utc};
    use credline_core::{ClientId, CompanyId};
    use credline_parties::NewClient;

    fn test_client(company_id: CompanyId, limit: i64, approved: bool) -> CreditClient {
        let mut client = CreditClient::register(
            ClientId::new(),
            NewClient {
                company_id,
                name: "Client".to_string(),
                address: String::new(),
                email: String::new(),
                cpf: "123.456.789-00".to_string(),
                phone: String::new(),
                income: Money::ZERO,
                initial_limit: Money::from(limit),
            },
            Utc::now(),
        )
        .unwrap();
        if approved {
            client.approve();
        }
        client
    }

    fn purchase_for(client: &CreditClient, value: i64, status: PurchaseStatus) -> Purchase {
        let mut p = record_purchase(
            client,
            &[],
            Money::from(value),
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            Utc::now(),
        )
        .unwrap();
        if status != PurchaseStatus::Active {
            change_status(&mut p, status).unwrap();
        }
        p
    }

    #[test]
    fn outstanding_excludes_paid() {
        let company_id = CompanyId::new();
        let client = test_client(company_id, 10_000, true);
        let purchases = vec![
            purchase_for(&client, 400, PurchaseStatus::Active),
            purchase_for(&client, 300, PurchaseStatus::Overdue),
            purchase_for(&client, 999, PurchaseStatus::Paid),
        ];
        assert_eq!(outstanding_receivable(&purchases), Money::from(700));
    }

    #[test]
    fn granted_limit_counts_approved_clients_only() {
        let company_id = CompanyId::new();
        let clients = vec![
            test_client(company_id, 1000, true),
            test_client(company_id, 2000, true),
            test_client(company_id, 9999, false),
        ];
        assert_eq!(granted_limit(&clients), Money::from(3000));
    }

    #[test]
    fn company_summary_aggregates_everything() {
        let company_id = CompanyId::new();
        let clients = vec![
            test_client(company_id, 1000, true),
            test_client(company_id, 500, false),
        ];
        let purchases = vec![
            purchase_for(&clients[0], 200, PurchaseStatus::Active),
            purchase_for(&clients[0], 150, PurchaseStatus::Overdue),
            purchase_for(&clients[0], 100, PurchaseStatus::Paid),
        ];

        let summary = company_summary(&clients, &purchases);
        assert_eq!(
            summary,
            CompanySummary {
                total_clients: 2,
                approved_clients: 1,
                outstanding_receivable: Money::from(350),
                granted_limit: Money::from(1000),
                overdue_purchases: 1,
            }
        );
    }
}
