//! End-to-end walkthrough against the configured backend: register a company
//! and a client, approve, then run the limit cycle. Useful for eyeballing the
//! structured logs (`RUST_LOG=debug cargo run --bin credline-demo`).

use anyhow::Context;
use chrono::Utc;
use rust_decimal::Decimal;

use credline_app::{AppConfig, CreditService};
use credline_core::{Money, UserId};
use credline_identity::{IdentityProvider, InMemoryIdentity, Principal};
use credline_parties::{Contact, NewClient, NewCompany};

fn main() -> anyhow::Result<()> {
    credline_observability::init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    let service = CreditService::new(config.build_directory());

    let identity = InMemoryIdentity::new();
    let admin_id = UserId::new();
    identity.register(
        Principal::admin(admin_id, "admin@credline.test", "Admin"),
        "admin-secret",
    );
    let admin = identity.authenticate("admin@credline.test", "admin-secret")?;

    let operator_id = UserId::new();
    let company = service.register_company(
        &admin,
        NewCompany {
            tax_id: "12.345.678/0001-90".to_string(),
            name: "Acme Retail Ltda".to_string(),
            address: "Rua Comercial, 123".to_string(),
            owner_contact: Contact {
                phone: "+55 11 98888-0000".to_string(),
                email: "owner@acme.test".to_string(),
            },
            financial_contact: Contact {
                phone: "+55 11 97777-0000".to_string(),
                email: "finance@acme.test".to_string(),
            },
            agreed_fee_percent: Decimal::new(25, 1),
            user_id: operator_id,
        },
    )?;

    identity.register(
        Principal::company_operator(operator_id, "op@acme.test", "Operator", company.id()),
        "operator-secret",
    );
    let operator = identity.authenticate("op@acme.test", "operator-secret")?;

    let client = service.register_client(
        &operator,
        NewClient {
            company_id: company.id(),
            name: "Joana Lima".to_string(),
            address: "Rua das Flores, 123".to_string(),
            email: "joana@example.com".to_string(),
            cpf: "123.456.789-00".to_string(),
            phone: "(11) 99999-9999".to_string(),
            income: Money::from(5000),
            initial_limit: Money::from(1000),
        },
    )?;
    service.approve_client(&operator, client.id())?;

    let today = Utc::now().date_naive();
    let purchase = service.record_purchase(&operator, client.id(), Money::from(400), today)?;

    // Over the remaining headroom; expected to be rejected.
    if let Err(err) = service.record_purchase(&operator, client.id(), Money::from(700), today) {
        tracing::info!("over-limit purchase rejected as expected: {err}");
    }

    service.set_purchase_status(
        &operator,
        purchase.id(),
        credline_ledger::PurchaseStatus::Paid,
    )?;

    let statement = service.client_statement(&operator, client.id(), None)?;
    tracing::info!(
        available = %statement.available_limit,
        purchases = statement.purchases.len(),
        "statement after settlement"
    );

    let dashboard = service.system_dashboard(&admin)?;
    tracing::info!(
        companies = dashboard.companies,
        clients = dashboard.clients,
        outstanding = %dashboard.outstanding_receivable,
        granted = %dashboard.granted_limit,
        "system dashboard"
    );

    identity.end_session();
    Ok(())
}
