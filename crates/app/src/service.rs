//! Authorized application operations over the directory store.
//!
//! Every operation takes the acting [`Principal`] explicitly. Purchase
//! recording is serialized per client so the headroom check and the insert
//! behave as one step; without that, two concurrent recordings could both
//! pass the check and overdraw the limit.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, Utc};
use serde::Serialize;

use credline_core::{ClientId, CompanyId, Money, PurchaseId};
use credline_directory::{DirectoryStore, PurchaseFilter};
use credline_identity::{Principal, require_admin, require_company_access};
use credline_ledger::{CompanySummary, Purchase, PurchaseStatus, SystemSummary};
use credline_parties::{
    ClientUpdate, Company, CompanyUpdate, CreditClient, NewClient, NewCompany,
};

use crate::error::AppError;

/// Per-client recording locks, allocated lazily on first use.
#[derive(Default)]
struct ClientLocks {
    inner: Mutex<HashMap<ClientId, Arc<Mutex<()>>>>,
}

impl ClientLocks {
    fn for_client(&self, client_id: ClientId) -> Result<Arc<Mutex<()>>, AppError> {
        let mut locks = self
            .inner
            .lock()
            .map_err(|_| AppError::Internal("client lock registry poisoned".to_string()))?;
        Ok(Arc::clone(locks.entry(client_id).or_default()))
    }
}

/// A client's purchase history together with its current headroom.
#[derive(Debug, Clone, Serialize)]
pub struct ClientStatement {
    pub client: CreditClient,
    /// Newest first; filtered by status when one was requested.
    pub purchases: Vec<Purchase>,
    /// Computed over the full ledger, regardless of the display filter.
    pub available_limit: Money,
}

pub struct CreditService {
    directory: Arc<dyn DirectoryStore>,
    client_locks: ClientLocks,
}

impl CreditService {
    pub fn new(directory: Arc<dyn DirectoryStore>) -> Self {
        Self {
            directory,
            client_locks: ClientLocks::default(),
        }
    }

    // --- company registry (admin) ---

    pub fn register_company(
        &self,
        principal: &Principal,
        input: NewCompany,
    ) -> Result<Company, AppError> {
        require_admin(principal)?;
        let company = Company::register(CompanyId::new(), input, Utc::now())?;
        self.directory.create_company(company.clone())?;
        tracing::info!(company_id = %company.id(), name = company.name(), "company registered");
        Ok(company)
    }

    pub fn update_company(
        &self,
        principal: &Principal,
        company_id: CompanyId,
        update: CompanyUpdate,
    ) -> Result<Company, AppError> {
        require_admin(principal)?;
        let mut company = self.directory.get_company(company_id)?;
        company.apply_update(update)?;
        self.directory.update_company(company.clone())?;
        Ok(company)
    }

    pub fn delete_company(
        &self,
        principal: &Principal,
        company_id: CompanyId,
    ) -> Result<(), AppError> {
        require_admin(principal)?;
        self.directory.delete_company(company_id)?;
        tracing::info!(company_id = %company_id, "company deleted");
        Ok(())
    }

    pub fn list_companies(&self, principal: &Principal) -> Result<Vec<Company>, AppError> {
        require_admin(principal)?;
        Ok(self.directory.list_companies()?)
    }

    /// The company a signed-in operator belongs to, resolved by account id.
    pub fn company_for_operator(
        &self,
        principal: &Principal,
    ) -> Result<Option<Company>, AppError> {
        Ok(self.directory.find_company_by_user(principal.id())?)
    }

    // --- client registry (company-scoped) ---

    pub fn register_client(
        &self,
        principal: &Principal,
        input: NewClient,
    ) -> Result<CreditClient, AppError> {
        require_company_access(principal, input.company_id)?;
        // The sponsoring company must exist.
        self.directory.get_company(input.company_id)?;

        let client = CreditClient::register(ClientId::new(), input, Utc::now())?;
        self.directory.create_client(client.clone())?;
        tracing::info!(
            client_id = %client.id(),
            company_id = %client.company_id(),
            "client registered"
        );
        Ok(client)
    }

    pub fn approve_client(
        &self,
        principal: &Principal,
        client_id: ClientId,
    ) -> Result<CreditClient, AppError> {
        let mut client = self.directory.get_client(client_id)?;
        require_company_access(principal, client.company_id())?;

        client.approve();
        self.directory.update_client(client.clone())?;
        tracing::info!(client_id = %client_id, "client approved");
        Ok(client)
    }

    pub fn set_approved_limit(
        &self,
        principal: &Principal,
        client_id: ClientId,
        limit: Money,
    ) -> Result<CreditClient, AppError> {
        let mut client = self.directory.get_client(client_id)?;
        require_company_access(principal, client.company_id())?;

        client.set_approved_limit(limit)?;
        self.directory.update_client(client.clone())?;
        tracing::info!(client_id = %client_id, limit = %limit, "approved limit changed");
        Ok(client)
    }

    pub fn update_client(
        &self,
        principal: &Principal,
        client_id: ClientId,
        update: ClientUpdate,
    ) -> Result<CreditClient, AppError> {
        let mut client = self.directory.get_client(client_id)?;
        require_company_access(principal, client.company_id())?;

        client.apply_update(update)?;
        self.directory.update_client(client.clone())?;
        Ok(client)
    }

    pub fn list_clients(
        &self,
        principal: &Principal,
        company_id: CompanyId,
    ) -> Result<Vec<CreditClient>, AppError> {
        require_company_access(principal, company_id)?;
        Ok(self.directory.list_clients_by_company(company_id)?)
    }

    // --- ledger operations ---

    /// Record a purchase against a client's available limit.
    ///
    /// The check-then-insert runs under that client's lock; recordings for
    /// different clients proceed in parallel.
    pub fn record_purchase(
        &self,
        principal: &Principal,
        client_id: ClientId,
        value: Money,
        purchase_date: NaiveDate,
    ) -> Result<Purchase, AppError> {
        let client = self.directory.get_client(client_id)?;
        require_company_access(principal, client.company_id())?;

        let lock = self.client_locks.for_client(client_id)?;
        let _guard = lock
            .lock()
            .map_err(|_| AppError::Internal("client lock poisoned".to_string()))?;

        // Re-read the client and the ledger inside the lock so the gate sees
        // the latest approved limit and every purchase committed before us.
        let client = self.directory.get_client(client_id)?;
        let existing = self
            .directory
            .list_purchases(&PurchaseFilter::ByClient(client_id))?;
        let purchase = match credline_ledger::record_purchase(
            &client,
            &existing,
            value,
            purchase_date,
            Utc::now(),
        ) {
            Ok(purchase) => purchase,
            Err(err) => {
                tracing::warn!(client_id = %client_id, value = %value, "purchase rejected: {err}");
                return Err(err.into());
            }
        };
        self.directory.create_purchase(purchase.clone())?;

        tracing::info!(
            purchase_id = %purchase.id(),
            client_id = %client_id,
            value = %value,
            due_date = %purchase.due_date(),
            "purchase recorded"
        );
        Ok(purchase)
    }

    pub fn set_purchase_status(
        &self,
        principal: &Principal,
        purchase_id: PurchaseId,
        new_status: PurchaseStatus,
    ) -> Result<Purchase, AppError> {
        let mut purchase = self.directory.get_purchase(purchase_id)?;
        let client = self.directory.get_client(purchase.client_id())?;
        require_company_access(principal, client.company_id())?;

        credline_ledger::change_status(&mut purchase, new_status)?;
        self.directory.update_purchase(purchase.clone())?;
        tracing::info!(purchase_id = %purchase_id, status = %new_status, "purchase status changed");
        Ok(purchase)
    }

    /// A client's statement: purchases newest first, optionally filtered by
    /// status, plus the current available limit.
    pub fn client_statement(
        &self,
        principal: &Principal,
        client_id: ClientId,
        status_filter: Option<PurchaseStatus>,
    ) -> Result<ClientStatement, AppError> {
        let client = self.directory.get_client(client_id)?;
        require_company_access(principal, client.company_id())?;

        let all = self
            .directory
            .list_purchases(&PurchaseFilter::ByClient(client_id))?;
        let available_limit = credline_ledger::available_limit(&client, &all);

        let purchases = match status_filter {
            Some(status) => all.into_iter().filter(|p| p.status() == status).collect(),
            None => all,
        };

        Ok(ClientStatement {
            client,
            purchases,
            available_limit,
        })
    }

    // --- dashboards ---

    pub fn company_dashboard(
        &self,
        principal: &Principal,
        company_id: CompanyId,
    ) -> Result<CompanySummary, AppError> {
        require_company_access(principal, company_id)?;
        // Existence check; a dashboard for an unknown company is NotFound.
        self.directory.get_company(company_id)?;

        let clients = self.directory.list_clients_by_company(company_id)?;
        let client_ids: Vec<ClientId> = clients.iter().map(CreditClient::id).collect();
        let purchases = self
            .directory
            .list_purchases(&PurchaseFilter::ByClients(client_ids))?;
        Ok(credline_ledger::company_summary(&clients, &purchases))
    }

    pub fn system_dashboard(&self, principal: &Principal) -> Result<SystemSummary, AppError> {
        require_admin(principal)?;
        let companies = self.directory.list_companies()?;
        let clients = self.directory.list_clients()?;
        let purchases = self.directory.list_all_purchases()?;
        Ok(credline_ledger::system_summary(
            &companies, &clients, &purchases,
        ))
    }
}
