use std::collections::HashMap;
use std::sync::RwLock;

use credline_core::{ClientId, CompanyId, PurchaseId, UserId};
use credline_ledger::Purchase;
use credline_parties::{Company, CreditClient};

use crate::store::{DirectoryError, DirectoryStore, PurchaseFilter};

const COMPANIES: &str = "companies";
const CLIENTS: &str = "credit_clients";
const PURCHASES: &str = "purchases";

/// In-memory directory store.
///
/// A first-class backend for tests, dev and demos, selected explicitly by
/// configuration. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    companies: RwLock<HashMap<CompanyId, Company>>,
    clients: RwLock<HashMap<ClientId, CreditClient>>,
    purchases: RwLock<HashMap<PurchaseId, Purchase>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(_: impl core::fmt::Debug) -> DirectoryError {
    DirectoryError::Storage("lock poisoned".to_string())
}

/// Newest first; UUIDv7 ids break creation-time ties deterministically.
fn sort_newest_first<T>(records: &mut [T], created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>, id: impl Fn(&T) -> uuid::Uuid) {
    records.sort_by(|a, b| {
        created_at(b)
            .cmp(&created_at(a))
            .then_with(|| id(b).cmp(&id(a)))
    });
}

impl DirectoryStore for InMemoryDirectory {
    fn create_company(&self, company: Company) -> Result<(), DirectoryError> {
        let mut companies = self.companies.write().map_err(poisoned)?;
        if companies.contains_key(&company.id()) {
            return Err(DirectoryError::already_exists(COMPANIES, company.id()));
        }
        companies.insert(company.id(), company);
        Ok(())
    }

    fn get_company(&self, id: CompanyId) -> Result<Company, DirectoryError> {
        let companies = self.companies.read().map_err(poisoned)?;
        companies
            .get(&id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found(COMPANIES, id))
    }

    fn list_companies(&self) -> Result<Vec<Company>, DirectoryError> {
        let companies = self.companies.read().map_err(poisoned)?;
        let mut all: Vec<Company> = companies.values().cloned().collect();
        sort_newest_first(&mut all, Company::created_at, |c| *c.id().as_uuid());
        Ok(all)
    }

    fn find_company_by_user(&self, user_id: UserId) -> Result<Option<Company>, DirectoryError> {
        let companies = self.companies.read().map_err(poisoned)?;
        // Should a user end up bound to several companies, resolve to the
        // newest one, with the same ordering the listings use.
        let mut matching: Vec<Company> = companies
            .values()
            .filter(|c| c.user_id() == user_id)
            .cloned()
            .collect();
        sort_newest_first(&mut matching, Company::created_at, |c| *c.id().as_uuid());
        Ok(matching.into_iter().next())
    }

    fn update_company(&self, company: Company) -> Result<(), DirectoryError> {
        let mut companies = self.companies.write().map_err(poisoned)?;
        if !companies.contains_key(&company.id()) {
            return Err(DirectoryError::not_found(COMPANIES, company.id()));
        }
        companies.insert(company.id(), company);
        Ok(())
    }

    fn delete_company(&self, id: CompanyId) -> Result<(), DirectoryError> {
        let mut companies = self.companies.write().map_err(poisoned)?;
        companies
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DirectoryError::not_found(COMPANIES, id))
    }

    fn create_client(&self, client: CreditClient) -> Result<(), DirectoryError> {
        let mut clients = self.clients.write().map_err(poisoned)?;
        if clients.contains_key(&client.id()) {
            return Err(DirectoryError::already_exists(CLIENTS, client.id()));
        }
        clients.insert(client.id(), client);
        Ok(())
    }

    fn get_client(&self, id: ClientId) -> Result<CreditClient, DirectoryError> {
        let clients = self.clients.read().map_err(poisoned)?;
        clients
            .get(&id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found(CLIENTS, id))
    }

    fn list_clients(&self) -> Result<Vec<CreditClient>, DirectoryError> {
        let clients = self.clients.read().map_err(poisoned)?;
        let mut all: Vec<CreditClient> = clients.values().cloned().collect();
        sort_newest_first(&mut all, CreditClient::created_at, |c| *c.id().as_uuid());
        Ok(all)
    }

    fn list_clients_by_company(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<CreditClient>, DirectoryError> {
        let clients = self.clients.read().map_err(poisoned)?;
        let mut matching: Vec<CreditClient> = clients
            .values()
            .filter(|c| c.company_id() == company_id)
            .cloned()
            .collect();
        sort_newest_first(&mut matching, CreditClient::created_at, |c| *c.id().as_uuid());
        Ok(matching)
    }

    fn update_client(&self, client: CreditClient) -> Result<(), DirectoryError> {
        let mut clients = self.clients.write().map_err(poisoned)?;
        if !clients.contains_key(&client.id()) {
            return Err(DirectoryError::not_found(CLIENTS, client.id()));
        }
        clients.insert(client.id(), client);
        Ok(())
    }

    fn create_purchase(&self, purchase: Purchase) -> Result<(), DirectoryError> {
        let mut purchases = self.purchases.write().map_err(poisoned)?;
        if purchases.contains_key(&purchase.id()) {
            return Err(DirectoryError::already_exists(PURCHASES, purchase.id()));
        }
        purchases.insert(purchase.id(), purchase);
        Ok(())
    }

    fn get_purchase(&self, id: PurchaseId) -> Result<Purchase, DirectoryError> {
        let purchases = self.purchases.read().map_err(poisoned)?;
        purchases
            .get(&id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found(PURCHASES, id))
    }

    fn list_purchases(&self, filter: &PurchaseFilter) -> Result<Vec<Purchase>, DirectoryError> {
        let purchases = self.purchases.read().map_err(poisoned)?;
        let mut matching: Vec<Purchase> = purchases
            .values()
            .filter(|p| filter.matches(p.client_id()))
            .cloned()
            .collect();
        sort_newest_first(&mut matching, Purchase::created_at, |p| *p.id().as_uuid());
        Ok(matching)
    }

    fn list_all_purchases(&self) -> Result<Vec<Purchase>, DirectoryError> {
        let purchases = self.purchases.read().map_err(poisoned)?;
        let mut all: Vec<Purchase> = purchases.values().cloned().collect();
        sort_newest_first(&mut all, Purchase::created_at, |p| *p.id().as_uuid());
        Ok(all)
    }

    fn update_purchase(&self, purchase: Purchase) -> Result<(), DirectoryError> {
        let mut purchases = self.purchases.write().map_err(poisoned)?;
        if !purchases.contains_key(&purchase.id()) {
            return Err(DirectoryError::not_found(PURCHASES, purchase.id()));
        }
        purchases.insert(purchase.id(), purchase);
        Ok(())
    }
}
