use std::sync::Arc;

use thiserror::Error;

use credline_core::{ClientId, CompanyId, PurchaseId, UserId};
use credline_ledger::Purchase;
use credline_parties::{Company, CreditClient};

/// Directory store operation error.
///
/// These are infrastructure errors (missing records, storage faults) as
/// opposed to domain errors (validation, invariants).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("{collection} record not found: {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },

    #[error("{collection} record already exists: {id}")]
    AlreadyExists {
        collection: &'static str,
        id: String,
    },

    #[error("storage failure: {0}")]
    Storage(String),
}

impl DirectoryError {
    pub fn not_found(collection: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            collection,
            id: id.to_string(),
        }
    }

    pub fn already_exists(collection: &'static str, id: impl ToString) -> Self {
        Self::AlreadyExists {
            collection,
            id: id.to_string(),
        }
    }
}

/// Filter for purchase listings: by a single client or by a client set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PurchaseFilter {
    ByClient(ClientId),
    ByClients(Vec<ClientId>),
}

impl PurchaseFilter {
    pub fn matches(&self, client_id: ClientId) -> bool {
        match self {
            PurchaseFilter::ByClient(id) => *id == client_id,
            PurchaseFilter::ByClients(ids) => ids.contains(&client_id),
        }
    }
}

/// Persistence boundary for the three record collections.
///
/// Implementations must:
/// - treat records as whole documents (create, point get, filtered list,
///   whole-record update, delete)
/// - return listings ordered by creation time descending (newest first)
/// - reject updates against absent records with `NotFound`
///
/// Retry/backoff for transient backend failures is the implementation's
/// concern; callers never retry.
pub trait DirectoryStore: Send + Sync {
    fn create_company(&self, company: Company) -> Result<(), DirectoryError>;
    fn get_company(&self, id: CompanyId) -> Result<Company, DirectoryError>;
    fn list_companies(&self) -> Result<Vec<Company>, DirectoryError>;
    fn find_company_by_user(&self, user_id: UserId) -> Result<Option<Company>, DirectoryError>;
    fn update_company(&self, company: Company) -> Result<(), DirectoryError>;
    fn delete_company(&self, id: CompanyId) -> Result<(), DirectoryError>;

    fn create_client(&self, client: CreditClient) -> Result<(), DirectoryError>;
    fn get_client(&self, id: ClientId) -> Result<CreditClient, DirectoryError>;
    fn list_clients(&self) -> Result<Vec<CreditClient>, DirectoryError>;
    fn list_clients_by_company(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<CreditClient>, DirectoryError>;
    fn update_client(&self, client: CreditClient) -> Result<(), DirectoryError>;

    fn create_purchase(&self, purchase: Purchase) -> Result<(), DirectoryError>;
    fn get_purchase(&self, id: PurchaseId) -> Result<Purchase, DirectoryError>;
    fn list_purchases(&self, filter: &PurchaseFilter) -> Result<Vec<Purchase>, DirectoryError>;
    fn list_all_purchases(&self) -> Result<Vec<Purchase>, DirectoryError>;
    fn update_purchase(&self, purchase: Purchase) -> Result<(), DirectoryError>;
}

impl<S> DirectoryStore for Arc<S>
where
    S: DirectoryStore + ?Sized,
{
    fn create_company(&self, company: Company) -> Result<(), DirectoryError> {
        (**self).create_company(company)
    }

    fn get_company(&self, id: CompanyId) -> Result<Company, DirectoryError> {
        (**self).get_company(id)
    }

    fn list_companies(&self) -> Result<Vec<Company>, DirectoryError> {
        (**self).list_companies()
    }

    fn find_company_by_user(&self, user_id: UserId) -> Result<Option<Company>, DirectoryError> {
        (**self).find_company_by_user(user_id)
    }

    fn update_company(&self, company: Company) -> Result<(), DirectoryError> {
        (**self).update_company(company)
    }

    fn delete_company(&self, id: CompanyId) -> Result<(), DirectoryError> {
        (**self).delete_company(id)
    }

    fn create_client(&self, client: CreditClient) -> Result<(), DirectoryError> {
        (**self).create_client(client)
    }

    fn get_client(&self, id: ClientId) -> Result<CreditClient, DirectoryError> {
        (**self).get_client(id)
    }

    fn list_clients(&self) -> Result<Vec<CreditClient>, DirectoryError> {
        (**self).list_clients()
    }

    fn list_clients_by_company(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<CreditClient>, DirectoryError> {
        (**self).list_clients_by_company(company_id)
    }

    fn update_client(&self, client: CreditClient) -> Result<(), DirectoryError> {
        (**self).update_client(client)
    }

    fn create_purchase(&self, purchase: Purchase) -> Result<(), DirectoryError> {
        (**self).create_purchase(purchase)
    }

    fn get_purchase(&self, id: PurchaseId) -> Result<Purchase, DirectoryError> {
        (**self).get_purchase(id)
    }

    fn list_purchases(&self, filter: &PurchaseFilter) -> Result<Vec<Purchase>, DirectoryError> {
        (**self).list_purchases(filter)
    }

    fn list_all_purchases(&self) -> Result<Vec<Purchase>, DirectoryError> {
        (**self).list_all_purchases()
    }

    fn update_purchase(&self, purchase: Purchase) -> Result<(), DirectoryError> {
        (**self).update_purchase(purchase)
    }
}
