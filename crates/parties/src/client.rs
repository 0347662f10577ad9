use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use credline_core::{ClientId, CompanyId, DomainError, DomainResult, Money};

/// Credit client approval lifecycle.
///
/// Starts at `Pending`; the transition to `Approved` happens exactly once via
/// [`CreditClient::approve`] and is irreversible. Re-approving an approved
/// client is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClientStatus {
    Pending,
    Approved,
}

impl core::fmt::Display for ClientStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClientStatus::Pending => f.write_str("pending"),
            ClientStatus::Approved => f.write_str("approved"),
        }
    }
}

/// A credit client sponsored by exactly one company.
///
/// `approved_limit` is the ceiling used by limit accounting. Editing it never
/// retroactively invalidates existing purchases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditClient {
    id: ClientId,
    company_id: CompanyId,
    name: String,
    address: String,
    email: String,
    cpf: String,
    phone: String,
    /// Declared monthly income (informational; not used by accounting).
    income: Money,
    /// The limit requested at registration.
    initial_limit: Money,
    /// The approved spending ceiling.
    approved_limit: Money,
    status: ClientStatus,
    created_at: DateTime<Utc>,
}

/// Input for registering a credit client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub company_id: CompanyId,
    pub name: String,
    pub address: String,
    pub email: String,
    pub cpf: String,
    pub phone: String,
    pub income: Money,
    pub initial_limit: Money,
}

/// Partial profile edit (fields left as `None` keep their current value).
///
/// Status and approved limit have dedicated operations and are deliberately
/// absent here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub income: Option<Money>,
}

impl CreditClient {
    /// Register a new client under a company.
    ///
    /// The client starts `Pending` with its approved limit equal to the
    /// requested initial limit; the limit can be adjusted independently later.
    pub fn register(id: ClientId, input: NewClient, created_at: DateTime<Utc>) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if input.cpf.trim().is_empty() {
            return Err(DomainError::validation("cpf cannot be empty"));
        }
        if input.income.is_negative() {
            return Err(DomainError::validation("declared income cannot be negative"));
        }
        if input.initial_limit.is_negative() {
            return Err(DomainError::validation("initial limit cannot be negative"));
        }

        Ok(Self {
            id,
            company_id: input.company_id,
            name: input.name,
            address: input.address,
            email: input.email,
            cpf: input.cpf,
            phone: input.phone,
            income: input.income,
            initial_limit: input.initial_limit,
            approved_limit: input.initial_limit,
            status: ClientStatus::Pending,
            created_at,
        })
    }

    /// Approve the client for purchasing. Idempotent: approving an already
    /// approved client changes nothing, so UI-triggered retries stay safe.
    pub fn approve(&mut self) {
        self.status = ClientStatus::Approved;
    }

    /// Adjust the approved spending ceiling.
    ///
    /// Lowering the limit below outstanding usage is allowed; availability
    /// simply goes negative and blocks further purchases.
    pub fn set_approved_limit(&mut self, limit: Money) -> DomainResult<()> {
        if limit.is_negative() {
            return Err(DomainError::validation("approved limit cannot be negative"));
        }
        self.approved_limit = limit;
        Ok(())
    }

    /// Apply a partial profile edit. Id, company and creation time are immutable.
    pub fn apply_update(&mut self, update: ClientUpdate) -> DomainResult<()> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
        }
        if let Some(income) = update.income {
            if income.is_negative() {
                return Err(DomainError::validation("declared income cannot be negative"));
            }
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(phone) = update.phone {
            self.phone = phone;
        }
        if let Some(income) = update.income {
            self.income = income;
        }
        Ok(())
    }

    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn company_id(&self) -> CompanyId {
        self.company_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn cpf(&self) -> &str {
        &self.cpf
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn income(&self) -> Money {
        self.income
    }

    pub fn initial_limit(&self) -> Money {
        self.initial_limit
    }

    pub fn approved_limit(&self) -> Money {
        self.approved_limit
    }

    pub fn status(&self) -> ClientStatus {
        self.status
    }

    pub fn is_approved(&self) -> bool {
        self.status == ClientStatus::Approved
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
