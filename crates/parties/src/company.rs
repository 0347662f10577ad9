use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use credline_core::{CompanyId, DomainError, DomainResult, UserId};

/// Contact information for a company role (owner, financial).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub phone: String,
    pub email: String,
}

/// A registered company: the tenant boundary of the system.
///
/// Companies are created and edited by admin actions. The engine never deletes
/// a company; delete is a direct store operation. A company may exist with
/// zero clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    id: CompanyId,
    tax_id: String,
    name: String,
    address: String,
    owner_contact: Contact,
    financial_contact: Contact,
    /// Agreed fee percentage (0..=100). Used for reporting only; it never
    /// participates in limit accounting.
    agreed_fee_percent: Decimal,
    /// The operator account this company is bound to.
    user_id: UserId,
    created_at: DateTime<Utc>,
}

/// Input for registering a company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompany {
    pub tax_id: String,
    pub name: String,
    pub address: String,
    pub owner_contact: Contact,
    pub financial_contact: Contact,
    pub agreed_fee_percent: Decimal,
    pub user_id: UserId,
}

/// Partial company edit (fields left as `None` keep their current value).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub owner_contact: Option<Contact>,
    pub financial_contact: Option<Contact>,
    pub agreed_fee_percent: Option<Decimal>,
}

impl Company {
    /// Register a new company.
    pub fn register(id: CompanyId, input: NewCompany, created_at: DateTime<Utc>) -> DomainResult<Self> {
        if input.tax_id.trim().is_empty() {
            return Err(DomainError::validation("tax id cannot be empty"));
        }
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        validate_fee_percent(input.agreed_fee_percent)?;

        Ok(Self {
            id,
            tax_id: input.tax_id,
            name: input.name,
            address: input.address,
            owner_contact: input.owner_contact,
            financial_contact: input.financial_contact,
            agreed_fee_percent: input.agreed_fee_percent,
            user_id: input.user_id,
            created_at,
        })
    }

    /// Apply a partial edit. The id, owning user and creation time are immutable.
    pub fn apply_update(&mut self, update: CompanyUpdate) -> DomainResult<()> {
        if let Some(name) = &update.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
        }
        if let Some(fee) = update.agreed_fee_percent {
            validate_fee_percent(fee)?;
        }

        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(address) = update.address {
            self.address = address;
        }
        if let Some(contact) = update.owner_contact {
            self.owner_contact = contact;
        }
        if let Some(contact) = update.financial_contact {
            self.financial_contact = contact;
        }
        if let Some(fee) = update.agreed_fee_percent {
            self.agreed_fee_percent = fee;
        }
        Ok(())
    }

    pub fn id(&self) -> CompanyId {
        self.id
    }

    pub fn tax_id(&self) -> &str {
        &self.tax_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn owner_contact(&self) -> &Contact {
        &self.owner_contact
    }

    pub fn financial_contact(&self) -> &Contact {
        &self.financial_contact
    }

    pub fn agreed_fee_percent(&self) -> Decimal {
        self.agreed_fee_percent
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

fn validate_fee_percent(fee: Decimal) -> DomainResult<()> {
    if fee < Decimal::ZERO || fee > Decimal::from(100) {
        return Err(DomainError::validation(format!(
            "agreed fee percentage must be between 0 and 100 (got {fee})"
        )));
    }
    Ok(())
}
