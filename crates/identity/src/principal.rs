use serde::{Deserialize, Serialize};

use credline_core::{CompanyId, DomainError, DomainResult, UserId};

/// Closed role set.
///
/// Roles are a tagged variant, not free-form strings, so an unknown role is
/// unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Admin,
    CompanyOperator,
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Role::Admin => f.write_str("admin"),
            Role::CompanyOperator => f.write_str("company-operator"),
        }
    }
}

/// An authenticated principal.
///
/// Invariant: a `CompanyOperator` is bound to exactly one company; an `Admin`
/// carries no company binding. Enforced by the constructors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    id: UserId,
    email: String,
    name: String,
    role: Role,
    company_id: Option<CompanyId>,
}

impl Principal {
    pub fn admin(id: UserId, email: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role: Role::Admin,
            company_id: None,
        }
    }

    pub fn company_operator(
        id: UserId,
        email: impl Into<String>,
        name: impl Into<String>,
        company_id: CompanyId,
    ) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role: Role::CompanyOperator,
            company_id: Some(company_id),
        }
    }

    /// Validate the role/company binding when rebuilding a principal from
    /// stored parts (e.g. a session record).
    pub fn from_parts(
        id: UserId,
        email: String,
        name: String,
        role: Role,
        company_id: Option<CompanyId>,
    ) -> DomainResult<Self> {
        match (role, company_id) {
            (Role::CompanyOperator, None) => Err(DomainError::invariant(
                "company operator must be bound to a company",
            )),
            (Role::Admin, Some(_)) => Err(DomainError::invariant(
                "admin must not carry a company binding",
            )),
            _ => Ok(Self {
                id,
                email,
                name,
                role,
                company_id,
            }),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The company this principal is scoped to, if any.
    pub fn company_scope(&self) -> Option<CompanyId> {
        self.company_id
    }
}
