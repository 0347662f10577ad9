//! Pure authorization checks.
//!
//! No IO, no panics, no business logic: each function answers whether a
//! principal may perform a class of action.

use thiserror::Error;

use credline_core::CompanyId;

use crate::principal::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: administrator role required")]
    AdminRequired,

    #[error("forbidden: principal is not bound to company {0}")]
    CompanyMismatch(CompanyId),
}

/// Admin-only operations (company registry, system dashboard).
pub fn require_admin(principal: &Principal) -> Result<(), AuthzError> {
    if principal.is_admin() {
        Ok(())
    } else {
        Err(AuthzError::AdminRequired)
    }
}

/// Company-scoped operations: admins pass; operators must be bound to the
/// target company.
pub fn require_company_access(
    principal: &Principal,
    company_id: CompanyId,
) -> Result<(), AuthzError> {
    if principal.is_admin() || principal.company_scope() == Some(company_id) {
        Ok(())
    } else {
        Err(AuthzError::CompanyMismatch(company_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use credline_core::UserId;

    #[test]
    fn admin_passes_everything() {
        let admin = Principal::admin(UserId::new(), "a@x.com", "A");
        assert!(require_admin(&admin).is_ok());
        assert!(require_company_access(&admin, CompanyId::new()).is_ok());
    }

    #[test]
    fn operator_is_scoped_to_its_company() {
        let own = CompanyId::new();
        let other = CompanyId::new();
        let op = Principal::company_operator(UserId::new(), "op@x.com", "Op", own);

        assert_eq!(require_admin(&op), Err(AuthzError::AdminRequired));
        assert!(require_company_access(&op, own).is_ok());
        assert_eq!(
            require_company_access(&op, other),
            Err(AuthzError::CompanyMismatch(other))
        );
    }
}
