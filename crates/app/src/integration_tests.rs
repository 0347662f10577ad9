//! Full-stack tests over the in-memory backends.
//!
//! Exercise the path UI code would take: authenticated principal → service
//! operation → directory store → ledger engine, verifying authorization
//! scoping, the limit cycle and recording under contention.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::thread;
    use std::time::Duration;

    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use credline_core::{ClientId, CompanyId, Money, PurchaseId, UserId};
    use credline_directory::{
        DirectoryError, DirectoryStore, InMemoryDirectory, PurchaseFilter,
    };
    use credline_identity::{AuthzError, Principal};
    use credline_ledger::{LedgerError, Purchase, PurchaseStatus};
    use credline_parties::{Company, Contact, CreditClient, NewClient, NewCompany};

    use crate::error::AppError;
    use crate::service::CreditService;

    fn admin() -> Principal {
        Principal::admin(UserId::new(), "admin@credline.test", "Admin")
    }

    fn service() -> CreditService {
        CreditService::new(Arc::new(InMemoryDirectory::new()))
    }

    fn contact() -> Contact {
        Contact {
            phone: "+55 11 98888-0000".to_string(),
            email: "contact@acme.test".to_string(),
        }
    }

    fn company_input(user_id: UserId) -> NewCompany {
        NewCompany {
            tax_id: "12.345.678/0001-90".to_string(),
            name: "Acme Retail Ltda".to_string(),
            address: "Rua Comercial, 123".to_string(),
            owner_contact: contact(),
            financial_contact: contact(),
            agreed_fee_percent: Decimal::new(25, 1),
            user_id,
        }
    }

    /// Register a company and return it with its operator principal.
    fn company_with_operator(
        service: &CreditService,
        admin: &Principal,
    ) -> (Company, Principal) {
        let user_id = UserId::new();
        let company = service
            .register_company(admin, company_input(user_id))
            .unwrap();
        let operator =
            Principal::company_operator(user_id, "op@acme.test", "Operator", company.id());
        (company, operator)
    }

    fn client_input(company_id: CompanyId, initial_limit: i64) -> NewClient {
        NewClient {
            company_id,
            name: "Joana Lima".to_string(),
            address: "Rua das Flores, 123".to_string(),
            email: "joana@example.com".to_string(),
            cpf: "123.456.789-00".to_string(),
            phone: "(11) 99999-9999".to_string(),
            income: Money::from(5000),
            initial_limit: Money::from(initial_limit),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn end_to_end_limit_cycle() {
        let service = service();
        let admin = admin();
        let (company, operator) = company_with_operator(&service, &admin);

        let client = service
            .register_client(&operator, client_input(company.id(), 1000))
            .unwrap();
        let client = service.approve_client(&operator, client.id()).unwrap();
        assert!(client.is_approved());

        let p1 = service
            .record_purchase(&operator, client.id(), Money::from(400), date(2024, 1, 15))
            .unwrap();
        assert_eq!(p1.due_date(), date(2024, 2, 14));

        let statement = service
            .client_statement(&operator, client.id(), None)
            .unwrap();
        assert_eq!(statement.available_limit, Money::from(600));

        let err = service
            .record_purchase(&operator, client.id(), Money::from(700), date(2024, 1, 16))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::LimitExceeded { .. })
        ));

        service
            .set_purchase_status(&operator, p1.id(), PurchaseStatus::Paid)
            .unwrap();
        let statement = service
            .client_statement(&operator, client.id(), None)
            .unwrap();
        assert_eq!(statement.available_limit, Money::from(1000));

        // With the 400 settled, the full limit is spendable again.
        service
            .record_purchase(&operator, client.id(), Money::from(1000), date(2024, 1, 20))
            .unwrap();
    }

    #[test]
    fn pending_client_cannot_purchase() {
        let service = service();
        let admin = admin();
        let (company, operator) = company_with_operator(&service, &admin);

        let client = service
            .register_client(&operator, client_input(company.id(), 1000))
            .unwrap();

        let err = service
            .record_purchase(&operator, client.id(), Money::from(10), date(2024, 1, 15))
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::ClientNotApproved { .. })
        ));
    }

    #[test]
    fn operator_is_fenced_into_its_own_company() {
        let service = service();
        let admin = admin();
        let (_company_a, operator_a) = company_with_operator(&service, &admin);
        let (company_b, operator_b) = company_with_operator(&service, &admin);

        let foreign_client = service
            .register_client(&operator_b, client_input(company_b.id(), 500))
            .unwrap();

        let err = service
            .list_clients(&operator_a, company_b.id())
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Authz(AuthzError::CompanyMismatch(_))
        ));

        let err = service
            .approve_client(&operator_a, foreign_client.id())
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Authz(AuthzError::CompanyMismatch(_))
        ));

        let err = service.system_dashboard(&operator_a).unwrap_err();
        assert!(matches!(err, AppError::Authz(AuthzError::AdminRequired)));
    }

    #[test]
    fn company_registry_is_admin_only() {
        let service = service();
        let admin = admin();
        let (company, operator) = company_with_operator(&service, &admin);

        let err = service
            .register_company(&operator, company_input(UserId::new()))
            .unwrap_err();
        assert!(matches!(err, AppError::Authz(AuthzError::AdminRequired)));

        let err = service.list_companies(&operator).unwrap_err();
        assert!(matches!(err, AppError::Authz(AuthzError::AdminRequired)));

        // The operator still resolves its own company by account binding.
        let resolved = service.company_for_operator(&operator).unwrap().unwrap();
        assert_eq!(resolved.id(), company.id());
    }

    #[test]
    fn statement_filter_does_not_change_availability() {
        let service = service();
        let admin = admin();
        let (company, operator) = company_with_operator(&service, &admin);

        let client = service
            .register_client(&operator, client_input(company.id(), 2000))
            .unwrap();
        service.approve_client(&operator, client.id()).unwrap();

        let p1 = service
            .record_purchase(&operator, client.id(), Money::from(300), date(2024, 1, 10))
            .unwrap();
        thread::sleep(Duration::from_millis(2));
        let p2 = service
            .record_purchase(&operator, client.id(), Money::from(500), date(2024, 1, 12))
            .unwrap();
        service
            .set_purchase_status(&operator, p1.id(), PurchaseStatus::Paid)
            .unwrap();

        let paid_only = service
            .client_statement(&operator, client.id(), Some(PurchaseStatus::Paid))
            .unwrap();
        assert_eq!(paid_only.purchases.len(), 1);
        assert_eq!(paid_only.purchases[0].id(), p1.id());
        // Availability reflects the full ledger, not the filtered listing.
        assert_eq!(paid_only.available_limit, Money::from(1500));

        let full = service
            .client_statement(&operator, client.id(), None)
            .unwrap();
        assert_eq!(full.purchases.len(), 2);
        // Newest first.
        assert_eq!(full.purchases[0].id(), p2.id());
    }

    #[test]
    fn dashboards_aggregate_per_company_and_system_wide() {
        let service = service();
        let admin = admin();
        let (company_a, operator_a) = company_with_operator(&service, &admin);
        let (company_b, operator_b) = company_with_operator(&service, &admin);

        let client_a = service
            .register_client(&operator_a, client_input(company_a.id(), 1000))
            .unwrap();
        service.approve_client(&operator_a, client_a.id()).unwrap();
        service
            .record_purchase(&operator_a, client_a.id(), Money::from(400), date(2024, 1, 15))
            .unwrap();

        // Pending client in company B contributes nothing to granted limit.
        service
            .register_client(&operator_b, client_input(company_b.id(), 9999))
            .unwrap();

        let dash_a = service
            .company_dashboard(&operator_a, company_a.id())
            .unwrap();
        assert_eq!(dash_a.total_clients, 1);
        assert_eq!(dash_a.approved_clients, 1);
        assert_eq!(dash_a.outstanding_receivable, Money::from(400));
        assert_eq!(dash_a.granted_limit, Money::from(1000));
        assert_eq!(dash_a.overdue_purchases, 0);

        let system = service.system_dashboard(&admin).unwrap();
        assert_eq!(system.companies, 2);
        assert_eq!(system.clients, 2);
        assert_eq!(system.outstanding_receivable, Money::from(400));
        assert_eq!(system.granted_limit, Money::from(1000));
    }

    #[test]
    fn status_changes_follow_the_transition_table() {
        let service = service();
        let admin = admin();
        let (company, operator) = company_with_operator(&service, &admin);

        let client = service
            .register_client(&operator, client_input(company.id(), 1000))
            .unwrap();
        service.approve_client(&operator, client.id()).unwrap();
        let purchase = service
            .record_purchase(&operator, client.id(), Money::from(100), date(2024, 1, 15))
            .unwrap();

        service
            .set_purchase_status(&operator, purchase.id(), PurchaseStatus::Overdue)
            .unwrap();
        service
            .set_purchase_status(&operator, purchase.id(), PurchaseStatus::Paid)
            .unwrap();

        let err = service
            .set_purchase_status(&operator, purchase.id(), PurchaseStatus::Active)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Ledger(LedgerError::IllegalTransition { .. })
        ));
    }

    #[test]
    fn unknown_client_is_a_directory_not_found() {
        let service = service();
        let err = service
            .client_statement(&admin(), ClientId::new(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Directory(DirectoryError::NotFound { .. })
        ));
    }

    /// Directory wrapper that commits a queued limit edit right before the
    /// second client read after [`arm`](Self::arm), mimicking an edit landing
    /// between authorization and the recording lock.
    struct LimitEditInterleaver {
        inner: InMemoryDirectory,
        queued_limit: Mutex<Option<Money>>,
        client_reads: AtomicUsize,
    }

    impl LimitEditInterleaver {
        fn new() -> Self {
            Self {
                inner: InMemoryDirectory::new(),
                queued_limit: Mutex::new(None),
                client_reads: AtomicUsize::new(0),
            }
        }

        fn arm(&self, limit: Money) {
            *self.queued_limit.lock().unwrap() = Some(limit);
            self.client_reads.store(0, Ordering::SeqCst);
        }
    }

    impl DirectoryStore for LimitEditInterleaver {
        fn create_company(&self, company: Company) -> Result<(), DirectoryError> {
            self.inner.create_company(company)
        }

        fn get_company(&self, id: CompanyId) -> Result<Company, DirectoryError> {
            self.inner.get_company(id)
        }

        fn list_companies(&self) -> Result<Vec<Company>, DirectoryError> {
            self.inner.list_companies()
        }

        fn find_company_by_user(
            &self,
            user_id: UserId,
        ) -> Result<Option<Company>, DirectoryError> {
            self.inner.find_company_by_user(user_id)
        }

        fn update_company(&self, company: Company) -> Result<(), DirectoryError> {
            self.inner.update_company(company)
        }

        fn delete_company(&self, id: CompanyId) -> Result<(), DirectoryError> {
            self.inner.delete_company(id)
        }

        fn create_client(&self, client: CreditClient) -> Result<(), DirectoryError> {
            self.inner.create_client(client)
        }

        fn get_client(&self, id: ClientId) -> Result<CreditClient, DirectoryError> {
            if self.client_reads.fetch_add(1, Ordering::SeqCst) == 1 {
                if let Some(limit) = self.queued_limit.lock().unwrap().take() {
                    let mut client = self.inner.get_client(id)?;
                    client.set_approved_limit(limit).unwrap();
                    self.inner.update_client(client)?;
                }
            }
            self.inner.get_client(id)
        }

        fn list_clients(&self) -> Result<Vec<CreditClient>, DirectoryError> {
            self.inner.list_clients()
        }

        fn list_clients_by_company(
            &self,
            company_id: CompanyId,
        ) -> Result<Vec<CreditClient>, DirectoryError> {
            self.inner.list_clients_by_company(company_id)
        }

        fn update_client(&self, client: CreditClient) -> Result<(), DirectoryError> {
            self.inner.update_client(client)
        }

        fn create_purchase(&self, purchase: Purchase) -> Result<(), DirectoryError> {
            self.inner.create_purchase(purchase)
        }

        fn get_purchase(&self, id: PurchaseId) -> Result<Purchase, DirectoryError> {
            self.inner.get_purchase(id)
        }

        fn list_purchases(
            &self,
            filter: &PurchaseFilter,
        ) -> Result<Vec<Purchase>, DirectoryError> {
            self.inner.list_purchases(filter)
        }

        fn list_all_purchases(&self) -> Result<Vec<Purchase>, DirectoryError> {
            self.inner.list_all_purchases()
        }

        fn update_purchase(&self, purchase: Purchase) -> Result<(), DirectoryError> {
            self.inner.update_purchase(purchase)
        }
    }

    #[test]
    fn limit_edit_landing_before_the_lock_is_honored() {
        let store = Arc::new(LimitEditInterleaver::new());
        let service = CreditService::new(store.clone());
        let admin = admin();
        let (company, operator) = company_with_operator(&service, &admin);

        let client = service
            .register_client(&operator, client_input(company.id(), 1000))
            .unwrap();
        service.approve_client(&operator, client.id()).unwrap();

        // The edit commits after the authorization read but before the gate
        // re-reads under the lock; the gate must see 100, not 1000.
        store.arm(Money::from(100));
        let err = service
            .record_purchase(&operator, client.id(), Money::from(500), date(2024, 1, 15))
            .unwrap_err();
        match err {
            AppError::Ledger(LedgerError::LimitExceeded {
                approved_limit,
                available,
                attempted,
                ..
            }) => {
                assert_eq!(approved_limit, Money::from(100));
                assert_eq!(available, Money::from(100));
                assert_eq!(attempted, Money::from(500));
            }
            other => panic!("expected LimitExceeded, got {other:?}"),
        }

        // Within the lowered limit, recording proceeds normally.
        service
            .record_purchase(&operator, client.id(), Money::from(100), date(2024, 1, 15))
            .unwrap();
    }

    #[test]
    fn statement_serializes_with_decimal_strings_and_iso_dates() {
        let service = service();
        let admin = admin();
        let (company, operator) = company_with_operator(&service, &admin);

        let client = service
            .register_client(&operator, client_input(company.id(), 1000))
            .unwrap();
        service.approve_client(&operator, client.id()).unwrap();
        service
            .record_purchase(&operator, client.id(), Money::from(400), date(2024, 1, 15))
            .unwrap();

        let statement = service
            .client_statement(&operator, client.id(), None)
            .unwrap();
        let json = serde_json::to_value(&statement).unwrap();
        assert_eq!(json["available_limit"], "600");
        assert_eq!(json["client"]["status"], "approved");
        assert_eq!(json["purchases"][0]["value"], "400");
        assert_eq!(json["purchases"][0]["purchase_date"], "2024-01-15");
        assert_eq!(json["purchases"][0]["due_date"], "2024-02-14");
    }

    #[test]
    fn concurrent_recordings_cannot_overdraw() {
        let service = Arc::new(service());
        let admin = admin();
        let (company, operator) = company_with_operator(&service, &admin);

        let client = service
            .register_client(&operator, client_input(company.id(), 1000))
            .unwrap();
        service.approve_client(&operator, client.id()).unwrap();
        let client_id = client.id();

        // Two 700-unit purchases against a 1000 limit: at most one may land.
        let handles: Vec<_> = (0..2)
            .map(|_| {
                let service = Arc::clone(&service);
                let operator = operator.clone();
                thread::spawn(move || {
                    service.record_purchase(
                        &operator,
                        client_id,
                        Money::from(700),
                        date(2024, 1, 15),
                    )
                })
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();

        let accepted = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(accepted, 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(AppError::Ledger(LedgerError::LimitExceeded { .. }))
        )));

        let statement = service
            .client_statement(&operator, client_id, None)
            .unwrap();
        assert_eq!(statement.available_limit, Money::from(300));
        assert!(!statement.available_limit.is_negative());
    }
}
