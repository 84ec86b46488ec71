//! Checkout orchestration.
//!
//! [`CheckoutService`] runs the whole checkout for one request: discount,
//! charge, ledger row, report, marketing, user upsert, confirmation mail.
//! The steps are a sequence of independent side effects with documented
//! partial-failure semantics, not a transaction.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::services::notify::NotificationSender;
use crate::services::payment::PaymentMethod;
use crate::services::payment_store::PaymentStore;
use crate::services::user_repo::UserRepository;

/// What a successful checkout charged.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutReceipt {
    /// The discounted amount that was charged
    pub charged: f64,
}

/// One checkout request, as seen by the orchestration.
#[derive(Debug, Clone)]
pub struct CheckoutInput {
    pub user_id: String,
    pub amount: f64,
    pub payment_type: String,
    pub send_marketing_email: bool,
}

/// Applies the configured discount: `amount * (100 - percent) / 100`.
pub fn discounted_amount(amount: f64, discount_percent: f64) -> f64 {
    amount * (100.0 - discount_percent) / 100.0
}

/// Orchestrates one checkout across the payment strategy, the payment
/// ledger, the user repository and the notification sender.
#[derive(Clone)]
pub struct CheckoutService {
    users: Arc<dyn UserRepository>,
    payments: Arc<dyn PaymentStore>,
    notifier: Arc<dyn NotificationSender>,
    report_path: PathBuf,
}

impl CheckoutService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        payments: Arc<dyn PaymentStore>,
        notifier: Arc<dyn NotificationSender>,
        report_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            users,
            payments,
            notifier,
            report_path: report_path.into(),
        }
    }

    /// Runs one checkout.
    ///
    /// `discount_percent` is passed explicitly per call; there is no shared
    /// discount state between requests.
    ///
    /// Side effects happen in this order, and later failures never roll back
    /// earlier steps:
    /// 1. reject non-positive amounts (`InvalidAmount`, nothing happened yet)
    /// 2. resolve the payment strategy from the request's tag
    /// 3. apply the discount
    /// 4. charge; a refusal (free trial) aborts with no persistence at all
    /// 5. append the payment to the ledger; failure aborts the remaining steps
    /// 6. write the monthly report - best-effort, logged on failure
    /// 7. queue marketing mail if requested - best-effort, logged on failure
    /// 8. upsert the user record with the derived address; failure surfaces
    ///    as a storage error even though the payment is already recorded
    /// 9. send the confirmation mail - a failure is logged and does not
    ///    demote the success response
    pub async fn checkout(
        &self,
        input: &CheckoutInput,
        discount_percent: f64,
    ) -> AppResult<CheckoutReceipt> {
        if !input.amount.is_finite() || input.amount <= 0.0 {
            return Err(AppError::InvalidAmount(input.amount));
        }

        let strategy = PaymentMethod::from_tag(&input.payment_type).strategy();

        let discounted = discounted_amount(input.amount, discount_percent);

        strategy.process_payment(&input.user_id, discounted).await?;

        self.payments.record(&input.user_id, discounted).await?;

        if let Err(e) = strategy.generate_monthly_report(&self.report_path).await {
            tracing::error!("Monthly report failed after charge: {}", e);
        }

        if input.send_marketing_email {
            if let Err(e) = strategy.send_marketing_emails().await {
                tracing::error!("Marketing mail blast failed: {}", e);
            }
        }

        let user = User::with_derived_email(&input.user_id);
        self.users.save(&user).await?;

        let body = format!("We charged you {}", discounted);
        if let Err(e) = self.notifier.send(&user.email, "Thanks!", &body).await {
            tracing::error!("Confirmation mail to {} failed: {}", user.email, e);
        }

        Ok(CheckoutReceipt {
            charged: discounted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentRecord;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryUsers {
        saved: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUsers {
        async fn save(&self, user: &User) -> AppResult<()> {
            self.saved.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn get_by_id(&self, id: &str) -> AppResult<Option<User>> {
            Ok(self
                .saved
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|u| u.id == id)
                .cloned())
        }
    }

    #[derive(Default)]
    struct InMemoryLedger {
        rows: Mutex<Vec<PaymentRecord>>,
    }

    #[async_trait]
    impl PaymentStore for InMemoryLedger {
        async fn record(&self, user_id: &str, amount: f64) -> AppResult<()> {
            self.rows
                .lock()
                .unwrap()
                .push(PaymentRecord::new(user_id, amount));
            Ok(())
        }
    }

    struct FailingLedger;

    #[async_trait]
    impl PaymentStore for FailingLedger {
        async fn record(&self, _user_id: &str, _amount: f64) -> AppResult<()> {
            Err(AppError::Database(sqlx::Error::PoolClosed))
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    #[async_trait]
    impl NotificationSender for RecordingNotifier {
        async fn send(&self, to: &str, subject: &str, body: &str) -> AppResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    struct FailingNotifier;

    #[async_trait]
    impl NotificationSender for FailingNotifier {
        async fn send(&self, _to: &str, _subject: &str, _body: &str) -> AppResult<()> {
            Err(AppError::Notification("mail relay down".to_string()))
        }
    }

    fn report_path(test: &str) -> PathBuf {
        std::env::temp_dir().join(format!("checkout-{}-{}.csv", test, std::process::id()))
    }

    struct Harness {
        users: Arc<InMemoryUsers>,
        ledger: Arc<InMemoryLedger>,
        notifier: Arc<RecordingNotifier>,
        service: CheckoutService,
        report: PathBuf,
    }

    fn harness(test: &str) -> Harness {
        let users = Arc::new(InMemoryUsers::default());
        let ledger = Arc::new(InMemoryLedger::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let report = report_path(test);
        let service = CheckoutService::new(
            users.clone(),
            ledger.clone(),
            notifier.clone(),
            report.clone(),
        );
        Harness {
            users,
            ledger,
            notifier,
            service,
            report,
        }
    }

    fn input(user_id: &str, amount: f64, payment_type: &str) -> CheckoutInput {
        CheckoutInput {
            user_id: user_id.to_string(),
            amount,
            payment_type: payment_type.to_string(),
            send_marketing_email: false,
        }
    }

    #[test]
    fn test_discounted_amount() {
        assert_eq!(discounted_amount(100.0, 3.0), 97.0);
        assert_eq!(discounted_amount(100.0, 0.0), 100.0);
        assert_eq!(discounted_amount(100.0, 100.0), 0.0);
        assert_eq!(discounted_amount(50.0, 10.0), 45.0);
    }

    #[actix_web::test]
    async fn test_non_positive_amount_rejected_without_side_effects() {
        let h = harness("invalid-amount");

        for amount in [0.0, -1.0, -99.9] {
            let err = h
                .service
                .checkout(&input("u1", amount, "stripe"), 3.0)
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::InvalidAmount(_)));
        }

        assert!(h.ledger.rows.lock().unwrap().is_empty());
        assert!(h.users.saved.lock().unwrap().is_empty());
        assert!(h.notifier.sent.lock().unwrap().is_empty());
        assert!(!h.report.exists());
    }

    #[actix_web::test]
    async fn test_free_trial_checkout_refused_without_side_effects() {
        let h = harness("trial");

        let err = h
            .service
            .checkout(&input("u1", 100.0, "trial"), 3.0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnsupportedOperation(_)));

        assert!(h.ledger.rows.lock().unwrap().is_empty());
        assert!(h.users.saved.lock().unwrap().is_empty());
        assert!(h.notifier.sent.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_stripe_checkout_charges_discounted_amount() {
        let h = harness("stripe");

        let receipt = h
            .service
            .checkout(&input("u42", 100.0, "stripe"), 3.0)
            .await
            .expect("checkout failed");
        assert_eq!(receipt.charged, 97.0);

        let rows = h.ledger.rows.lock().unwrap();
        assert_eq!(rows.as_slice(), &[PaymentRecord::new("u42", 97.0)]);

        let saved = h.users.saved.lock().unwrap();
        assert_eq!(saved.as_slice(), &[User::with_derived_email("u42")]);

        let sent = h.notifier.sent.lock().unwrap();
        assert_eq!(
            sent.as_slice(),
            &[(
                "user+u42@example.com".to_string(),
                "Thanks!".to_string(),
                "We charged you 97".to_string()
            )]
        );

        std::fs::remove_file(&h.report).ok();
    }

    #[actix_web::test]
    async fn test_unrecognized_tag_behaves_like_stripe() {
        let h = harness("fallback");

        let receipt = h
            .service
            .checkout(&input("u7", 100.0, "paypal"), 3.0)
            .await
            .expect("checkout failed");
        assert_eq!(receipt.charged, 97.0);
        assert_eq!(h.ledger.rows.lock().unwrap().len(), 1);

        std::fs::remove_file(&h.report).ok();
    }

    #[actix_web::test]
    async fn test_discount_is_per_call_not_shared() {
        let h = harness("per-call-discount");

        let first = h
            .service
            .checkout(&input("u1", 100.0, "stripe"), 3.0)
            .await
            .unwrap();
        let second = h
            .service
            .checkout(&input("u1", 100.0, "stripe"), 50.0)
            .await
            .unwrap();

        assert_eq!(first.charged, 97.0);
        assert_eq!(second.charged, 50.0);

        std::fs::remove_file(&h.report).ok();
    }

    #[actix_web::test]
    async fn test_repeated_checkout_appends_independent_rows() {
        let h = harness("repeat");

        let req = input("u1", 100.0, "stripe");
        h.service.checkout(&req, 3.0).await.unwrap();
        h.service.checkout(&req, 3.0).await.unwrap();

        let rows = h.ledger.rows.lock().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], rows[1]);

        std::fs::remove_file(&h.report).ok();
    }

    #[actix_web::test]
    async fn test_marketing_flag_does_not_change_outcome() {
        let h = harness("marketing");

        let mut req = input("u1", 100.0, "stripe");
        req.send_marketing_email = true;

        let receipt = h.service.checkout(&req, 3.0).await.unwrap();
        assert_eq!(receipt.charged, 97.0);
        assert_eq!(h.notifier.sent.lock().unwrap().len(), 1);

        std::fs::remove_file(&h.report).ok();
    }

    #[actix_web::test]
    async fn test_ledger_failure_aborts_before_user_upsert() {
        let users = Arc::new(InMemoryUsers::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = CheckoutService::new(
            users.clone(),
            Arc::new(FailingLedger),
            notifier.clone(),
            report_path("ledger-failure"),
        );

        let err = service
            .checkout(&input("u1", 100.0, "stripe"), 3.0)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Database(_)));

        // The charge is not rolled back, but nothing after the ledger ran
        assert!(users.saved.lock().unwrap().is_empty());
        assert!(notifier.sent.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_notification_failure_does_not_demote_success() {
        let users = Arc::new(InMemoryUsers::default());
        let ledger = Arc::new(InMemoryLedger::default());
        let report = report_path("notify-failure");
        let service = CheckoutService::new(
            users.clone(),
            ledger.clone(),
            Arc::new(FailingNotifier),
            report.clone(),
        );

        let receipt = service
            .checkout(&input("u1", 100.0, "stripe"), 3.0)
            .await
            .expect("notification failure must not fail the checkout");
        assert_eq!(receipt.charged, 97.0);
        assert_eq!(ledger.rows.lock().unwrap().len(), 1);
        assert_eq!(users.saved.lock().unwrap().len(), 1);

        std::fs::remove_file(&report).ok();
    }

    #[actix_web::test]
    async fn test_unwritable_report_path_is_best_effort() {
        let users = Arc::new(InMemoryUsers::default());
        let ledger = Arc::new(InMemoryLedger::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let service = CheckoutService::new(
            users.clone(),
            ledger.clone(),
            notifier.clone(),
            "/nonexistent-dir/report.csv",
        );

        let receipt = service
            .checkout(&input("u1", 100.0, "stripe"), 3.0)
            .await
            .expect("report failure must not fail the checkout");
        assert_eq!(receipt.charged, 97.0);
        assert_eq!(users.saved.lock().unwrap().len(), 1);
        assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    }
}
