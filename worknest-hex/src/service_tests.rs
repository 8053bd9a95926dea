//! OtpService and CheckoutService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};

    use worknest_types::{
        AppError, CreateOrderRequest, GatewayError, GatewayOrder, GatewayOrderRequest, Mailer,
        MailerError, OtpCode, OtpId, OtpPurpose, OtpRepository, PaymentGateway, RepoError,
        SendOtpRequest, VerifyOtpRequest,
    };

    use crate::{CheckoutService, OtpService};

    /// Simple in-memory OTP store for testing the service layer.
    #[derive(Clone, Default)]
    pub struct MockRepo {
        codes: Arc<Mutex<Vec<OtpCode>>>,
    }

    impl MockRepo {
        pub fn new() -> Self {
            Self::default()
        }

        fn stored(&self) -> Vec<OtpCode> {
            self.codes.lock().unwrap().clone()
        }

        fn push(&self, code: OtpCode) {
            self.codes.lock().unwrap().push(code);
        }
    }

    #[async_trait]
    impl OtpRepository for MockRepo {
        async fn insert_code(&self, code: &OtpCode) -> Result<(), RepoError> {
            self.codes.lock().unwrap().push(code.clone());
            Ok(())
        }

        async fn invalidate_codes(
            &self,
            email: &str,
            purpose: OtpPurpose,
        ) -> Result<u64, RepoError> {
            let mut codes = self.codes.lock().unwrap();
            let mut superseded = 0;
            for c in codes
                .iter_mut()
                .filter(|c| c.email == email && c.purpose == purpose && !c.used)
            {
                c.used = true;
                superseded += 1;
            }
            Ok(superseded)
        }

        async fn find_valid_code(
            &self,
            email: &str,
            code: &str,
            purpose: OtpPurpose,
            now: DateTime<Utc>,
        ) -> Result<Option<OtpCode>, RepoError> {
            let codes = self.codes.lock().unwrap();
            Ok(codes
                .iter()
                .filter(|c| {
                    c.email == email
                        && c.code == code
                        && c.purpose == purpose
                        && !c.used
                        && c.expires_at >= now
                })
                .max_by_key(|c| c.created_at)
                .cloned())
        }

        async fn mark_used(&self, id: OtpId) -> Result<bool, RepoError> {
            let mut codes = self.codes.lock().unwrap();
            match codes.iter_mut().find(|c| c.id == id && !c.used) {
                Some(c) => {
                    c.used = true;
                    Ok(true)
                }
                None => Ok(false),
            }
        }
    }

    /// Mailer that records sends and can be told to fail.
    #[derive(Clone, Default)]
    pub struct MockMailer {
        sent: Arc<Mutex<Vec<(String, String, String)>>>,
        fail: bool,
    }

    impl MockMailer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn sent(&self) -> Vec<(String, String, String)> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Mailer for MockMailer {
        async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
            if self.fail {
                return Err(MailerError::Transport("connection refused".into()));
            }
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    /// Gateway that records requests and echoes a fixed order.
    #[derive(Clone, Default)]
    pub struct MockGateway {
        orders: Arc<Mutex<Vec<GatewayOrderRequest>>>,
        reject: Option<(u16, String)>,
    }

    impl MockGateway {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn rejecting(status: u16, body: &str) -> Self {
            Self {
                reject: Some((status, body.to_string())),
                ..Self::default()
            }
        }

        fn requests(&self) -> Vec<GatewayOrderRequest> {
            self.orders.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PaymentGateway for MockGateway {
        fn key_id(&self) -> &str {
            "rzp_test_mock"
        }

        async fn create_order(
            &self,
            req: GatewayOrderRequest,
        ) -> Result<GatewayOrder, GatewayError> {
            if let Some((status, body)) = &self.reject {
                return Err(GatewayError::Rejected {
                    status: *status,
                    body: body.clone(),
                });
            }
            self.orders.lock().unwrap().push(req.clone());
            Ok(GatewayOrder {
                order_id: "order_mock_1".to_string(),
                amount: req.amount,
                currency: req.currency,
            })
        }
    }

    fn send_request(email: &str, purpose: OtpPurpose) -> SendOtpRequest {
        SendOtpRequest {
            email: email.to_string(),
            purpose: Some(purpose),
        }
    }

    fn verify_request(email: &str, code: &str, purpose: OtpPurpose) -> VerifyOtpRequest {
        VerifyOtpRequest {
            email: email.to_string(),
            code: code.to_string(),
            purpose: Some(purpose),
        }
    }

    fn order_request(amount: Option<f64>) -> CreateOrderRequest {
        CreateOrderRequest {
            amount,
            currency: "INR".to_string(),
            receipt: None,
            notes: HashMap::new(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // OTP issuance
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_issue_writes_code_and_sends_email() {
        let repo = MockRepo::new();
        let mailer = MockMailer::new();
        let service = OtpService::new(repo.clone(), mailer.clone());

        service
            .issue_code(send_request("user@example.com", OtpPurpose::Verification))
            .await
            .unwrap();

        let stored = repo.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].email, "user@example.com");

        let sent = mailer.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "user@example.com");
        assert!(sent[0].2.contains(&stored[0].code));
        assert!(sent[0].2.contains("10 minutes"));
    }

    #[tokio::test]
    async fn test_issue_purpose_specific_subjects() {
        let repo = MockRepo::new();
        let mailer = MockMailer::new();
        let service = OtpService::new(repo, mailer.clone());

        service
            .issue_code(send_request("user@example.com", OtpPurpose::Verification))
            .await
            .unwrap();
        service
            .issue_code(send_request("user@example.com", OtpPurpose::PasswordReset))
            .await
            .unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_ne!(sent[0].1, sent[1].1);
    }

    #[tokio::test]
    async fn test_issue_malformed_email_performs_no_io() {
        let repo = MockRepo::new();
        let mailer = MockMailer::new();
        let service = OtpService::new(repo.clone(), mailer.clone());

        for email in ["", "user", "user@example", "user @example.com"] {
            let result = service
                .issue_code(send_request(email, OtpPurpose::Verification))
                .await;
            assert!(matches!(result, Err(AppError::BadRequest(_))), "{email}");
        }

        assert!(repo.stored().is_empty());
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn test_issue_missing_purpose_rejected() {
        let service = OtpService::new(MockRepo::new(), MockMailer::new());

        let result = service
            .issue_code(SendOtpRequest {
                email: "user@example.com".to_string(),
                purpose: None,
            })
            .await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[tokio::test]
    async fn test_issue_supersedes_previous_codes() {
        let repo = MockRepo::new();
        let service = OtpService::new(repo.clone(), MockMailer::new());

        service
            .issue_code(send_request("user@example.com", OtpPurpose::Verification))
            .await
            .unwrap();
        let first_code = repo.stored()[0].code.clone();

        service
            .issue_code(send_request("user@example.com", OtpPurpose::Verification))
            .await
            .unwrap();

        // The first code must no longer verify, even inside its window.
        let result = service
            .verify_code(verify_request(
                "user@example.com",
                &first_code,
                OtpPurpose::Verification,
            ))
            .await;
        // Edge case: the second draw can repeat the first code, in which
        // case the fresh row legitimately matches.
        let second_code = repo.stored()[1].code.clone();
        if first_code == second_code {
            assert!(result.is_ok());
        } else {
            assert!(matches!(result, Err(AppError::InvalidOtp)));
        }
    }

    #[tokio::test]
    async fn test_issue_delivery_failure_keeps_code_usable() {
        let repo = MockRepo::new();
        let service = OtpService::new(repo.clone(), MockMailer::failing());

        let result = service
            .issue_code(send_request("user@example.com", OtpPurpose::PasswordReset))
            .await;
        assert!(matches!(result, Err(AppError::Delivery(_))));

        // The row was written before the send and is not rolled back.
        let stored = repo.stored();
        assert_eq!(stored.len(), 1);

        let verify = service
            .verify_code(verify_request(
                "user@example.com",
                &stored[0].code,
                OtpPurpose::PasswordReset,
            ))
            .await;
        assert!(verify.is_ok());
    }

    // ─────────────────────────────────────────────────────────────────────────
    // OTP verification
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_verify_succeeds_exactly_once() {
        let repo = MockRepo::new();
        let service = OtpService::new(repo.clone(), MockMailer::new());

        service
            .issue_code(send_request("user@example.com", OtpPurpose::Verification))
            .await
            .unwrap();
        let code = repo.stored()[0].code.clone();

        service
            .verify_code(verify_request(
                "user@example.com",
                &code,
                OtpPurpose::Verification,
            ))
            .await
            .unwrap();

        // Replay fails: the code was spent.
        let replay = service
            .verify_code(verify_request(
                "user@example.com",
                &code,
                OtpPurpose::Verification,
            ))
            .await;
        assert!(matches!(replay, Err(AppError::InvalidOtp)));
    }

    #[tokio::test]
    async fn test_verify_wrong_code_fails() {
        let repo = MockRepo::new();
        let service = OtpService::new(repo.clone(), MockMailer::new());

        service
            .issue_code(send_request("user@example.com", OtpPurpose::Verification))
            .await
            .unwrap();

        let mut wrong = repo.stored()[0].code.clone();
        let last = wrong.pop().unwrap();
        wrong.push(if last == '9' { '0' } else { '9' });

        let result = service
            .verify_code(verify_request(
                "user@example.com",
                &wrong,
                OtpPurpose::Verification,
            ))
            .await;
        assert!(matches!(result, Err(AppError::InvalidOtp)));
    }

    #[tokio::test]
    async fn test_verify_expired_code_fails() {
        let repo = MockRepo::new();
        let service = OtpService::new(repo.clone(), MockMailer::new());

        let mut otp = OtpCode::issue("user@example.com", OtpPurpose::Verification);
        otp.expires_at = Utc::now() - Duration::seconds(1);
        let code = otp.code.clone();
        repo.push(otp);

        let result = service
            .verify_code(verify_request(
                "user@example.com",
                &code,
                OtpPurpose::Verification,
            ))
            .await;
        assert!(matches!(result, Err(AppError::InvalidOtp)));
    }

    #[tokio::test]
    async fn test_verify_purpose_scoping() {
        let repo = MockRepo::new();
        let service = OtpService::new(repo.clone(), MockMailer::new());

        service
            .issue_code(send_request("user@example.com", OtpPurpose::Verification))
            .await
            .unwrap();
        let code = repo.stored()[0].code.clone();

        let result = service
            .verify_code(verify_request(
                "user@example.com",
                &code,
                OtpPurpose::PasswordReset,
            ))
            .await;
        assert!(matches!(result, Err(AppError::InvalidOtp)));
    }

    #[tokio::test]
    async fn test_verify_missing_fields_rejected() {
        let service = OtpService::new(MockRepo::new(), MockMailer::new());

        let result = service
            .verify_code(VerifyOtpRequest {
                email: "user@example.com".to_string(),
                code: "".to_string(),
                purpose: Some(OtpPurpose::Verification),
            })
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));

        let result = service
            .verify_code(VerifyOtpRequest {
                email: "user@example.com".to_string(),
                code: "123456".to_string(),
                purpose: None,
            })
            .await;
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Checkout
    // ─────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_create_order_converts_to_minor_units() {
        let gateway = MockGateway::new();
        let service = CheckoutService::new(Some(gateway.clone()));

        let resp = service.create_order(order_request(Some(1500.0))).await.unwrap();

        let requests = gateway.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].amount, 150000);
        assert_eq!(resp.amount, 150000);
        assert_eq!(resp.currency, "INR");
        assert_eq!(resp.order_id, "order_mock_1");
        assert_eq!(resp.key_id, "rzp_test_mock");
    }

    #[tokio::test]
    async fn test_create_order_receipt_is_bounded() {
        let gateway = MockGateway::new();
        let service = CheckoutService::new(Some(gateway.clone()));

        let mut req = order_request(Some(10.0));
        req.receipt = Some("booking-attempt-0123456789abcdef".to_string());
        service.create_order(req).await.unwrap();

        service.create_order(order_request(Some(10.0))).await.unwrap();

        let requests = gateway.requests();
        assert!(requests[0].receipt.len() <= 40);
        assert!(requests[0].receipt.starts_with("89abcdef_"));
        assert!(requests[1].receipt.len() <= 40);
        assert!(requests[1].receipt.starts_with("order_"));
    }

    #[tokio::test]
    async fn test_create_order_invalid_amount_skips_gateway() {
        let gateway = MockGateway::new();
        let service = CheckoutService::new(Some(gateway.clone()));

        for amount in [None, Some(0.0), Some(-5.0)] {
            let result = service.create_order(order_request(amount)).await;
            assert!(matches!(result, Err(AppError::BadRequest(_))), "{amount:?}");
        }

        assert!(gateway.requests().is_empty());
    }

    #[tokio::test]
    async fn test_create_order_without_credentials() {
        let service: CheckoutService<MockGateway> = CheckoutService::new(None);

        let result = service.create_order(order_request(Some(100.0))).await;
        assert!(matches!(result, Err(AppError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_create_order_gateway_rejection_passthrough() {
        let gateway = MockGateway::rejecting(422, r#"{"error":{"description":"bad currency"}}"#);
        let service = CheckoutService::new(Some(gateway));

        let result = service.create_order(order_request(Some(100.0))).await;
        match result {
            Err(AppError::Gateway { status, body }) => {
                assert_eq!(status, 422);
                assert!(body.contains("bad currency"));
            }
            other => panic!("expected gateway error, got {:?}", other.map(|_| ())),
        }
    }

    #[tokio::test]
    async fn test_create_order_forwards_notes() {
        let gateway = MockGateway::new();
        let service = CheckoutService::new(Some(gateway.clone()));

        let mut req = order_request(Some(250.0));
        req.notes.insert("workspace_id".into(), "ws_42".into());
        req.notes.insert("service".into(), "day-pass".into());
        service.create_order(req).await.unwrap();

        let requests = gateway.requests();
        assert_eq!(requests[0].notes.get("workspace_id").unwrap(), "ws_42");
        assert_eq!(requests[0].notes.get("service").unwrap(), "day-pass");
    }
}
