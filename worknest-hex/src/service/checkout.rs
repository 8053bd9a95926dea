//! Checkout application service.

use chrono::Utc;

use worknest_types::{
    AppError, CreateOrderRequest, CreateOrderResponse, DomainError, GatewayOrderRequest,
    OrderAmount, PaymentGateway, derive_receipt,
};

/// Application service bridging checkout attempts to the payment gateway.
///
/// Holds no local state beyond the injected gateway; every call is a pure
/// request/response bridge plus deterministic request shaping.
pub struct CheckoutService<G: PaymentGateway> {
    gateway: Option<G>,
}

impl<G: PaymentGateway> CheckoutService<G> {
    /// Creates a new checkout service.
    ///
    /// `gateway` is `None` when the deployment has no gateway credentials;
    /// order creation then fails with a configuration error before any
    /// network call.
    pub fn new(gateway: Option<G>) -> Self {
        Self { gateway }
    }

    /// Opens a gateway order for one checkout attempt.
    ///
    /// Validation happens before the gateway is touched. A fresh receipt is
    /// derived per call, so client-driven retries of a failed checkout mint
    /// distinct receipts.
    pub async fn create_order(
        &self,
        req: CreateOrderRequest,
    ) -> Result<CreateOrderResponse, AppError> {
        let amount = OrderAmount::from_major(req.amount.ok_or(DomainError::InvalidAmount)?)?;

        let gateway = self.gateway.as_ref().ok_or_else(|| {
            AppError::Configuration("Payment gateway credentials are not configured".into())
        })?;

        let receipt = derive_receipt(req.receipt.as_deref(), Utc::now().timestamp_millis());

        let order = gateway
            .create_order(GatewayOrderRequest {
                amount: amount.minor_units(),
                currency: req.currency,
                receipt,
                notes: req.notes,
            })
            .await?;

        Ok(CreateOrderResponse {
            order_id: order.order_id,
            amount: order.amount,
            currency: order.currency,
            key_id: gateway.key_id().to_string(),
        })
    }
}
