//! Razorpay payment gateway adapter.

use async_trait::async_trait;

use worknest_types::{GatewayError, GatewayOrder, GatewayOrderRequest, PaymentGateway};

/// Gateway adapter over the typed Razorpay Orders client.
pub struct RazorpayGateway {
    client: razorpay::Client,
}

impl RazorpayGateway {
    /// Creates an adapter from a gateway credential pair.
    pub fn new(key_id: &str, key_secret: &str) -> Self {
        Self {
            client: razorpay::Client::new(key_id, key_secret),
        }
    }

    /// Creates an adapter with a custom API host (for tests and sandboxes).
    pub fn with_base_url(key_id: &str, key_secret: &str, base_url: &str) -> Self {
        Self {
            client: razorpay::Client::new(key_id, key_secret).with_base_url(base_url),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn key_id(&self) -> &str {
        self.client.key_id()
    }

    async fn create_order(&self, req: GatewayOrderRequest) -> Result<GatewayOrder, GatewayError> {
        let order = self
            .client
            .create_order(&razorpay::CreateOrderRequest {
                amount: req.amount,
                currency: req.currency,
                receipt: req.receipt,
                notes: req.notes,
            })
            .await
            .map_err(|e| match e {
                razorpay::Error::Api { status, body } => GatewayError::Rejected { status, body },
                razorpay::Error::Transport(e) => GatewayError::Transport(e.to_string()),
            })?;

        Ok(GatewayOrder {
            order_id: order.id,
            amount: order.amount,
            currency: order.currency,
        })
    }
}
