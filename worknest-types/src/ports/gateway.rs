//! Payment gateway port.
//!
//! This trait defines the interface for gateway order creation.
//! Implementations can be HTTP clients, mock providers, etc.

use std::collections::HashMap;

use crate::error::GatewayError;

/// A fully shaped order request, ready for the gateway.
///
/// `amount` is in minor currency units and `receipt` has already been
/// bounded to the gateway's length limit.
#[derive(Debug, Clone)]
pub struct GatewayOrderRequest {
    pub amount: i64,
    pub currency: String,
    pub receipt: String,
    pub notes: HashMap<String, String>,
}

/// The gateway's view of a created order.
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    pub order_id: String,
    /// Amount in minor units as echoed by the gateway.
    pub amount: i64,
    pub currency: String,
}

/// Port trait for payment gateways.
#[async_trait::async_trait]
pub trait PaymentGateway: Send + Sync + 'static {
    /// The public key id clients use to launch the hosted checkout.
    fn key_id(&self) -> &str;

    /// Opens an order for one checkout attempt. No retries.
    async fn create_order(&self, req: GatewayOrderRequest) -> Result<GatewayOrder, GatewayError>;
}
