//! Data Transfer Objects (DTOs) for requests and responses.
//!
//! Required fields are modeled as defaulted/optional and checked in the
//! service layer before any IO, so a missing field produces a clean 400
//! JSON body instead of a deserialization rejection.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::OtpPurpose;

// ─────────────────────────────────────────────────────────────────────────────
// OTP DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to issue a one-time code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendOtpRequest {
    /// Address the code is mailed to
    #[serde(default)]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// What the code will authorize
    #[serde(rename = "type")]
    pub purpose: Option<OtpPurpose>,
}

/// Request to verify a previously issued code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpRequest {
    #[serde(default)]
    #[schema(example = "user@example.com")]
    pub email: String,
    /// The 6-digit code from the email, compared as an exact string
    #[serde(default)]
    #[schema(example = "483920")]
    pub code: String,
    #[serde(rename = "type")]
    pub purpose: Option<OtpPurpose>,
}

/// Acknowledgement for both OTP operations. The code itself is never
/// returned here; it travels out-of-band via email.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OtpResponse {
    pub success: bool,
    pub message: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Checkout DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to open a gateway order for one checkout attempt.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    /// Booking amount in major currency units (rupees)
    #[schema(example = 1500.0)]
    pub amount: Option<f64>,
    /// ISO currency code, passed through to the gateway
    #[serde(default = "default_currency")]
    #[schema(example = "INR")]
    pub currency: String,
    /// Opaque seed correlating the order with a booking attempt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt: Option<String>,
    /// Free-form metadata forwarded verbatim (workspace id, service name, ...)
    #[serde(default)]
    pub notes: HashMap<String, String>,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Identifiers the client needs to launch the hosted checkout widget.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateOrderResponse {
    /// Gateway order id
    #[schema(example = "order_EKwxwAgItmmXdp")]
    pub order_id: String,
    /// Amount in minor units, as echoed by the gateway
    #[schema(example = 150000)]
    pub amount: i64,
    pub currency: String,
    /// Public half of the gateway credential pair
    pub key_id: String,
}
