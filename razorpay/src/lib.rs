//! # Razorpay Orders Client
//!
//! A small typed client for the Razorpay Orders API, covering exactly the
//! surface the booking checkout needs: order creation with basic auth.
//!
//! Amounts are always expressed in minor currency units (paise for INR);
//! Razorpay does not accept fractional amounts.
//!
//! # Example
//! ```ignore
//! let client = Client::new("rzp_test_key", "secret");
//! let order = client
//!     .create_order(&CreateOrderRequest {
//!         amount: 150000,
//!         currency: "INR".into(),
//!         receipt: "order_abc123".into(),
//!         notes: Default::default(),
//!     })
//!     .await?;
//! println!("{}", order.id);
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.razorpay.com";

/// Error type for Razorpay API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Razorpay API error: HTTP {status}")]
    Api { status: u16, body: String },
}

/// Request body for `POST /v1/orders`.
///
/// `notes` is free-form reconciliation metadata; Razorpay stores it verbatim
/// and echoes it back on fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in minor currency units (paise for INR). Must be positive.
    pub amount: i64,
    /// ISO currency code, e.g. "INR".
    pub currency: String,
    /// Caller-supplied correlation string, at most 40 characters.
    pub receipt: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub notes: HashMap<String, String>,
}

/// An order as returned by the Orders API.
///
/// Only the fields the checkout flow consumes are modeled; unknown fields
/// in the response are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    /// Amount in minor units, echoed back by the gateway.
    pub amount: i64,
    pub currency: String,
    #[serde(default)]
    pub receipt: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Razorpay API client.
pub struct Client {
    base_url: String,
    key_id: String,
    key_secret: String,
    http: reqwest::Client,
}

impl Client {
    /// Creates a new client against the production API host.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Overrides the API host (for tests and sandboxes).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// The public key id. Safe to hand to browser-side checkout widgets;
    /// the secret never leaves this client.
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Creates an order via `POST /v1/orders`.
    ///
    /// Non-2xx responses are returned as [`Error::Api`] with the original
    /// status and body preserved for diagnostics. No retry is attempted.
    pub async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, Error> {
        let resp = self
            .http
            .post(format!("{}/v1/orders", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(req)
            .send()
            .await?;

        let status = resp.status();
        if status.is_success() {
            Ok(resp.json().await?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                body,
            })
        }
    }
}
