//! # Worknest Client SDK
//!
//! A typed Rust client for the Worknest booking API.

use std::collections::HashMap;

use reqwest::Client;
use serde::de::DeserializeOwned;

use worknest_types::{
    CreateOrderRequest, CreateOrderResponse, OtpPurpose, OtpResponse, SendOtpRequest,
    VerifyOtpRequest,
};

/// Error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Worknest API client.
pub struct WorknestClient {
    base_url: String,
    http: Client,
}

impl WorknestClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Checks if the API is healthy.
    pub async fn health(&self) -> Result<bool, ClientError> {
        let resp = self
            .http
            .get(format!("{}/health", self.base_url))
            .send()
            .await?;
        Ok(resp.status().is_success())
    }

    /// Requests a one-time code. The code arrives by email, not in the
    /// response.
    pub async fn send_otp(
        &self,
        email: &str,
        purpose: OtpPurpose,
    ) -> Result<OtpResponse, ClientError> {
        let req = SendOtpRequest {
            email: email.to_string(),
            purpose: Some(purpose),
        };
        self.post("/api/auth/otp/send", &req).await
    }

    /// Verifies a previously issued code.
    pub async fn verify_otp(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
    ) -> Result<OtpResponse, ClientError> {
        let req = VerifyOtpRequest {
            email: email.to_string(),
            code: code.to_string(),
            purpose: Some(purpose),
        };
        self.post("/api/auth/otp/verify", &req).await
    }

    /// Opens a payment-gateway order for a checkout attempt.
    pub async fn create_order(
        &self,
        amount: f64,
        currency: Option<String>,
        receipt: Option<String>,
        notes: HashMap<String, String>,
    ) -> Result<CreateOrderResponse, ClientError> {
        let req = CreateOrderRequest {
            amount: Some(amount),
            currency: currency.unwrap_or_else(|| "INR".to_string()),
            receipt,
            notes,
        };
        self.post("/api/payments/order", &req).await
    }

    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let resp = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            Ok(serde_json::from_str(&body)?)
        } else {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or(body);
            Err(ClientError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = WorknestClient::new("http://localhost:3000");
        assert_eq!(client.base_url, "http://localhost:3000");
    }

    #[test]
    fn test_client_with_trailing_slash() {
        let client = WorknestClient::new("http://localhost:3000/");
        assert_eq!(client.base_url, "http://localhost:3000");
    }
}
