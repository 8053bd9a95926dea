//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use utoipa::OpenApi;

use worknest_types::domain::{OtpId, OtpPurpose};
use worknest_types::dto::{
    CreateOrderRequest, CreateOrderResponse, OtpResponse, SendOtpRequest, VerifyOtpRequest,
};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Issue a one-time code
#[utoipa::path(
    post,
    path = "/api/auth/otp/send",
    tag = "otp",
    request_body = SendOtpRequest,
    responses(
        (status = 200, description = "Code issued and mailed", body = OtpResponse),
        (status = 400, description = "Missing or malformed email/type"),
        (status = 500, description = "Storage or mail delivery failure")
    )
)]
async fn send_otp() {}

/// Verify a one-time code
#[utoipa::path(
    post,
    path = "/api/auth/otp/verify",
    tag = "otp",
    request_body = VerifyOtpRequest,
    responses(
        (status = 200, description = "Code accepted and spent", body = OtpResponse),
        (status = 400, description = "Missing input, or the code is wrong, expired, or already used")
    )
)]
async fn verify_otp() {}

/// Open a payment-gateway order
#[utoipa::path(
    post,
    path = "/api/payments/order",
    tag = "payments",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Order opened with the gateway", body = CreateOrderResponse),
        (status = 400, description = "Missing or non-positive amount"),
        (status = 500, description = "Gateway credentials missing or unexpected failure")
    )
)]
async fn create_order() {}

/// OpenAPI documentation for the booking API.
#[derive(OpenApi)]
#[openapi(
    paths(health, send_otp, verify_otp, create_order),
    components(schemas(
        OtpId,
        OtpPurpose,
        SendOtpRequest,
        VerifyOtpRequest,
        OtpResponse,
        CreateOrderRequest,
        CreateOrderResponse,
    )),
    tags(
        (name = "health", description = "Liveness probes"),
        (name = "otp", description = "One-time code issuance and verification"),
        (name = "payments", description = "Gateway order creation")
    ),
    info(
        title = "Worknest Booking API",
        description = "OTP authentication and payment-order endpoints for the Worknest marketplace",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
