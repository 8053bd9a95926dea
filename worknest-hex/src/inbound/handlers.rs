//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use worknest_types::{
    AppError, CreateOrderRequest, Mailer, OtpRepository, OtpResponse, PaymentGateway,
    SendOtpRequest, VerifyOtpRequest,
};

use crate::{CheckoutService, OtpService};

/// Application state shared across handlers.
pub struct AppState<R: OtpRepository, M: Mailer, G: PaymentGateway> {
    pub otp: OtpService<R, M>,
    pub checkout: CheckoutService<G>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidOtp => (StatusCode::BAD_REQUEST, "Invalid or expired OTP".to_string()),
            AppError::Configuration(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Delivery(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to send OTP email: {}", msg),
            ),
            AppError::Gateway { status, body } => {
                // The caller is a trusted integration layer; pass the
                // gateway's status through and keep its body as details.
                let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
                let details = serde_json::from_str::<serde_json::Value>(&body)
                    .unwrap_or(serde_json::Value::String(body));
                let payload = serde_json::json!({
                    "error": "Payment gateway rejected the order",
                    "details": details,
                    "code": status.as_u16()
                });
                return (status, Json(payload)).into_response();
            }
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Issue a one-time code and mail it out.
#[tracing::instrument(skip(state, req), fields(purpose = ?req.purpose))]
pub async fn send_otp<R: OtpRepository, M: Mailer, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, M, G>>>,
    Json(req): Json<SendOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.otp.issue_code(req).await?;
    Ok(Json(OtpResponse {
        success: true,
        message: "OTP sent successfully".to_string(),
    }))
}

/// Verify a previously issued code.
#[tracing::instrument(skip(state, req), fields(purpose = ?req.purpose))]
pub async fn verify_otp<R: OtpRepository, M: Mailer, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, M, G>>>,
    Json(req): Json<VerifyOtpRequest>,
) -> Result<impl IntoResponse, ApiError> {
    state.otp.verify_code(req).await?;
    Ok(Json(OtpResponse {
        success: true,
        message: "OTP verified successfully".to_string(),
    }))
}

/// Open a payment-gateway order for a checkout attempt.
#[tracing::instrument(skip(state, req), fields(amount = ?req.amount, currency = %req.currency))]
pub async fn create_order<R: OtpRepository, M: Mailer, G: PaymentGateway>(
    State(state): State<Arc<AppState<R, M, G>>>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let order = state.checkout.create_order(req).await?;
    Ok(Json(order))
}
