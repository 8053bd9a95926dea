//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    http::{Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use worknest_types::{Mailer, OtpRepository, PaymentGateway};

use super::handlers::{self, AppState};
use super::rate_limit::{RateLimiterState, rate_limit_middleware};
use crate::openapi::ApiDoc;
use crate::{CheckoutService, OtpService};

/// HTTP Server for the booking API.
pub struct HttpServer<R: OtpRepository, M: Mailer, G: PaymentGateway> {
    state: Arc<AppState<R, M, G>>,
    rate_limiter: Arc<RateLimiterState>,
}

impl<R: OtpRepository, M: Mailer, G: PaymentGateway> HttpServer<R, M, G> {
    /// Creates a new HTTP server with the given services.
    pub fn new(otp: OtpService<R, M>, checkout: CheckoutService<G>) -> Self {
        Self {
            state: Arc::new(AppState { otp, checkout }),
            rate_limiter: Arc::new(RateLimiterState::default()), // 60 req/min default
        }
    }

    /// Creates a new HTTP server with custom rate limiting.
    pub fn with_rate_limit(
        otp: OtpService<R, M>,
        checkout: CheckoutService<G>,
        requests_per_minute: u32,
    ) -> Self {
        use std::time::Duration;
        Self {
            state: Arc::new(AppState { otp, checkout }),
            rate_limiter: Arc::new(RateLimiterState::new(
                requests_per_minute,
                Duration::from_secs(60),
            )),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/auth/otp/send", post(handlers::send_otp::<R, M, G>))
            .route(
                "/api/auth/otp/verify",
                post(handlers::verify_otp::<R, M, G>),
            )
            .route(
                "/api/payments/order",
                post(handlers::create_order::<R, M, G>),
            )
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            .layer(metrics)
            .layer(middleware::from_fn_with_state(
                self.rate_limiter.clone(),
                rate_limit_middleware,
            ))
            .layer(cors_layer())
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

/// Browser clients call these endpoints directly from the marketplace
/// frontend, so preflights must succeed from any origin. Only the listed
/// request headers are allowed.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
        ])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
