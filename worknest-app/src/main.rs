//! # Worknest Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Construct the SMTP mailer and payment gateway adapters
//! - Create the OTP and checkout services
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use worknest_hex::inbound::HttpServer;
use worknest_hex::outbound::{RazorpayGateway, SmtpMailer};
use worknest_hex::{CheckoutService, OtpService};
use worknest_repo::build_repo;

fn init_tracer() -> (sdktrace::Tracer, sdktrace::SdkTracerProvider) {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()
        .expect("failed to create OTLP span exporter");

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    (provider.tracer("worknest-service"), provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize OpenTelemetry tracing
    let (otel_tracer, otel_provider) = init_tracer();
    let telemetry = tracing_opentelemetry::layer().with_tracer(otel_tracer);

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,worknest_app=debug,worknest_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Load configuration
    let config = config::Config::from_env()?;

    tracing::info!("Starting worknest server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url).await?;

    // Outbound adapters
    let mailer = SmtpMailer::new(
        &config.smtp.host,
        &config.smtp.user,
        &config.smtp.pass,
        &config.smtp.from,
    )?;

    let gateway = config
        .razorpay
        .as_ref()
        .map(|c| RazorpayGateway::new(&c.key_id, &c.key_secret));
    if gateway.is_none() {
        tracing::warn!(
            "RAZORPAY_KEY_ID/RAZORPAY_KEY_SECRET not set; order creation will report a configuration error"
        );
    }

    // Application services
    let otp = OtpService::new(repo, mailer);
    let checkout = CheckoutService::new(gateway);

    // Create and run the HTTP server
    let server = HttpServer::new(otp, checkout);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    let _ = otel_provider.shutdown();
    Ok(())
}
