//! Configuration loading from environment.

use std::env;

/// SMTP relay settings. All required: the OTP flow cannot run without a
/// mail transport.
pub struct SmtpConfig {
    pub host: String,
    pub user: String,
    pub pass: String,
    pub from: String,
}

/// Razorpay credential pair. Optional at startup; order creation reports a
/// configuration error per-request while these are absent.
pub struct RazorpayConfig {
    pub key_id: String,
    pub key_secret: String,
}

/// Application configuration.
pub struct Config {
    pub port: u16,
    pub database_url: String,
    pub smtp: SmtpConfig,
    pub razorpay: Option<RazorpayConfig>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()?;

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let smtp = SmtpConfig {
            host: require("SMTP_HOST")?,
            user: require("SMTP_USER")?,
            pass: require("SMTP_PASS")?,
            from: env::var("SMTP_FROM").unwrap_or_else(|_| {
                // Fall back to the relay login, which most providers accept
                // as the sender identity.
                env::var("SMTP_USER").unwrap_or_default()
            }),
        };

        let razorpay = match (env::var("RAZORPAY_KEY_ID"), env::var("RAZORPAY_KEY_SECRET")) {
            (Ok(key_id), Ok(key_secret)) => Some(RazorpayConfig { key_id, key_secret }),
            _ => None,
        };

        Ok(Self {
            port,
            database_url,
            smtp,
            razorpay,
        })
    }
}

fn require(name: &str) -> anyhow::Result<String> {
    env::var(name).map_err(|_| anyhow::anyhow!("{} environment variable is required", name))
}
