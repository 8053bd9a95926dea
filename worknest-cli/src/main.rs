//! Worknest CLI
//!
//! Command-line interface for the Worknest booking API.

use std::collections::HashMap;

use anyhow::Result;
use clap::{Parser, Subcommand};

use worknest_client::WorknestClient;
use worknest_types::OtpPurpose;

#[derive(Parser)]
#[command(name = "worknest")]
#[command(author, version, about = "Worknest booking API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the booking API
    #[arg(
        long,
        env = "WORKNEST_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// One-time code operations
    Otp {
        #[command(subcommand)]
        action: OtpCommands,
    },
    /// Payment order operations
    Order {
        #[command(subcommand)]
        action: OrderCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum OtpCommands {
    /// Request a code for an email address
    Send {
        /// Email address the code is mailed to
        email: String,
        /// Purpose (verification, password_reset)
        #[arg(long, default_value = "verification")]
        purpose: String,
    },
    /// Verify a received code
    Verify {
        /// Email address the code was issued to
        email: String,
        /// The 6-digit code from the email
        code: String,
        /// Purpose (verification, password_reset)
        #[arg(long, default_value = "verification")]
        purpose: String,
    },
}

#[derive(Subcommand)]
enum OrderCommands {
    /// Open a payment-gateway order
    Create {
        /// Amount in major currency units (rupees)
        amount: f64,
        /// ISO currency code
        #[arg(long, default_value = "INR")]
        currency: String,
        /// Receipt seed correlating the order with a booking attempt
        #[arg(long)]
        receipt: Option<String>,
        /// Metadata notes as key=value pairs (repeatable)
        #[arg(long = "note", value_parser = parse_key_val)]
        notes: Vec<(String, String)>,
    },
}

/// Parses a `key=value` argument.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid key=value pair: {}", s))?;
    Ok((key.to_string(), value.to_string()))
}

fn parse_purpose(s: &str) -> Result<OtpPurpose> {
    s.parse::<OtpPurpose>().map_err(|e| anyhow::anyhow!(e))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let client = WorknestClient::new(&cli.api_url);

    match cli.command {
        Commands::Otp { action } => match action {
            OtpCommands::Send { email, purpose } => {
                let resp = client.send_otp(&email, parse_purpose(&purpose)?).await?;
                println!("{}", serde_json::to_string_pretty(&resp)?);
            }
            OtpCommands::Verify {
                email,
                code,
                purpose,
            } => {
                let resp = client
                    .verify_otp(&email, &code, parse_purpose(&purpose)?)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&resp)?);
            }
        },
        Commands::Order { action } => match action {
            OrderCommands::Create {
                amount,
                currency,
                receipt,
                notes,
            } => {
                let notes: HashMap<String, String> = notes.into_iter().collect();
                let resp = client
                    .create_order(amount, Some(currency), receipt, notes)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&resp)?);
            }
        },
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("API is healthy");
            } else {
                println!("API is unhealthy");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
