//! # Worknest Types
//!
//! Domain types and port traits for the Worknest booking backend.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (OtpCode, OrderAmount, receipts)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    OTP_TTL_MINUTES, OrderAmount, OtpCode, OtpEmail, OtpId, OtpPurpose, derive_receipt,
    is_valid_email,
};
pub use dto::*;
pub use error::{AppError, DomainError, GatewayError, MailerError, RepoError};
pub use ports::{GatewayOrder, GatewayOrderRequest, Mailer, OtpRepository, PaymentGateway};
