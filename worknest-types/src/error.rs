//! Error types for the booking backend.

/// Domain-level errors (business rule violations).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("A valid email address is required")]
    InvalidEmail,

    #[error("Amount must be a positive number")]
    InvalidAmount,

    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Repository-level errors (data access failures).
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Entity not found")]
    NotFound,
}

/// Mail transport errors.
#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Invalid mail address: {0}")]
    Address(String),

    #[error("Mail transport error: {0}")]
    Transport(String),
}

/// Payment gateway errors.
///
/// `Rejected` preserves the gateway's own status and body so the caller
/// can log and surface them.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("Gateway rejected the order: HTTP {status}")]
    Rejected { status: u16, body: String },

    #[error("Gateway unreachable: {0}")]
    Transport(String),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes. The OTP variants deliberately do not
/// distinguish wrong, expired, and already-used codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid or expired OTP")]
    InvalidOtp,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Email delivery failed: {0}")]
    Delivery(String),

    #[error("Payment gateway error: HTTP {status}")]
    Gateway { status: u16, body: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::Domain(e) => AppError::BadRequest(e.to_string()),
            RepoError::Database(e) => AppError::Internal(e),
            RepoError::NotFound => AppError::Internal("Record not found".into()),
        }
    }
}

impl From<MailerError> for AppError {
    fn from(err: MailerError) -> Self {
        AppError::Delivery(err.to_string())
    }
}

impl From<GatewayError> for AppError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Rejected { status, body } => AppError::Gateway { status, body },
            GatewayError::Transport(e) => AppError::Internal(e),
        }
    }
}
