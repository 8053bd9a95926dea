//! One-time password domain model.

use chrono::{DateTime, Duration, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// How long an issued code stays valid.
pub const OTP_TTL_MINUTES: i64 = 10;

/// Returns true if `email` looks like `local@domain` with a dotted domain.
pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Unique identifier for an OtpCode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct OtpId(Uuid);

impl OtpId {
    /// Creates a new random OtpId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an OtpId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for OtpId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for OtpId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for OtpId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// The context a code was issued for. Codes are scoped per purpose and
/// must not be cross-valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OtpPurpose {
    /// Proving control of an email address during signup.
    Verification,
    /// Authorizing a password reset.
    PasswordReset,
}

impl OtpPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            OtpPurpose::Verification => "verification",
            OtpPurpose::PasswordReset => "password_reset",
        }
    }
}

impl std::fmt::Display for OtpPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for OtpPurpose {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verification" => Ok(OtpPurpose::Verification),
            "password_reset" => Ok(OtpPurpose::PasswordReset),
            _ => Err(format!("Unknown OTP purpose: {}", s)),
        }
    }
}

/// One issued one-time code.
///
/// Rows are never physically deleted by this core; supersession and
/// verification both flip `used` instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OtpCode {
    /// Unique identifier
    pub id: OtpId,
    /// Address the code was issued to
    pub email: String,
    /// 6-digit decimal code
    pub code: String,
    /// What the code authorizes
    pub purpose: OtpPurpose,
    /// Whether the code has been spent or superseded
    pub used: bool,
    /// When the code was issued
    pub created_at: DateTime<Utc>,
    /// Issued-at plus the TTL
    pub expires_at: DateTime<Utc>,
}

impl OtpCode {
    /// Issues a fresh code for `email`, valid for [`OTP_TTL_MINUTES`].
    ///
    /// The code is drawn uniformly from [100000, 999999] so it is always
    /// six digits with no leading zeros.
    pub fn issue(email: &str, purpose: OtpPurpose) -> Self {
        let now = Utc::now();
        Self {
            id: OtpId::new(),
            email: email.to_string(),
            code: generate_code(),
            purpose,
            used: false,
            created_at: now,
            expires_at: now + Duration::minutes(OTP_TTL_MINUTES),
        }
    }

    /// Reconstructs a code from database fields.
    pub fn from_parts(
        id: OtpId,
        email: String,
        code: String,
        purpose: OtpPurpose,
        used: bool,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            code,
            purpose,
            used,
            created_at,
            expires_at,
        }
    }

    /// Whether the code is expired at `now`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }
}

fn generate_code() -> String {
    use rand::Rng;

    rand::rng().random_range(100_000..=999_999).to_string()
}

/// A composed OTP notification email.
///
/// The plaintext code travels only in the email body, never in an API
/// response.
#[derive(Debug, Clone)]
pub struct OtpEmail {
    pub subject: String,
    pub body: String,
}

impl OtpEmail {
    /// Composes the purpose-specific subject and body for a code.
    pub fn compose(purpose: OtpPurpose, code: &str) -> Self {
        match purpose {
            OtpPurpose::Verification => Self {
                subject: "Verify your email address".to_string(),
                body: format!(
                    "Your Worknest verification code is {code}.\n\n\
                     The code expires in 10 minutes.\n\n\
                     If you did not sign up for Worknest, you can ignore this email."
                ),
            },
            OtpPurpose::PasswordReset => Self {
                subject: "Reset your Worknest password".to_string(),
                body: format!(
                    "Your password reset code is {code}.\n\n\
                     The code expires in 10 minutes.\n\n\
                     If you did not request a password reset, you can ignore this email."
                ),
            },
        }
    }
}
