//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use worknest_types::{OtpCode, OtpId, OtpPurpose, RepoError};

#[cfg(feature = "sqlite")]
use chrono::SecondsFormat;
#[cfg(not(feature = "sqlite"))]
use uuid::Uuid;

/// Formats a timestamp for SQLite storage.
///
/// Fixed-width RFC 3339 with microseconds and a `Z` suffix, so lexicographic
/// ordering of the stored strings matches chronological ordering.
#[cfg(feature = "sqlite")]
pub fn fmt_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[cfg(feature = "sqlite")]
fn parse_ts(raw: &str, column: &str) -> Result<DateTime<Utc>, RepoError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepoError::Database(format!("invalid {} timestamp: {}", column, e)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// OTP code row from database.
#[derive(FromRow)]
pub struct DbOtpCode {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub email: String,
    pub code: String,
    pub purpose: String,
    pub used: bool,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,

    #[cfg(not(feature = "sqlite"))]
    pub expires_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub expires_at: String,
}

impl DbOtpCode {
    /// Converts a database row into the domain type.
    pub fn into_domain(self) -> Result<OtpCode, RepoError> {
        let purpose: OtpPurpose = self
            .purpose
            .parse()
            .map_err(|e: String| RepoError::Database(e))?;

        #[cfg(not(feature = "sqlite"))]
        let (id, created_at, expires_at) =
            (OtpId::from_uuid(self.id), self.created_at, self.expires_at);

        #[cfg(feature = "sqlite")]
        let (id, created_at, expires_at) = (
            self.id
                .parse::<OtpId>()
                .map_err(|e| RepoError::Database(format!("invalid id: {}", e)))?,
            parse_ts(&self.created_at, "created_at")?,
            parse_ts(&self.expires_at, "expires_at")?,
        );

        Ok(OtpCode::from_parts(
            id,
            self.email,
            self.code,
            purpose,
            self.used,
            created_at,
            expires_at,
        ))
    }
}
