//! OTP store port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, in-memory fakes) implement this trait.
//! The surface is deliberately narrow: insert a row, update rows matching
//! a filter, select a row matching a filter.

use chrono::{DateTime, Utc};

use crate::domain::{OtpCode, OtpId, OtpPurpose};
use crate::error::RepoError;

/// Persistence port for issued one-time codes.
#[async_trait::async_trait]
pub trait OtpRepository: Send + Sync + 'static {
    /// Inserts a freshly issued code.
    async fn insert_code(&self, code: &OtpCode) -> Result<(), RepoError>;

    /// Marks every unused code for `(email, purpose)` as used, returning
    /// how many rows were superseded.
    async fn invalidate_codes(&self, email: &str, purpose: OtpPurpose) -> Result<u64, RepoError>;

    /// Finds the most recently created code matching
    /// `(email, code, purpose)` that is unused and not expired at `now`.
    async fn find_valid_code(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpCode>, RepoError>;

    /// Conditionally marks a code as used.
    ///
    /// MUST be atomic: `used` flips only if it was still false, and the
    /// return value is whether this call performed the flip. Two racing
    /// verifications of the same code therefore cannot both succeed.
    async fn mark_used(&self, id: OtpId) -> Result<bool, RepoError>;
}
