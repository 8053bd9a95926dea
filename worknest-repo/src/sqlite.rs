//! SQLite repository adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use worknest_types::{OtpCode, OtpId, OtpPurpose, OtpRepository, RepoError};

use crate::types::{DbOtpCode, fmt_ts};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        // Run migration from migration file
        let ddl = include_str!("../migrations/0001_create_otp_codes.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl OtpRepository for SqliteRepo {
    async fn insert_code(&self, code: &OtpCode) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO otp_codes (id, email, code, purpose, used, created_at, expires_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(code.id.to_string())
        .bind(&code.email)
        .bind(&code.code)
        .bind(code.purpose.as_str())
        .bind(code.used)
        .bind(fmt_ts(code.created_at))
        .bind(fmt_ts(code.expires_at))
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn invalidate_codes(&self, email: &str, purpose: OtpPurpose) -> Result<u64, RepoError> {
        let result = sqlx::query(
            r#"UPDATE otp_codes SET used = TRUE
               WHERE email = ? AND purpose = ? AND used = FALSE"#,
        )
        .bind(email)
        .bind(purpose.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(result.rows_affected())
    }

    async fn find_valid_code(
        &self,
        email: &str,
        code: &str,
        purpose: OtpPurpose,
        now: DateTime<Utc>,
    ) -> Result<Option<OtpCode>, RepoError> {
        let row: Option<DbOtpCode> = sqlx::query_as(
            r#"SELECT id, email, code, purpose, used, created_at, expires_at
               FROM otp_codes
               WHERE email = ? AND code = ? AND purpose = ? AND used = FALSE AND expires_at >= ?
               ORDER BY created_at DESC
               LIMIT 1"#,
        )
        .bind(email)
        .bind(code)
        .bind(purpose.as_str())
        .bind(fmt_ts(now))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbOtpCode::into_domain).transpose()
    }

    async fn mark_used(&self, id: OtpId) -> Result<bool, RepoError> {
        // Atomic conditional flip: the affected-row count tells us whether
        // this call spent the code or lost the race.
        let result = sqlx::query(r#"UPDATE otp_codes SET used = TRUE WHERE id = ? AND used = FALSE"#)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
