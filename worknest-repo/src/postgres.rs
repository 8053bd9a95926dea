//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use worknest_types::{OtpCode, OtpId, OtpPurpose, OtpRepository, RepoError};

use crate::types::DbOtpCode;

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;

        execute_migration(
            &pool,
            include_str!("../migrations/0001_create_otp_codes_pg.sql"),
            "0001",
        )
        .await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl OtpRepository for PostgresRepo {
    async fn insert_code(&self, code: &OtpCode) -> Result<(), RepoError> {
        sqlx::query(
            r#"INSERT INTO otp_codes (id, email, code, purpose, used, created_at, expires_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(code.id.into_uuid())
        .bind(&code.email)
        .bind(&code.code)
        .bind(code.purpose.as_str())
        .bind(code.used)
        .bind(code.created_at)
        .bind(code.expires_at)
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(())
    }

    async fn invalidate_codes(&self, email: &str, purpose: OtpPurpose) -> Result<u64, RepoError> {
        let result = sqlx::query(
            r#"UPDATE otp_codes SET used = TRUE
               WHERE email = $1 AND purpose = $2 AND used = FALSE"#,
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
               WHERE email = $1 AND code = $2 AND purpose = $3 AND used = FALSE AND expires_at >= $4
               ORDER BY created_at DESC
               LIMIT 1"#,
        )
        .bind(email)
        .bind(code)
        .bind(purpose.as_str())
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbOtpCode::into_domain).transpose()
    }

    async fn mark_used(&self, id: OtpId) -> Result<bool, RepoError> {
        // Atomic conditional flip: the affected-row count tells us whether
        // this call spent the code or lost the race.
        let result =
            sqlx::query(r#"UPDATE otp_codes SET used = TRUE WHERE id = $1 AND used = FALSE"#)
                .bind(id.into_uuid())
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(result.rows_affected() == 1)
    }
}
