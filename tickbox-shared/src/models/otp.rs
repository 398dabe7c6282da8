/// OTP model and database operations
///
/// One-time verification codes issued at signup. A user may hold any number
/// of outstanding codes: issuing a new code does not purge older ones, and
/// codes carry no expiry. A row is deleted exactly when its code is consumed
/// by a successful verification; matching is by exact code equality.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE otps (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     code VARCHAR(6) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// One-time verification code issued to a user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Otp {
    /// Unique row ID
    pub id: Uuid,

    /// Owning user
    pub user_id: Uuid,

    /// 6-digit numeric code
    pub code: String,

    /// When the code was issued
    pub created_at: DateTime<Utc>,
}

impl Otp {
    /// Persists a new code for a user
    pub async fn create(pool: &PgPool, user_id: Uuid, code: &str) -> Result<Self, sqlx::Error> {
        let otp = sqlx::query_as::<_, Otp>(
            r#"
            INSERT INTO otps (user_id, code)
            VALUES ($1, $2)
            RETURNING id, user_id, code, created_at
            "#,
        )
        .bind(user_id)
        .bind(code)
        .fetch_one(pool)
        .await?;

        Ok(otp)
    }

    /// Finds an outstanding code for a user by exact equality
    ///
    /// If the same code was somehow issued twice, the most recent row wins.
    pub async fn find_by_user_and_code(
        pool: &PgPool,
        user_id: Uuid,
        code: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        let otp = sqlx::query_as::<_, Otp>(
            r#"
            SELECT id, user_id, code, created_at
            FROM otps
            WHERE user_id = $1 AND code = $2
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(code)
        .fetch_optional(pool)
        .await?;

        Ok(otp)
    }

    /// Lists all outstanding codes for a user, newest first
    pub async fn list_by_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<Self>, sqlx::Error> {
        let otps = sqlx::query_as::<_, Otp>(
            r#"
            SELECT id, user_id, code, created_at
            FROM otps
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(otps)
    }

    /// Deletes a code row, consuming it
    ///
    /// Returns true if the row existed.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM otps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_otp_serializes_code() {
        let otp = Otp {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            code: "123456".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(&otp).unwrap();
        assert_eq!(json["code"], "123456");
    }

    // Integration tests for database operations are in tickbox-api/tests/
}
