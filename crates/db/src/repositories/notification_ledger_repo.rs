//! Repository for the `notification_ledger` table.

use campusgig_core::dispatch::{STATUS_QUEUED, STATUS_SENT};
use campusgig_core::types::{DbId, UserId};
use sqlx::PgPool;

use crate::models::ledger::{CreateLedgerEntry, LedgerEntry};

/// Column list for `notification_ledger` queries.
const COLUMNS: &str =
    "id, user_id, channel, type, subject, message, meta, status, created_at, updated_at";

/// Audit rows for dispatch attempts. Rows are inserted as `queued` and only
/// ever move to `sent`; nothing here deletes them.
pub struct NotificationLedgerRepo;

impl NotificationLedgerRepo {
    /// Insert a `queued` row and return it with its generated id.
    pub async fn create(
        pool: &PgPool,
        input: &CreateLedgerEntry,
    ) -> Result<LedgerEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO notification_ledger \
                (user_id, channel, type, subject, message, meta, status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, LedgerEntry>(&query)
            .bind(input.user_id)
            .bind(&input.channel)
            .bind(&input.notification_type)
            .bind(&input.subject)
            .bind(&input.message)
            .bind(&input.meta)
            .bind(STATUS_QUEUED)
            .fetch_one(pool)
            .await
    }

    /// Mark a row as sent.
    ///
    /// Returns `true` if a row with that id existed and was updated.
    pub async fn mark_sent(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE notification_ledger \
             SET status = $2, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(STATUS_SENT)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<LedgerEntry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notification_ledger WHERE id = $1");
        sqlx::query_as::<_, LedgerEntry>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's ledger rows, newest first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: UserId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<LedgerEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notification_ledger \
             WHERE user_id = $1 \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, LedgerEntry>(&query)
            .bind(user_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
