//! Notification ledger collaborator.

use async_trait::async_trait;
use campusgig_core::types::DbId;
use campusgig_db::models::ledger::CreateLedgerEntry;
use campusgig_db::repositories::NotificationLedgerRepo;
use campusgig_db::DbPool;

use crate::error::StoreError;

/// Append/update audit store with one row per dispatch attempt.
#[async_trait]
pub trait NotificationLedger: Send + Sync {
    /// Insert a `queued` row and return its id.
    async fn insert(&self, entry: CreateLedgerEntry) -> Result<DbId, StoreError>;

    /// Move a row to `sent`.
    async fn mark_sent(&self, id: DbId) -> Result<(), StoreError>;
}

/// [`NotificationLedger`] backed by the `notification_ledger` table.
#[derive(Clone)]
pub struct PgNotificationLedger {
    pool: DbPool,
}

impl PgNotificationLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationLedger for PgNotificationLedger {
    async fn insert(&self, entry: CreateLedgerEntry) -> Result<DbId, StoreError> {
        let row = NotificationLedgerRepo::create(&self.pool, &entry).await?;
        Ok(row.id)
    }

    async fn mark_sent(&self, id: DbId) -> Result<(), StoreError> {
        if NotificationLedgerRepo::mark_sent(&self.pool, id).await? {
            Ok(())
        } else {
            Err(StoreError::MissingRow(id))
        }
    }
}
