//! Notification ledger entity models and DTOs.

use campusgig_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `notification_ledger` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct LedgerEntry {
    pub id: DbId,
    pub user_id: UserId,
    pub channel: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub notification_type: String,
    pub subject: String,
    pub message: String,
    pub meta: serde_json::Value,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a ledger row. The status is always `queued` on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateLedgerEntry {
    pub user_id: UserId,
    pub channel: String,
    pub notification_type: String,
    pub subject: String,
    pub message: String,
    pub meta: serde_json::Value,
}
