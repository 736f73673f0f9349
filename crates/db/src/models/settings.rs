//! User settings document model.

use campusgig_core::types::{DbId, Timestamp, UserId};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `user_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSetting {
    pub id: DbId,
    pub user_id: UserId,
    pub setting_type: String,
    pub document: serde_json::Value,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
