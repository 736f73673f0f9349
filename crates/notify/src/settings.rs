//! Settings store collaborator.

use async_trait::async_trait;
use campusgig_core::settings::SettingType;
use campusgig_core::types::UserId;
use campusgig_db::repositories::UserSettingsRepo;
use campusgig_db::DbPool;
use serde_json::Value;

use crate::error::StoreError;

/// Per-user, per-setting-type JSON documents.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load a document; `Ok(None)` when nothing was saved.
    async fn load(
        &self,
        setting_type: SettingType,
        user_id: UserId,
    ) -> Result<Option<Value>, StoreError>;

    /// Save (insert or replace) a document.
    async fn save(
        &self,
        setting_type: SettingType,
        user_id: UserId,
        document: &Value,
    ) -> Result<(), StoreError>;
}

/// [`SettingsStore`] backed by the `user_settings` table.
#[derive(Clone)]
pub struct PgSettingsStore {
    pool: DbPool,
}

impl PgSettingsStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for PgSettingsStore {
    async fn load(
        &self,
        setting_type: SettingType,
        user_id: UserId,
    ) -> Result<Option<Value>, StoreError> {
        let row = UserSettingsRepo::load(&self.pool, user_id, setting_type).await?;
        Ok(row.map(|r| r.document))
    }

    async fn save(
        &self,
        setting_type: SettingType,
        user_id: UserId,
        document: &Value,
    ) -> Result<(), StoreError> {
        UserSettingsRepo::upsert(&self.pool, user_id, setting_type, document).await?;
        Ok(())
    }
}
