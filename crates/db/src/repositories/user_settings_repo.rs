//! Repository for the `user_settings` table.

use campusgig_core::settings::SettingType;
use campusgig_core::types::UserId;
use sqlx::PgPool;

use crate::models::settings::UserSetting;

const COLUMNS: &str = "id, user_id, setting_type, document, created_at, updated_at";

/// One JSON document per `(user, setting type)` pair.
pub struct UserSettingsRepo;

impl UserSettingsRepo {
    /// Load the document for a user and setting type, if one was saved.
    pub async fn load(
        pool: &PgPool,
        user_id: UserId,
        setting_type: SettingType,
    ) -> Result<Option<UserSetting>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM user_settings \
             WHERE user_id = $1 AND setting_type = $2"
        );
        sqlx::query_as::<_, UserSetting>(&query)
            .bind(user_id)
            .bind(setting_type.as_str())
            .fetch_optional(pool)
            .await
    }

    /// Insert or replace the document for a user and setting type.
    ///
    /// Uses `INSERT ... ON CONFLICT (user_id, setting_type) DO UPDATE` to
    /// upsert in a single round-trip.
    pub async fn upsert(
        pool: &PgPool,
        user_id: UserId,
        setting_type: SettingType,
        document: &serde_json::Value,
    ) -> Result<UserSetting, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_settings (user_id, setting_type, document) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (user_id, setting_type) DO UPDATE SET \
                document = EXCLUDED.document, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserSetting>(&query)
            .bind(user_id)
            .bind(setting_type.as_str())
            .bind(document)
            .fetch_one(pool)
            .await
    }
}
