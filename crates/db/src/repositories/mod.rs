//! Repository layer: one unit struct per table, async fns taking `&PgPool`.

pub mod notification_ledger_repo;
pub mod user_settings_repo;

pub use notification_ledger_repo::NotificationLedgerRepo;
pub use user_settings_repo::UserSettingsRepo;
