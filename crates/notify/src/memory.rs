//! In-process implementations of the settings store and ledger.
//!
//! State lives behind a `std::sync::Mutex` and is never held across an
//! await point.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use campusgig_core::dispatch::{STATUS_QUEUED, STATUS_SENT};
use campusgig_core::settings::SettingType;
use campusgig_core::types::{DbId, UserId};
use campusgig_db::models::ledger::CreateLedgerEntry;
use serde_json::Value;

use crate::error::StoreError;
use crate::ledger::NotificationLedger;
use crate::settings::SettingsStore;

fn poisoned() -> StoreError {
    StoreError::Unavailable("in-memory store lock poisoned".to_string())
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    documents: Mutex<HashMap<(UserId, SettingType), Value>>,
    loads: AtomicUsize,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a document.
    pub fn with_document(self, user_id: UserId, setting_type: SettingType, doc: Value) -> Self {
        if let Ok(mut documents) = self.documents.lock() {
            documents.insert((user_id, setting_type), doc);
        }
        self
    }

    /// Number of `load` calls served so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn load(
        &self,
        setting_type: SettingType,
        user_id: UserId,
    ) -> Result<Option<Value>, StoreError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let documents = self.documents.lock().map_err(|_| poisoned())?;
        Ok(documents.get(&(user_id, setting_type)).cloned())
    }

    async fn save(
        &self,
        setting_type: SettingType,
        user_id: UserId,
        document: &Value,
    ) -> Result<(), StoreError> {
        let mut documents = self.documents.lock().map_err(|_| poisoned())?;
        documents.insert((user_id, setting_type), document.clone());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// A ledger row as held in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct LedgerRow {
    pub id: DbId,
    pub entry: CreateLedgerEntry,
    pub status: &'static str,
}

#[derive(Debug, Default)]
pub struct InMemoryLedger {
    rows: Mutex<Vec<LedgerRow>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every row in insertion order.
    pub fn rows(&self) -> Vec<LedgerRow> {
        self.rows.lock().map(|rows| rows.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl NotificationLedger for InMemoryLedger {
    async fn insert(&self, entry: CreateLedgerEntry) -> Result<DbId, StoreError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned())?;
        let id = rows.len() as DbId + 1;
        rows.push(LedgerRow {
            id,
            entry,
            status: STATUS_QUEUED,
        });
        Ok(id)
    }

    async fn mark_sent(&self, id: DbId) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().map_err(|_| poisoned())?;
        let row = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::MissingRow(id))?;
        row.status = STATUS_SENT;
        Ok(())
    }
}
