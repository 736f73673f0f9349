//! Shared fakes for dispatcher integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use campusgig_core::settings::SettingType;
use campusgig_core::types::{DbId, UserId};
use campusgig_db::models::ledger::CreateLedgerEntry;
use campusgig_notify::error::{IdentityError, StoreError};
use campusgig_notify::identity::{Identity, IdentityProvider};
use campusgig_notify::memory::{InMemoryLedger, InMemorySettingsStore};
use campusgig_notify::{
    ChannelSender, NotificationDispatcher, NotificationLedger, OutboundMessage, SendError,
    SettingsStore,
};
use serde_json::Value;

pub const USER_EMAIL: &str = "ada@example.edu";

pub fn user_id() -> UserId {
    UserId::from_u128(0x5eed_0000_0000_4000_8000_0000_0000_0001)
}

pub fn identity() -> Identity {
    Identity {
        user_id: user_id(),
        email: Some(USER_EMAIL.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Senders
// ---------------------------------------------------------------------------

/// What a [`ScriptedSender`] answers.
#[derive(Debug, Clone)]
pub enum Script {
    Deliver,
    Reject(Option<Value>),
    Unreachable,
}

/// A message as seen by a sender.
#[derive(Debug, Clone, PartialEq)]
pub struct Sent {
    pub to: String,
    pub subject: String,
    pub message: String,
}

pub struct ScriptedSender {
    script: Script,
    sent: Mutex<Vec<Sent>>,
}

impl ScriptedSender {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            sent: Mutex::new(Vec::new()),
        })
    }

    pub fn sent(&self) -> Vec<Sent> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelSender for ScriptedSender {
    async fn send(&self, message: &OutboundMessage<'_>) -> Result<(), SendError> {
        self.sent.lock().unwrap().push(Sent {
            to: message.to.to_string(),
            subject: message.subject.to_string(),
            message: message.message.to_string(),
        });
        match &self.script {
            Script::Deliver => Ok(()),
            Script::Reject(details) => Err(SendError::Rejected {
                status: Some(422),
                details: details.clone(),
            }),
            Script::Unreachable => Err(SendError::Transport("connection refused".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Wraps an [`InMemoryLedger`] and fails on demand.
#[derive(Default)]
pub struct FlakyLedger {
    pub inner: InMemoryLedger,
    pub fail_insert: AtomicBool,
    pub fail_mark_sent: AtomicBool,
}

impl FlakyLedger {
    pub fn failing_insert() -> Arc<Self> {
        let ledger = Self::default();
        ledger.fail_insert.store(true, Ordering::SeqCst);
        Arc::new(ledger)
    }

    pub fn failing_mark_sent() -> Arc<Self> {
        let ledger = Self::default();
        ledger.fail_mark_sent.store(true, Ordering::SeqCst);
        Arc::new(ledger)
    }
}

#[async_trait]
impl NotificationLedger for FlakyLedger {
    async fn insert(&self, entry: CreateLedgerEntry) -> Result<DbId, StoreError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("insert refused".into()));
        }
        self.inner.insert(entry).await
    }

    async fn mark_sent(&self, id: DbId) -> Result<(), StoreError> {
        if self.fail_mark_sent.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("update refused".into()));
        }
        self.inner.mark_sent(id).await
    }
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Settings store that fails every load of the listed types.
pub struct FailingSettings {
    pub inner: InMemorySettingsStore,
    pub failing: Vec<SettingType>,
}

#[async_trait]
impl SettingsStore for FailingSettings {
    async fn load(
        &self,
        setting_type: SettingType,
        user_id: UserId,
    ) -> Result<Option<Value>, StoreError> {
        if self.failing.contains(&setting_type) {
            return Err(StoreError::Unavailable("settings offline".into()));
        }
        self.inner.load(setting_type, user_id).await
    }

    async fn save(
        &self,
        setting_type: SettingType,
        user_id: UserId,
        document: &Value,
    ) -> Result<(), StoreError> {
        self.inner.save(setting_type, user_id, document).await
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Counts how often the current user was asked for.
pub struct CountingIdentity {
    pub user: Option<Identity>,
    pub calls: AtomicUsize,
}

impl CountingIdentity {
    pub fn new(user: Option<Identity>) -> Self {
        Self {
            user,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for CountingIdentity {
    async fn current_user(&self) -> Result<Option<Identity>, IdentityError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.user.clone())
    }
}

/// Identity provider that always errors.
pub struct BrokenIdentity;

#[async_trait]
impl IdentityProvider for BrokenIdentity {
    async fn current_user(&self) -> Result<Option<Identity>, IdentityError> {
        Err(IdentityError("auth service down".into()))
    }
}

// ---------------------------------------------------------------------------
// Harness
// ---------------------------------------------------------------------------

pub struct Harness {
    pub dispatcher: NotificationDispatcher,
    pub ledger: Arc<InMemoryLedger>,
    pub settings: Arc<InMemorySettingsStore>,
    pub email: Arc<ScriptedSender>,
    pub sms: Arc<ScriptedSender>,
}

/// Dispatcher over in-memory stores with the given sender scripts.
pub fn harness(settings: InMemorySettingsStore, email: Script, sms: Script) -> Harness {
    let ledger = Arc::new(InMemoryLedger::new());
    let settings = Arc::new(settings);
    let email = ScriptedSender::new(email);
    let sms = ScriptedSender::new(sms);
    let dispatcher = NotificationDispatcher::new(
        settings.clone(),
        ledger.clone(),
        email.clone(),
        sms.clone(),
    );
    Harness {
        dispatcher,
        ledger,
        settings,
        email,
        sms,
    }
}

/// Settings holding a client contact phone for [`user_id`].
pub fn settings_with_phone(phone: &str) -> InMemorySettingsStore {
    InMemorySettingsStore::new().with_document(
        user_id(),
        SettingType::ClientSettings,
        serde_json::json!({ "contactPhone": phone }),
    )
}
