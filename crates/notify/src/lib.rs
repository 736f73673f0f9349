//! CampusGig notification dispatch.
//!
//! This crate turns a logical notification into per-channel deliveries:
//!
//! - [`NotificationDispatcher`] -- the core loop: contact resolution, one
//!   ledger row per channel, sender invocation, ledger reconciliation.
//! - [`contact`] -- resolves the current user's email and phone.
//! - [`delivery`] -- outbound channel senders (HTTP endpoints, SMTP).
//! - [`ledger`], [`settings`], [`identity`] -- collaborator traits with
//!   PostgreSQL-backed implementations where applicable.
//! - [`memory`] -- in-process store implementations for tests and local runs.

pub mod config;
pub mod contact;
pub mod delivery;
pub mod dispatcher;
pub mod error;
pub mod identity;
pub mod ledger;
pub mod memory;
pub mod settings;

pub use config::DeliveryConfig;
pub use delivery::{ChannelSender, OutboundMessage, SendError};
pub use dispatcher::NotificationDispatcher;
pub use error::{IdentityError, StoreError};
pub use identity::{Identity, IdentityProvider};
pub use ledger::{NotificationLedger, PgNotificationLedger};
pub use settings::{PgSettingsStore, SettingsStore};
