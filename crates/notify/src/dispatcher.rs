//! Notification dispatch engine.
//!
//! [`NotificationDispatcher`] delivers one logical notification across the
//! requested channels. Channels are processed one after another in request
//! order, and each channel is an isolated unit of work:
//!
//! 1. unknown channel name → `channel-unknown`, no I/O;
//! 2. destination address missing → `no-email` / `no-phone`, no ledger row;
//! 3. ledger insert (`queued`) fails → `db-insert-failed`, nothing sent;
//! 4. sender call → `ok`, `send-failed` or `send-error`;
//! 5. on success the row moves to `sent`; failure to record that is logged
//!    and discarded.
//!
//! Failed sends leave their row `queued`. Rows are never marked failed.

use std::sync::Arc;

use campusgig_core::channels::Channel;
use campusgig_core::dispatch::{ChannelOutcome, ContactInfo, DispatchOptions, FailureReason};
use campusgig_core::notification_type::NotificationType;
use campusgig_core::preferences::{channels_for_type, enabled_channels_union, ChannelPreferences};
use campusgig_core::settings::SettingType;
use campusgig_core::types::UserId;
use campusgig_db::models::ledger::CreateLedgerEntry;
use serde_json::Value;

use crate::contact::resolve_contact;
use crate::delivery::{ChannelSender, OutboundMessage, SendError};
use crate::identity::IdentityProvider;
use crate::ledger::NotificationLedger;
use crate::settings::SettingsStore;

/// Subject of the confirmation sent after a preference change.
pub const PREFERENCE_TEST_SUBJECT: &str = "CampusGig notification settings updated";

/// Body of the confirmation sent after a preference change.
pub const PREFERENCE_TEST_MESSAGE: &str =
    "This is a test notification confirming your notification preferences.";

/// Delivers notifications through the configured channel senders.
///
/// Cheap to share behind an `Arc`; holds no per-user state. The current
/// user is supplied to every call as an [`IdentityProvider`].
pub struct NotificationDispatcher {
    settings: Arc<dyn SettingsStore>,
    ledger: Arc<dyn NotificationLedger>,
    email: Arc<dyn ChannelSender>,
    sms: Arc<dyn ChannelSender>,
}

impl NotificationDispatcher {
    pub fn new(
        settings: Arc<dyn SettingsStore>,
        ledger: Arc<dyn NotificationLedger>,
        email: Arc<dyn ChannelSender>,
        sms: Arc<dyn ChannelSender>,
    ) -> Self {
        Self {
            settings,
            ledger,
            email,
            sms,
        }
    }

    /// The settings store this dispatcher reads preferences and phones from.
    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.settings
    }

    /// Dispatch one notification to an explicit list of channels.
    ///
    /// Returns one outcome per requested channel, in request order.
    /// Duplicates are processed independently. An empty channel list or an
    /// unauthenticated caller yields an empty result.
    pub async fn dispatch<S: AsRef<str>>(
        &self,
        identity: &dyn IdentityProvider,
        notification_type: NotificationType,
        channels: &[S],
        opts: &DispatchOptions,
    ) -> Vec<ChannelOutcome> {
        if channels.is_empty() {
            return Vec::new();
        }

        let contact = resolve_contact(identity, self.settings.as_ref()).await;
        let Some(user_id) = contact.user_id else {
            tracing::debug!(
                notification_type = %notification_type,
                "No authenticated user, skipping dispatch"
            );
            return Vec::new();
        };

        let subject = opts
            .subject
            .clone()
            .unwrap_or_else(|| notification_type.default_subject());
        let message = opts
            .message
            .clone()
            .unwrap_or_else(|| notification_type.default_message());

        let mut results = Vec::with_capacity(channels.len());
        for requested in channels {
            let requested = requested.as_ref();
            let outcome = match requested.parse::<Channel>() {
                Ok(channel) => {
                    self.deliver(
                        user_id,
                        &contact,
                        channel,
                        notification_type,
                        &subject,
                        &message,
                    )
                    .await
                }
                Err(_) => {
                    tracing::warn!(channel = requested, "Unknown channel requested");
                    ChannelOutcome::failed(requested, FailureReason::ChannelUnknown)
                }
            };
            results.push(outcome);
        }

        let delivered = results.iter().filter(|r| r.ok).count();
        tracing::info!(
            user_id = %user_id,
            notification_type = %notification_type,
            requested = results.len(),
            delivered,
            "Notification dispatched"
        );

        results
    }

    /// Resolve channels from a preference document, then dispatch.
    ///
    /// When no channel is enabled the identity provider is not consulted.
    pub async fn notify_with_prefs(
        &self,
        identity: &dyn IdentityProvider,
        notification_type: NotificationType,
        prefs: Option<&ChannelPreferences>,
        opts: &DispatchOptions,
    ) -> Vec<ChannelOutcome> {
        let channels = channels_for_type(prefs, notification_type);
        if channels.is_empty() {
            return Vec::new();
        }
        self.dispatch(identity, notification_type, &channels, opts)
            .await
    }

    /// Load the caller's saved preferences, then dispatch.
    ///
    /// Documents are tried in order: `setting_type` when given, then
    /// `client_settings`, then `student_settings`. The first non-empty one
    /// wins.
    pub async fn notify_from_saved(
        &self,
        identity: &dyn IdentityProvider,
        notification_type: NotificationType,
        setting_type: Option<SettingType>,
        opts: &DispatchOptions,
    ) -> Vec<ChannelOutcome> {
        let user = match identity.current_user().await {
            Ok(user) => user,
            Err(e) => {
                tracing::warn!(error = %e, "Identity lookup failed, no preferences loaded");
                None
            }
        };

        let prefs = match user {
            Some(user) => self.load_saved_preferences(user.user_id, setting_type).await,
            None => None,
        };

        self.notify_with_prefs(identity, notification_type, prefs.as_ref(), opts)
            .await
    }

    /// Send a fixed `jobUpdates` notification to every channel enabled
    /// anywhere in `prefs`, confirming that a settings change took effect.
    pub async fn send_preference_test(
        &self,
        identity: &dyn IdentityProvider,
        prefs: &ChannelPreferences,
    ) -> Vec<ChannelOutcome> {
        let channels = enabled_channels_union(prefs);
        if channels.is_empty() {
            return Vec::new();
        }

        let opts = DispatchOptions::default()
            .with_subject(PREFERENCE_TEST_SUBJECT)
            .with_message(PREFERENCE_TEST_MESSAGE);
        self.dispatch(identity, NotificationType::JobUpdates, &channels, &opts)
            .await
    }

    async fn load_saved_preferences(
        &self,
        user_id: UserId,
        requested: Option<SettingType>,
    ) -> Option<ChannelPreferences> {
        let mut candidates: Vec<SettingType> = requested.into_iter().collect();
        for fallback in SettingType::PREFERENCE_SOURCES {
            if !candidates.contains(&fallback) {
                candidates.push(fallback);
            }
        }

        for setting_type in candidates {
            match self.settings.load(setting_type, user_id).await {
                Ok(Some(document)) if !is_blank(&document) => {
                    return Some(ChannelPreferences::from_document(&document));
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        user_id = %user_id,
                        setting_type = %setting_type,
                        error = %e,
                        "Failed to load preference document"
                    );
                }
            }
        }

        None
    }

    /// One channel's unit of work. Every failure becomes an outcome.
    async fn deliver(
        &self,
        user_id: UserId,
        contact: &ContactInfo,
        channel: Channel,
        notification_type: NotificationType,
        subject: &str,
        message: &str,
    ) -> ChannelOutcome {
        let (destination, sender, missing) = match channel {
            Channel::Email => (&contact.email, &self.email, FailureReason::NoEmail),
            Channel::Sms => (&contact.phone, &self.sms, FailureReason::NoPhone),
        };

        let Some(to) = destination.as_deref() else {
            return ChannelOutcome::failed(channel.as_str(), missing);
        };

        let entry = CreateLedgerEntry {
            user_id,
            channel: channel.as_str().to_string(),
            notification_type: notification_type.as_str().to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
            meta: serde_json::json!({ "to": to }),
        };

        let ledger_id = match self.ledger.insert(entry).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    channel = %channel,
                    error = %e,
                    "Failed to create ledger row, not sending"
                );
                return ChannelOutcome::failed(channel.as_str(), FailureReason::DbInsertFailed);
            }
        };

        let outbound = OutboundMessage {
            to,
            subject,
            message,
            notification_type,
        };

        match sender.send(&outbound).await {
            Ok(()) => {
                if let Err(e) = self.ledger.mark_sent(ledger_id).await {
                    tracing::warn!(
                        ledger_id,
                        channel = %channel,
                        error = %e,
                        "Sent, but failed to mark ledger row as sent"
                    );
                }
                ChannelOutcome::sent(channel.as_str())
            }
            Err(SendError::Rejected { status, details }) => {
                tracing::warn!(
                    ledger_id,
                    channel = %channel,
                    ?status,
                    "Sender rejected notification"
                );
                ChannelOutcome::failed(channel.as_str(), FailureReason::SendFailed)
                    .with_details(details)
            }
            Err(SendError::Transport(e)) => {
                tracing::warn!(ledger_id, channel = %channel, error = %e, "Sender unreachable");
                ChannelOutcome::failed(channel.as_str(), FailureReason::SendError)
            }
        }
    }
}

/// `null` and `{}` count as "nothing saved".
fn is_blank(document: &Value) -> bool {
    match document {
        Value::Null => true,
        Value::Object(obj) => obj.is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn blank_documents() {
        assert!(is_blank(&json!(null)));
        assert!(is_blank(&json!({})));
        assert!(!is_blank(&json!({ "jobUpdates": { "email": true } })));
    }
}
