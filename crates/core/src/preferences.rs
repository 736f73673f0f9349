//! Saved per-user channel preferences and the resolver that turns them into
//! a concrete channel list.
//!
//! Preference documents are free-form JSON saved by the settings pages, so
//! parsing is lenient: anything that is not a recognisable toggle is treated
//! as "disabled" rather than rejected.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::channels::Channel;
use crate::notification_type::NotificationType;

/// Name of the nested object that holds toggles inside a settings document.
pub const NOTIFICATIONS_FIELD: &str = "notifications";

/// Channel toggles for one preference key. Absent means disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ChannelToggle {
    pub email: bool,
    pub sms: bool,
}

impl ChannelToggle {
    /// Read `{ email?, sms? }` from a JSON object using JSON truthiness.
    /// Non-object values yield an all-disabled toggle.
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(obj) => Self {
                email: obj.get("email").is_some_and(is_truthy),
                sms: obj.get("sms").is_some_and(is_truthy),
            },
            None => Self::default(),
        }
    }

    pub fn is_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Email => self.email,
            Channel::Sms => self.sms,
        }
    }

    /// Enabled channels in the fixed order `email`, `sms`.
    pub fn channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|c| self.is_enabled(*c))
            .collect()
    }
}

/// Mapping from preference key (e.g. `"jobUpdates"`) to channel toggles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ChannelPreferences {
    entries: BTreeMap<String, ChannelToggle>,
}

impl ChannelPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder used when assembling preferences in code.
    pub fn with(mut self, key: impl Into<String>, toggle: ChannelToggle) -> Self {
        self.entries.insert(key.into(), toggle);
        self
    }

    /// Build preferences from a saved settings document.
    ///
    /// If the document carries a `notifications` object, that object holds
    /// the toggles; otherwise the top-level object does. Entries whose value
    /// is not an object are skipped.
    pub fn from_document(document: &Value) -> Self {
        let source = document
            .get(NOTIFICATIONS_FIELD)
            .filter(|v| v.is_object())
            .unwrap_or(document);

        let entries = source
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter(|(_, v)| v.is_object())
                    .map(|(k, v)| (k.clone(), ChannelToggle::from_value(v)))
                    .collect()
            })
            .unwrap_or_default();

        Self { entries }
    }

    pub fn get(&self, key: &str) -> Option<&ChannelToggle> {
        self.entries.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ChannelToggle)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Channels that should receive a notification of the given type.
///
/// A missing document or key resolves to no channels. Output order is
/// always `email` before `sms`.
pub fn channels_for_type(
    prefs: Option<&ChannelPreferences>,
    notification_type: NotificationType,
) -> Vec<Channel> {
    prefs
        .and_then(|p| p.get(notification_type.preference_key()))
        .copied()
        .unwrap_or_default()
        .channels()
}

/// Channels enabled by at least one key of the document, `email` first.
pub fn enabled_channels_union(prefs: &ChannelPreferences) -> Vec<Channel> {
    Channel::ALL
        .into_iter()
        .filter(|c| prefs.iter().any(|(_, toggle)| toggle.is_enabled(*c)))
        .collect()
}

/// JSON truthiness: `false`, `null`, `0` and `""` are falsy, everything
/// else (including empty arrays and objects) is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
