//! Delivery channel names and the [`Channel`] enum.
//!
//! The string constants must match the values stored in the
//! `notification_ledger.channel` column and accepted by the API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Email delivered through the configured email sender.
pub const CHANNEL_EMAIL: &str = "email";

/// Text message delivered through the configured SMS sender.
pub const CHANNEL_SMS: &str = "sms";

/// A delivery mechanism, independent of the provider behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
}

impl Channel {
    /// Every channel, in the fixed order used for resolution output.
    pub const ALL: [Channel; 2] = [Channel::Email, Channel::Sms];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Email => CHANNEL_EMAIL,
            Channel::Sms => CHANNEL_SMS,
        }
    }
}

impl AsRef<str> for Channel {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name a known channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown channel: {0}")]
pub struct UnknownChannel(pub String);

impl FromStr for Channel {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            CHANNEL_EMAIL => Ok(Channel::Email),
            CHANNEL_SMS => Ok(Channel::Sms),
            other => Err(UnknownChannel(other.to_string())),
        }
    }
}
