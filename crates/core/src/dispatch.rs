//! Value types exchanged with the notification dispatcher.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Ledger status of a freshly inserted row.
pub const STATUS_QUEUED: &str = "queued";

/// Ledger status after the channel sender confirmed delivery.
pub const STATUS_SENT: &str = "sent";

/// Contact details of the current user, recomputed for every dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub user_id: Option<UserId>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Caller overrides for the message content. Unset fields fall back to the
/// notification type's templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    pub subject: Option<String>,
    pub message: Option<String>,
}

impl DispatchOptions {
    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Why a single channel of a dispatch did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    /// `email` was requested but the user has no email address.
    NoEmail,
    /// `sms` was requested but the user has no phone number.
    NoPhone,
    /// The ledger row could not be created; nothing was sent.
    DbInsertFailed,
    /// The sender answered with a failure.
    SendFailed,
    /// The sender could not be reached.
    SendError,
    /// The requested channel name is not recognised.
    ChannelUnknown,
}

impl FailureReason {
    pub fn as_str(self) -> &'static str {
        match self {
            FailureReason::NoEmail => "no-email",
            FailureReason::NoPhone => "no-phone",
            FailureReason::DbInsertFailed => "db-insert-failed",
            FailureReason::SendFailed => "send-failed",
            FailureReason::SendError => "send-error",
            FailureReason::ChannelUnknown => "channel-unknown",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one requested channel within a dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelOutcome {
    /// The channel exactly as requested, including unrecognised names.
    pub channel: String,
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<FailureReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ChannelOutcome {
    pub fn sent(channel: impl Into<String>) -> Self {
        Self {
            channel: channel.into(),
            ok: true,
            reason: None,
            details: None,
        }
    }

    pub fn failed(channel: impl Into<String>, reason: FailureReason) -> Self {
        Self {
            channel: channel.into(),
            ok: false,
            reason: Some(reason),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Option<serde_json::Value>) -> Self {
        self.details = details;
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn successful_outcome_omits_reason_and_details() {
        let json = serde_json::to_value(ChannelOutcome::sent("email")).unwrap();
        assert_eq!(json, json!({ "channel": "email", "ok": true }));
    }

    #[test]
    fn failure_reason_uses_kebab_case() {
        let outcome = ChannelOutcome::failed("sms", FailureReason::DbInsertFailed);
        let json = serde_json::to_value(outcome).unwrap();
        assert_eq!(json["reason"], "db-insert-failed");
    }

    #[test]
    fn reason_display_matches_serde() {
        for reason in [
            FailureReason::NoEmail,
            FailureReason::NoPhone,
            FailureReason::DbInsertFailed,
            FailureReason::SendFailed,
            FailureReason::SendError,
            FailureReason::ChannelUnknown,
        ] {
            assert_eq!(
                serde_json::to_value(reason).unwrap(),
                json!(reason.to_string())
            );
        }
    }
}
