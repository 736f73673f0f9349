//! Outbound channel senders.
//!
//! Each sender exposes a single [`ChannelSender::send`] with three possible
//! outcomes: delivered, rejected by the provider ([`SendError::Rejected`]),
//! or never reached ([`SendError::Transport`]). The dispatcher maps these to
//! `ok`, `send-failed` and `send-error` respectively.

pub mod email;
pub mod sms;
pub mod smtp;

use async_trait::async_trait;
use campusgig_core::notification_type::NotificationType;
use serde::Serialize;

pub use email::HttpEmailSender;
pub use sms::HttpSmsSender;
pub use smtp::{EmailConfig, SmtpEmailSender};

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for channel delivery failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SendError {
    /// The provider answered and refused the message.
    #[error("Sender rejected the message{}", status_suffix(.status))]
    Rejected {
        status: Option<u16>,
        /// Parsed JSON error body, when the provider sent one.
        details: Option<serde_json::Value>,
    },

    /// The provider could not be reached or the call failed mid-flight.
    #[error("Sender unreachable: {0}")]
    Transport(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" with HTTP {s}")).unwrap_or_default()
}

impl From<reqwest::Error> for SendError {
    fn from(err: reqwest::Error) -> Self {
        SendError::Transport(err.to_string())
    }
}

// ---------------------------------------------------------------------------
// ChannelSender
// ---------------------------------------------------------------------------

/// One message addressed to one destination.
#[derive(Debug, Clone, Copy)]
pub struct OutboundMessage<'a> {
    /// Email address or phone number.
    pub to: &'a str,
    pub subject: &'a str,
    pub message: &'a str,
    pub notification_type: NotificationType,
}

#[async_trait]
pub trait ChannelSender: Send + Sync {
    async fn send(&self, message: &OutboundMessage<'_>) -> Result<(), SendError>;
}

/// Stand-in for a channel with no configured provider. Every send fails as
/// unreachable so the dispatcher still records a per-channel outcome.
#[derive(Debug, Clone)]
pub struct UnconfiguredSender {
    channel: &'static str,
}

impl UnconfiguredSender {
    pub fn new(channel: &'static str) -> Self {
        Self { channel }
    }
}

#[async_trait]
impl ChannelSender for UnconfiguredSender {
    async fn send(&self, _message: &OutboundMessage<'_>) -> Result<(), SendError> {
        tracing::warn!(channel = self.channel, "No sender configured for channel");
        Err(SendError::Transport(format!(
            "no sender configured for channel {}",
            self.channel
        )))
    }
}

// ---------------------------------------------------------------------------
// Shared HTTP helper
// ---------------------------------------------------------------------------

/// POST a JSON body and classify the response.
///
/// A 2xx status is success. Any other status is a rejection carrying the
/// response body as JSON when it parses, `None` otherwise.
pub(crate) async fn post_json<T: Serialize + ?Sized>(
    client: &reqwest::Client,
    url: &str,
    api_key: Option<&str>,
    body: &T,
) -> Result<(), SendError> {
    let mut request = client.post(url).json(body);
    if let Some(key) = api_key {
        request = request.bearer_auth(key);
    }

    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let details = response
        .text()
        .await
        .ok()
        .and_then(|text| serde_json::from_str::<serde_json::Value>(&text).ok());

    Err(SendError::Rejected {
        status: Some(status.as_u16()),
        details,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
