//! SMS delivery through an HTTP SMS endpoint.
//!
//! The endpoint accepts `{ "to", "subject", "message", "type" }` with the
//! same success/failure contract as the email endpoint.

use async_trait::async_trait;
use campusgig_core::notification_type::NotificationType;
use serde::Serialize;

use super::{post_json, ChannelSender, OutboundMessage, SendError};

#[derive(Debug, Serialize)]
struct SmsPayload<'a> {
    to: &'a str,
    subject: &'a str,
    message: &'a str,
    #[serde(rename = "type")]
    notification_type: NotificationType,
}

/// Sends text messages by POSTing to the SMS endpoint.
#[derive(Debug, Clone)]
pub struct HttpSmsSender {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpSmsSender {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl ChannelSender for HttpSmsSender {
    async fn send(&self, message: &OutboundMessage<'_>) -> Result<(), SendError> {
        let payload = SmsPayload {
            to: message.to,
            subject: message.subject,
            message: message.message,
            notification_type: message.notification_type,
        };
        post_json(&self.client, &self.url, self.api_key.as_deref(), &payload).await?;
        tracing::info!(
            notification_type = %message.notification_type,
            "Notification SMS accepted by endpoint"
        );
        Ok(())
    }
}
