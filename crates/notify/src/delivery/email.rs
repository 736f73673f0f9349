//! Email delivery through an HTTP email endpoint.
//!
//! The endpoint accepts `{ "to", "subject", "html" }` and answers 2xx on
//! success or a non-2xx status with an optional JSON error body.

use async_trait::async_trait;
use serde::Serialize;

use super::{post_json, ChannelSender, OutboundMessage, SendError};

#[derive(Debug, Serialize)]
struct EmailPayload<'a> {
    to: &'a str,
    subject: &'a str,
    html: String,
}

/// Sends notification emails by POSTing to the email endpoint.
#[derive(Debug, Clone)]
pub struct HttpEmailSender {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpEmailSender {
    pub fn new(client: reqwest::Client, url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl ChannelSender for HttpEmailSender {
    async fn send(&self, message: &OutboundMessage<'_>) -> Result<(), SendError> {
        let payload = EmailPayload {
            to: message.to,
            subject: message.subject,
            html: render_html(message.message),
        };
        post_json(&self.client, &self.url, self.api_key.as_deref(), &payload).await?;
        tracing::info!(
            notification_type = %message.notification_type,
            "Notification email accepted by endpoint"
        );
        Ok(())
    }
}

/// Wrap plain message text in a paragraph, escaping markup.
pub fn render_html(message: &str) -> String {
    let mut escaped = String::with_capacity(message.len() + 7);
    for ch in message.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            '\n' => escaped.push_str("<br>"),
            other => escaped.push(other),
        }
    }
    format!("<p>{escaped}</p>")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_html_escapes_markup() {
        assert_eq!(
            render_html("<b>Tom & Jerry</b>"),
            "<p>&lt;b&gt;Tom &amp; Jerry&lt;/b&gt;</p>"
        );
    }

    #[test]
    fn render_html_keeps_line_breaks() {
        assert_eq!(render_html("a\nb"), "<p>a<br>b</p>");
    }
}
