//! Channel sender configuration.

use std::sync::Arc;
use std::time::Duration;

use campusgig_core::channels::{CHANNEL_EMAIL, CHANNEL_SMS};

use crate::delivery::{
    ChannelSender, EmailConfig, HttpEmailSender, HttpSmsSender, SmtpEmailSender,
    UnconfiguredSender,
};

/// Default HTTP timeout for a single sender call.
const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 10;

/// Where email and SMS deliveries go.
#[derive(Debug, Clone, Default)]
pub struct DeliveryConfig {
    /// HTTP endpoint accepting `{ to, subject, html }`.
    pub email_endpoint: Option<String>,
    /// HTTP endpoint accepting `{ to, subject, message, type }`.
    pub sms_endpoint: Option<String>,
    /// Bearer token sent to both endpoints, if set.
    pub api_key: Option<String>,
    /// Per-request timeout for the HTTP senders.
    pub timeout_secs: u64,
    /// SMTP fallback for email when no endpoint is set.
    pub smtp: Option<EmailConfig>,
}

/// The two channel senders handed to the dispatcher.
pub struct Senders {
    pub email: Arc<dyn ChannelSender>,
    pub sms: Arc<dyn ChannelSender>,
}

/// Error building senders from configuration.
#[derive(Debug, thiserror::Error)]
pub enum DeliveryConfigError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Failed to build SMTP transport: {0}")]
    Smtp(#[from] crate::delivery::smtp::EmailError),
}

impl DeliveryConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `EMAIL_ENDPOINT_URL`    | no       | --      |
    /// | `SMS_ENDPOINT_URL`      | no       | --      |
    /// | `DELIVERY_API_KEY`      | no       | --      |
    /// | `DELIVERY_TIMEOUT_SECS` | no       | `10`    |
    ///
    /// SMTP settings are read by [`EmailConfig::from_env`].
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());

        Self {
            email_endpoint: non_empty("EMAIL_ENDPOINT_URL"),
            sms_endpoint: non_empty("SMS_ENDPOINT_URL"),
            api_key: non_empty("DELIVERY_API_KEY"),
            timeout_secs: std::env::var("DELIVERY_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_DELIVERY_TIMEOUT_SECS),
            smtp: EmailConfig::from_env(),
        }
    }

    /// Build the email and SMS senders.
    ///
    /// Email prefers the HTTP endpoint, then SMTP. A channel with neither
    /// gets an [`UnconfiguredSender`].
    pub fn build_senders(&self) -> Result<Senders, DeliveryConfigError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()?;

        let email: Arc<dyn ChannelSender> = match (&self.email_endpoint, &self.smtp) {
            (Some(url), _) => Arc::new(HttpEmailSender::new(
                client.clone(),
                url.clone(),
                self.api_key.clone(),
            )),
            (None, Some(smtp)) => Arc::new(SmtpEmailSender::new(smtp)?),
            (None, None) => {
                tracing::warn!("No email endpoint or SMTP host configured");
                Arc::new(UnconfiguredSender::new(CHANNEL_EMAIL))
            }
        };

        let sms: Arc<dyn ChannelSender> = match &self.sms_endpoint {
            Some(url) => Arc::new(HttpSmsSender::new(client, url.clone(), self.api_key.clone())),
            None => {
                tracing::warn!("No SMS endpoint configured");
                Arc::new(UnconfiguredSender::new(CHANNEL_SMS))
            }
        };

        Ok(Senders { email, sms })
    }
}
