//! HTTP client for the Pushover message API.

use std::time::Duration;

use offerwatch_core::PushoverCredentials;
use reqwest::Client;

use crate::error::NotifyError;

const DEFAULT_ENDPOINT: &str = "https://api.pushover.net/1/messages.json";

/// What happened to a delivery attempt that did not error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    Sent,
    /// No credentials configured — the notifier is a no-op.
    SkippedNoCredentials,
}

/// Push client for offer notifications.
///
/// Built once at startup from optional credentials. Use
/// [`PushoverNotifier::with_endpoint`] to point at a mock server in tests.
pub struct PushoverNotifier {
    client: Client,
    credentials: Option<PushoverCredentials>,
    endpoint: String,
}

impl PushoverNotifier {
    /// Creates a notifier pointed at the production Pushover API.
    ///
    /// `credentials: None` produces a disabled notifier whose deliveries are
    /// logged no-ops, so the scan pipeline runs unchanged without keys.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        credentials: Option<PushoverCredentials>,
        timeout_secs: u64,
    ) -> Result<Self, NotifyError> {
        Self::with_endpoint(credentials, timeout_secs, DEFAULT_ENDPOINT)
    }

    /// Creates a notifier with a custom endpoint (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_endpoint(
        credentials: Option<PushoverCredentials>,
        timeout_secs: u64,
        endpoint: &str,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        if credentials.is_none() {
            tracing::warn!("push credentials not configured; notifications are disabled");
        }

        Ok(Self {
            client,
            credentials,
            endpoint: endpoint.to_owned(),
        })
    }

    /// True when credentials are configured and deliveries will be attempted.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.credentials.is_some()
    }

    /// Sends one offer notification.
    ///
    /// The message body combines the price line and the listing title; the
    /// listing URL rides along as the message's outbound link.
    ///
    /// # Errors
    ///
    /// - [`NotifyError::Http`] — network failure or timeout.
    /// - [`NotifyError::UnexpectedStatus`] — non-2xx response from the API.
    pub async fn notify_offer(
        &self,
        title: &str,
        price_text: &str,
        link: &str,
    ) -> Result<Delivery, NotifyError> {
        let Some(credentials) = &self.credentials else {
            tracing::debug!(title, "skipping notification — no credentials");
            return Ok(Delivery::SkippedNoCredentials);
        };

        let message = format!("{price_text}\n{title}");
        let params = [
            ("token", credentials.api_token.as_str()),
            ("user", credentials.user_key.as_str()),
            ("message", message.as_str()),
            ("title", "New offer detected"),
            ("url", link),
        ];

        let response = self.client.post(&self.endpoint).form(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::UnexpectedStatus {
                status: status.as_u16(),
            });
        }

        tracing::info!(title, "notification sent");
        Ok(Delivery::Sent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials() -> PushoverCredentials {
        PushoverCredentials {
            api_token: "app-token".to_string(),
            user_key: "user-key".to_string(),
        }
    }

    #[tokio::test]
    async fn notifier_without_credentials_is_disabled_noop() {
        let notifier =
            PushoverNotifier::new(None, 10).expect("failed to build disabled notifier");
        assert!(!notifier.is_enabled());

        let delivery = notifier
            .notify_offer("Mountain Bike", "$45.000", "https://example.com/item/1")
            .await
            .expect("no-op delivery must not error");
        assert_eq!(delivery, Delivery::SkippedNoCredentials);
    }

    #[tokio::test]
    async fn notifier_with_credentials_is_enabled() {
        let notifier = PushoverNotifier::new(Some(credentials()), 10)
            .expect("failed to build enabled notifier");
        assert!(notifier.is_enabled());
    }
}
