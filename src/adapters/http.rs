use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::InboxConfig;
use crate::fetch::MessageSource;
use crate::types::error::InboxError;
use crate::types::EmailMessage;

/// `MessageSource` backed by the remote HTTP message API
pub struct HttpMessageSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpMessageSource {
    /// Create a source against the endpoint described by the config
    pub fn new(config: &InboxConfig) -> Result<Self, InboxError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent("compos-inbox/0.1 (Inbox Engine)")
            .build()?;

        Ok(Self {
            client,
            endpoint: config.emails_url(),
        })
    }

    /// The endpoint this source fetches from
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MessageSource for HttpMessageSource {
    async fn fetch_messages(&self) -> Result<Vec<EmailMessage>, InboxError> {
        debug!("Fetching messages from {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!("Message API at {} returned {}", self.endpoint, status);
            return Err(InboxError::Status(status));
        }

        let body = response.text().await?;
        let messages: Vec<EmailMessage> = serde_json::from_str(&body)?;

        debug!("Received {} messages", messages.len());
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_built_from_config() {
        let config = InboxConfig {
            base_url: "http://localhost:8000".into(),
            ..InboxConfig::default()
        };
        let source = HttpMessageSource::new(&config).unwrap();
        assert_eq!(source.endpoint(), "http://localhost:8000/emails/");
    }
}
