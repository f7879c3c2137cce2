//! HTTP mail-API client for digest delivery.

use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

/// Configuration for connecting to the mail API.
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// Mail API address, e.g. `"http://localhost:8025"`.
    pub addr: String,

    /// API authentication token.
    pub token: String,

    /// Sender address for all outgoing mail.
    pub sender: String,
}

/// Errors that can occur while sending mail.
#[derive(Debug, Error)]
pub enum MailerError {
    /// HTTP transport failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The mail API answered with a non-success status.
    #[error("unexpected mail API response: {0}")]
    UnexpectedResponse(String),
}

/// Outgoing mail delivery.
#[automock]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a plain-text message.
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError>;
}

#[derive(Debug, Serialize)]
struct MailMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// HTTP JSON client for the mail API.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    config: MailerConfig,
    http: Client,
}

impl HttpMailer {
    /// Create a new client from the given configuration.
    #[must_use]
    pub fn new(config: MailerConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailerError> {
        let url = format!("{}/v1/messages", self.config.addr);

        let message = MailMessage {
            from: &self.config.sender,
            to,
            subject,
            body,
        };

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.token)
            .json(&message)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();

            return Err(MailerError::UnexpectedResponse(format!(
                "send failed with status {status}: {text}"
            )));
        }

        Ok(())
    }
}
