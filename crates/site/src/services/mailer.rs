//! Email delivery API client.
//!
//! Delivers contact-form submissions through an HTTP JSON email API. The
//! client is optional: a site without mailer credentials runs fine, the
//! contact action just reports the service as unconfigured.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use crate::config::MailerConfig;

/// Errors that can occur when delivering email.
#[derive(Debug, Error)]
pub enum MailerError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client or request.
    #[error("Client error: {0}")]
    Client(String),
}

/// An outgoing message.
#[derive(Debug, Serialize)]
struct OutgoingMessage<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: &'a str,
    text: &'a str,
}

/// Email delivery API client.
#[derive(Clone)]
pub struct MailerClient {
    client: reqwest::Client,
    api_url: String,
    from_address: String,
    to_address: String,
}

impl MailerClient {
    /// Create a new mailer client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &MailerConfig) -> Result<Self, MailerError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| MailerError::Client(format!("Invalid API key format: {e}")))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            from_address: config.from_address.clone(),
            to_address: config.to_address.clone(),
        })
    }

    /// Deliver a contact-form submission to the configured recipient.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or is rejected.
    pub async fn send_contact_message(
        &self,
        reply_to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), MailerError> {
        let message = OutgoingMessage {
            from: &self.from_address,
            to: &self.to_address,
            reply_to,
            subject,
            text: body,
        };

        let response = self
            .client
            .post(&self.api_url)
            .json(&message)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MailerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(subject, "contact message delivered");
        Ok(())
    }
}
