//! HTTP mail relay client.
//!
//! Posts composed messages as JSON to a configured relay endpoint,
//! optionally authenticating with a bearer token loaded from a credentials
//! file at build time.

use async_trait::async_trait;
use formgate_core::mailer::{Error as MailerError, MailMessage, Mailer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Relay authentication credentials.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct Credentials {
    /// Bearer token for the relay's authorization header.
    pub bearer_auth: Option<String>,
}

/// Errors that can occur while building the relay client.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Failed to read credentials file at {path} with error: {source}")]
    ReadCredentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON serialization/deserialization failed with error: {source}")]
    SerdeJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("Missing required builder attribute: {}", _0)]
    MissingRequiredAttribute(String),
}

/// Mail dispatch through an HTTP relay.
#[derive(Clone, Debug)]
pub struct RelayMailer {
    client: reqwest::Client,
    endpoint: String,
    credentials: Option<Credentials>,
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, message: &MailMessage) -> Result<(), MailerError> {
        let mut request = self.client.post(&self.endpoint).json(message);

        if let Some(token) = self
            .credentials
            .as_ref()
            .and_then(|credentials| credentials.bearer_auth.as_ref())
        {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MailerError::Rejected(response.status().as_u16()));
        }

        info!("Dispatched notification mail to {}", message.to.join(", "));
        Ok(())
    }
}

/// Builder for the relay mailer.
#[derive(Debug, Default)]
pub struct RelayMailerBuilder {
    endpoint: Option<String>,
    credentials_path: Option<PathBuf>,
    client: Option<reqwest::Client>,
}

impl RelayMailerBuilder {
    pub fn new() -> RelayMailerBuilder {
        RelayMailerBuilder {
            ..Default::default()
        }
    }

    pub fn endpoint(mut self, endpoint: String) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    pub fn credentials_path(mut self, path: Option<PathBuf>) -> Self {
        self.credentials_path = path;
        self
    }

    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the mailer, loading relay credentials if a path is configured.
    pub fn build(self) -> Result<RelayMailer, Error> {
        let credentials = match &self.credentials_path {
            Some(path) => {
                let content = fs::read_to_string(path).map_err(|e| Error::ReadCredentials {
                    path: path.clone(),
                    source: e,
                })?;
                Some(serde_json::from_str(&content).map_err(|e| Error::SerdeJson { source: e })?)
            }
            None => None,
        };

        Ok(RelayMailer {
            client: self.client.unwrap_or_default(),
            endpoint: self
                .endpoint
                .ok_or_else(|| Error::MissingRequiredAttribute("endpoint".to_string()))?,
            credentials,
        })
    }
}
