//! Mail dispatch capability.
//!
//! The mail host is an external collaborator; this module defines the
//! message shape and the sending trait. The relay adapter lives in the
//! `formgate-mailer` crate.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Errors that can occur during mail dispatch.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The relay request could not be delivered.
    #[error("Mail relay request failed: {0}")]
    Transport(String),
    /// The relay answered with a non-success status.
    #[error("Mail relay rejected message with status {0}")]
    Rejected(u16),
}

/// A notification message composed from a form submission.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct MailMessage {
    /// Sender address.
    pub from: String,
    /// Primary recipient addresses.
    pub to: Vec<String>,
    /// Blind-carbon-copy recipient addresses.
    #[serde(default)]
    pub bcc: Vec<String>,
    /// Message subject.
    pub subject: String,
    /// Plain-text message body.
    pub body: String,
}

/// Trait for mail dispatch services.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Dispatches a message to the mail host.
    async fn send(&self, message: &MailMessage) -> Result<(), Error>;
}
