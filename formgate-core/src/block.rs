//! Document and block configuration model.
//!
//! Documents are the content objects forms are embedded in. Each document
//! carries a map of block id to block; only `form` blocks accept
//! submissions. Block configuration determines validation (captcha
//! provider), persistence (field labels), and delivery (send flag, subject,
//! sender, BCC fields) behavior at submission time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A content document holding blocks.
#[derive(PartialEq, Clone, Debug, Deserialize, Serialize)]
pub struct Document {
    /// Unique document identifier, used as the URL path segment.
    pub id: String,
    /// Optional human-readable title.
    pub title: Option<String>,
    /// Blocks embedded in this document, by block id.
    #[serde(default)]
    pub blocks: HashMap<String, Block>,
}

impl Document {
    /// Returns the form block with the given id, if any.
    pub fn form_block(&self, block_id: &str) -> Option<&FormBlock> {
        match self.blocks.get(block_id) {
            Some(Block::Form(form)) => Some(form),
            _ => None,
        }
    }
}

/// A configurable content fragment embedded in a document.
///
/// Dispatch is on the `@type` discriminator; non-form block types are
/// preserved but carry no submission behavior.
#[derive(PartialEq, Clone, Debug, Deserialize, Serialize)]
#[serde(tag = "@type")]
pub enum Block {
    /// A form block accepting visitor submissions.
    #[serde(rename = "form")]
    Form(FormBlock),
    /// Any other block type.
    #[serde(other)]
    Other,
}

/// Configuration of a single form block.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct FormBlock {
    /// Default subject for notification mail.
    pub default_subject: Option<String>,
    /// Default sender address for notification mail.
    pub default_from: Option<String>,
    /// Default recipient address for notification mail.
    pub default_to: Option<String>,
    /// Whether an accepted submission triggers a notification mail.
    #[serde(default)]
    pub send: bool,
    /// Field-level configuration entries.
    #[serde(default)]
    pub subblocks: Vec<SubBlock>,
    /// Captcha provider selector (e.g. "recaptcha", "hcaptcha").
    pub captcha: Option<String>,
}

/// Field-level configuration within a form block.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct SubBlock {
    /// Field identifier.
    pub field_id: String,
    /// Field widget type.
    pub field_type: Option<String>,
    /// Whether the submitted value of this field is a BCC recipient address.
    #[serde(default)]
    pub use_as_bcc: bool,
    /// Optional display label.
    pub label: Option<String>,
}
