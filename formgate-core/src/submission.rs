//! Submission payload types.
//!
//! The wire shape accepted by the submission endpoint: a list of
//! label/value pairs, the id of the form block being submitted to, and an
//! optional captcha token.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Body of a form submission request.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct SubmitPayload {
    /// Submitted field values.
    #[serde(default)]
    pub data: Vec<SubmittedField>,
    /// Id of the form block on the target document.
    pub block_id: String,
    /// Optional captcha token.
    pub captcha: Option<CaptchaToken>,
}

/// One submitted field.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct SubmittedField {
    /// Display label of the field.
    pub label: Option<String>,
    /// Submitted value.
    #[serde(default)]
    pub value: Value,
    /// Field identifier from the block configuration.
    pub field_id: Option<String>,
}

impl SubmittedField {
    /// The key this field is stored under: the label, falling back to the
    /// field id.
    pub fn key(&self) -> Option<&str> {
        self.label.as_deref().or(self.field_id.as_deref())
    }
}

/// Client-supplied captcha token.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct CaptchaToken {
    pub token: String,
}

impl SubmitPayload {
    /// Extracts the record attributes from the submitted fields, in
    /// submission order. Fields with neither label nor field id are skipped.
    pub fn attrs(&self) -> Map<String, Value> {
        let mut attrs = Map::new();
        for field in &self.data {
            if let Some(key) = field.key() {
                attrs.insert(key.to_string(), field.value.clone());
            }
        }
        attrs
    }
}
