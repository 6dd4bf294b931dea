//! Notification message composition.
//!
//! Builds the notification mail for an accepted submission from the form
//! block configuration and the submitted fields. Subject, sender and
//! recipient fall back from block configuration to the site-wide defaults;
//! subblocks flagged `use_as_bcc` contribute the submitted value of their
//! field as a BCC recipient.

use formgate_core::block::{FormBlock, SubBlock};
use formgate_core::convert::value_to_cell;
use formgate_core::mailer::MailMessage;
use formgate_core::submission::SubmittedField;

/// Subject used when neither the block nor the site configures one.
pub const DEFAULT_SUBJECT: &str = "Form submission";

/// Errors that can occur while composing a message.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Neither the block nor the site configuration names a sender.
    #[error("No sender address configured: set the block `default_from` or the mailer `default_from`")]
    MissingSender,
    /// Neither the block nor the site configuration names a recipient.
    #[error("No recipient address configured: set the block `default_to` or the mailer `default_to`")]
    MissingRecipient,
}

/// Site-wide sender/recipient fallbacks.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct MailDefaults {
    pub from: Option<String>,
    pub to: Option<String>,
}

/// Composes the notification message for one submission.
pub fn compose(
    block: &FormBlock,
    fields: &[SubmittedField],
    defaults: &MailDefaults,
) -> Result<MailMessage, Error> {
    let from = block
        .default_from
        .clone()
        .or_else(|| defaults.from.clone())
        .ok_or(Error::MissingSender)?;
    let to = block
        .default_to
        .clone()
        .or_else(|| defaults.to.clone())
        .ok_or(Error::MissingRecipient)?;
    let subject = block
        .default_subject
        .clone()
        .unwrap_or_else(|| DEFAULT_SUBJECT.to_string());

    let body = fields
        .iter()
        .filter_map(|field| {
            field
                .key()
                .map(|key| format!("{}: {}", key, value_to_cell(&field.value)))
        })
        .collect::<Vec<_>>()
        .join("\n");

    let bcc = block
        .subblocks
        .iter()
        .filter(|subblock| subblock.use_as_bcc)
        .filter_map(|subblock| bcc_address(subblock, fields))
        .collect();

    Ok(MailMessage {
        from,
        to: vec![to],
        bcc,
        subject,
        body,
    })
}

/// The submitted value of the subblock's field, when present and non-empty.
fn bcc_address(subblock: &SubBlock, fields: &[SubmittedField]) -> Option<String> {
    fields
        .iter()
        .find(|field| {
            field.field_id.as_deref() == Some(subblock.field_id.as_str())
                || field.label.as_deref() == Some(subblock.field_id.as_str())
                || (subblock.label.is_some() && field.label == subblock.label)
        })
        .and_then(|field| field.value.as_str())
        .filter(|address| !address.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn block() -> FormBlock {
        serde_json::from_value(json!({
            "default_subject": "block subject",
            "default_from": "john@doe.com",
            "default_to": "editors@example.com",
            "send": true,
            "subblocks": [
                {"field_id": "contact", "field_type": "from", "use_as_bcc": true}
            ]
        }))
        .unwrap()
    }

    fn fields(values: serde_json::Value) -> Vec<SubmittedField> {
        serde_json::from_value(values).unwrap()
    }

    #[test]
    fn test_compose_uses_block_configuration() {
        let message = compose(
            &block(),
            &fields(json!([{"label": "Message", "value": "just want to say hi"}])),
            &MailDefaults::default(),
        )
        .unwrap();

        assert_eq!(message.from, "john@doe.com");
        assert_eq!(message.to, vec!["editors@example.com"]);
        assert_eq!(message.subject, "block subject");
        assert_eq!(message.body, "Message: just want to say hi");
        assert!(message.bcc.is_empty());
    }

    #[test]
    fn test_compose_collects_bcc_from_flagged_field() {
        let message = compose(
            &block(),
            &fields(json!([
                {"label": "Message", "value": "hi"},
                {"field_id": "contact", "label": "Contact", "value": "visitor@example.com"}
            ])),
            &MailDefaults::default(),
        )
        .unwrap();

        assert_eq!(message.bcc, vec!["visitor@example.com"]);
    }

    #[test]
    fn test_compose_skips_empty_bcc_value() {
        let message = compose(
            &block(),
            &fields(json!([
                {"field_id": "contact", "value": ""}
            ])),
            &MailDefaults::default(),
        )
        .unwrap();

        assert!(message.bcc.is_empty());
    }

    #[test]
    fn test_compose_falls_back_to_site_defaults() {
        let block: FormBlock = serde_json::from_value(json!({"send": true})).unwrap();
        let defaults = MailDefaults {
            from: Some("site@example.com".to_string()),
            to: Some("inbox@example.com".to_string()),
        };

        let message = compose(&block, &[], &defaults).unwrap();
        assert_eq!(message.from, "site@example.com");
        assert_eq!(message.to, vec!["inbox@example.com"]);
        assert_eq!(message.subject, DEFAULT_SUBJECT);
    }

    #[test]
    fn test_compose_without_sender_fails() {
        let block: FormBlock = serde_json::from_value(json!({"send": true})).unwrap();
        let defaults = MailDefaults {
            from: None,
            to: Some("inbox@example.com".to_string()),
        };

        assert!(matches!(
            compose(&block, &[], &defaults),
            Err(Error::MissingSender)
        ));
    }

    #[test]
    fn test_compose_without_recipient_fails() {
        let block: FormBlock = serde_json::from_value(json!({"send": true})).unwrap();
        let defaults = MailDefaults {
            from: Some("site@example.com".to_string()),
            to: None,
        };

        assert!(matches!(
            compose(&block, &[], &defaults),
            Err(Error::MissingRecipient)
        ));
    }

    #[test]
    fn test_body_renders_one_line_per_field() {
        let message = compose(
            &block(),
            &fields(json!([
                {"label": "Message", "value": "hi"},
                {"label": "Age", "value": 42}
            ])),
            &MailDefaults::default(),
        )
        .unwrap();

        assert_eq!(message.body, "Message: hi\nAge: 42");
    }
}
