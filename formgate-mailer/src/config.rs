//! Mail relay configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Mail dispatch configuration.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct MailerOptions {
    /// Whether mail dispatch is enabled.
    #[serde(default)]
    pub enabled: bool,
    /// HTTP mail relay endpoint URL.
    pub endpoint: Option<String>,
    /// Optional path to relay credentials file.
    pub credentials_path: Option<PathBuf>,
    /// Site-wide sender address, used when a block sets no `default_from`.
    pub default_from: Option<String>,
    /// Site-wide recipient address, used when a block sets no `default_to`.
    pub default_to: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailer_options_default() {
        let options = MailerOptions::default();
        assert!(!options.enabled);
        assert!(options.endpoint.is_none());
        assert!(options.credentials_path.is_none());
    }

    #[test]
    fn test_mailer_options_deserialization() {
        let options: MailerOptions = serde_json::from_str(
            r#"{
                "enabled": true,
                "endpoint": "https://relay.example.com/messages",
                "default_from": "site@example.com",
                "default_to": "editors@example.com"
            }"#,
        )
        .unwrap();

        assert!(options.enabled);
        assert_eq!(
            options.endpoint.as_deref(),
            Some("https://relay.example.com/messages")
        );
        assert_eq!(options.default_from.as_deref(), Some("site@example.com"));
        assert_eq!(options.default_to.as_deref(), Some("editors@example.com"));
    }

    #[test]
    fn test_mailer_options_serialization_roundtrip() {
        let options = MailerOptions {
            enabled: true,
            endpoint: Some("https://relay.example.com/messages".to_string()),
            credentials_path: Some(PathBuf::from("/etc/formgate/relay.json")),
            default_from: Some("site@example.com".to_string()),
            default_to: None,
        };

        let serialized = serde_json::to_string(&options).unwrap();
        let deserialized: MailerOptions = serde_json::from_str(&serialized).unwrap();
        assert_eq!(options, deserialized);
    }
}
