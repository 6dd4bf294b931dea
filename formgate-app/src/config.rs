//! Application configuration structures.
//!
//! Provides configuration structures for the main application and the
//! per-file document definitions it discovers. Supports deserialization
//! from YAML and JSON files.

use formgate_captcha::config::CaptchaOptions;
use formgate_core::block::Document;
use formgate_mailer::config::MailerOptions;
use formgate_store::config::StoreOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration.
#[derive(PartialEq, Clone, Debug, Deserialize, Serialize)]
pub struct AppConfig {
    /// Document discovery options.
    pub documents: DocumentOptions,
    /// Optional HTTP server configuration.
    pub http_server: Option<HttpServerOptions>,
    /// Optional record store configuration (defaults to the memory store).
    pub store: Option<StoreOptions>,
    /// Optional captcha provider settings.
    pub captcha: Option<CaptchaOptions>,
    /// Optional mail dispatch configuration.
    pub mailer: Option<MailerOptions>,
    /// Public base URL used to build `@id` links.
    pub public_url: Option<String>,
    /// Optional path to editor credentials gating the read endpoints.
    pub editor_credentials_path: Option<PathBuf>,
}

/// Document definition discovery.
#[derive(PartialEq, Clone, Debug, Deserialize, Serialize)]
pub struct DocumentOptions {
    /// Glob pattern for discovering document definition files.
    pub dir: Option<PathBuf>,
}

/// HTTP server configuration options.
#[derive(PartialEq, Clone, Debug, Deserialize, Serialize)]
pub struct HttpServerOptions {
    /// Optional HTTP server port number (defaults to 3000).
    pub port: Option<u16>,
    /// Optional path prefix for all routes (e.g. "/forms").
    pub routes_prefix: Option<String>,
}

/// Top-level configuration for an individual document definition file.
#[derive(PartialEq, Clone, Debug, Deserialize, Serialize)]
pub struct DocumentConfig {
    /// The document definition.
    pub document: Document,
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgate_store::config::StoreType;

    #[test]
    fn test_app_config_deserialization() {
        let config: AppConfig = serde_json::from_str(
            r#"{
                "documents": {"dir": "/etc/formgate/documents/*.yaml"},
                "http_server": {"port": 8080, "routes_prefix": "/forms"},
                "store": {"type": "file", "path": "/var/lib/formgate/records.jsonl"},
                "captcha": {"recaptcha": {"public_key": "public", "private_key": "private"}},
                "public_url": "https://forms.example.com"
            }"#,
        )
        .unwrap();

        assert_eq!(
            config.documents.dir,
            Some(PathBuf::from("/etc/formgate/documents/*.yaml"))
        );
        assert_eq!(config.http_server.as_ref().unwrap().port, Some(8080));
        assert_eq!(
            config.store.as_ref().unwrap().store_type,
            StoreType::File
        );
        assert!(config.captcha.as_ref().unwrap().recaptcha.is_some());
        assert!(config.mailer.is_none());
    }

    #[test]
    fn test_app_config_minimal() {
        let config: AppConfig = serde_json::from_str(r#"{"documents": {}}"#).unwrap();
        assert!(config.documents.dir.is_none());
        assert!(config.http_server.is_none());
        assert!(config.store.is_none());
    }

    #[test]
    fn test_app_config_serialization_roundtrip() {
        let config = AppConfig {
            documents: DocumentOptions {
                dir: Some(PathBuf::from("/documents/*.json")),
            },
            http_server: Some(HttpServerOptions {
                port: Some(3000),
                routes_prefix: None,
            }),
            store: Some(StoreOptions::default()),
            captcha: None,
            mailer: None,
            public_url: None,
            editor_credentials_path: Some(PathBuf::from("/etc/formgate/editors.json")),
        };

        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: AppConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_document_config_deserialization() {
        let config: DocumentConfig = serde_json::from_str(
            r#"{
                "document": {
                    "id": "contact-page",
                    "title": "Contact",
                    "blocks": {
                        "form-id": {
                            "@type": "form",
                            "send": true,
                            "captcha": "hcaptcha"
                        }
                    }
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.document.id, "contact-page");
        assert!(config.document.form_block("form-id").is_some());
    }
}
