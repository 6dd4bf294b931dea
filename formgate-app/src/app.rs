//! Application assembly and startup.
//!
//! Discovers document definitions, builds the configured store, captcha
//! registry and mailer, and runs the HTTP server.

use crate::config::{AppConfig, DocumentConfig};
use config::Config;
use formgate_captcha::registry::CaptchaRegistry;
use formgate_core::block::Document;
use formgate_core::mailer::Mailer;
use formgate_core::store::FormDataStore;
use formgate_http::auth::Credentials;
use formgate_http::server::ServerBuilder;
use formgate_http::state::AppStateBuilder;
use formgate_mailer::client::RelayMailerBuilder;
use formgate_mailer::message::MailDefaults;
use formgate_store::config::{StoreOptions, StoreType};
use formgate_store::file::FileStore;
use formgate_store::memory::MemoryStore;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Errors that can occur during application execution.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Invalid glob pattern provided for document discovery.
    #[error("Invalid glob pattern: {source}")]
    Pattern {
        #[source]
        source: glob::PatternError,
    },
    /// Document directory path is invalid or cannot be converted to string.
    #[error("Invalid path")]
    InvalidPath,
    /// The file store backend was selected without a data file path.
    #[error("Store type `file` requires a `path`")]
    MissingStorePath,
    /// Record store error.
    #[error(transparent)]
    Store(#[from] formgate_core::store::Error),
    /// Mail relay client construction error.
    #[error(transparent)]
    Mailer(#[from] formgate_mailer::client::Error),
    /// Editor credentials loading error.
    #[error(transparent)]
    Auth(#[from] formgate_http::auth::Error),
    /// Handler state construction error.
    #[error(transparent)]
    State(#[from] formgate_http::state::Error),
    /// HTTP server error.
    #[error(transparent)]
    Server(#[from] formgate_http::server::Error),
    /// Outbound HTTP client construction error.
    #[error("Failed to build HTTP client: {source}")]
    HttpClient {
        #[source]
        source: reqwest::Error,
    },
}

/// Main application that wires components and serves requests.
pub struct App {
    /// Global application configuration.
    pub config: AppConfig,
}

impl App {
    /// Discovers, parses, builds and serves.
    #[tracing::instrument(skip(self), name = "app")]
    pub async fn start(self) -> Result<(), Error> {
        let glob_pattern = self
            .config
            .documents
            .dir
            .as_ref()
            .and_then(|path| path.to_str())
            .ok_or(Error::InvalidPath)?;

        let documents = load_documents(glob_pattern)?;
        info!("Loaded {} document(s)", documents.len());

        let store = build_store(self.config.store.clone().unwrap_or_default())?;

        let client = reqwest::ClientBuilder::new()
            .build()
            .map_err(|source| Error::HttpClient { source })?;

        let captcha = Arc::new(CaptchaRegistry::new(
            self.config.captcha.clone().unwrap_or_default(),
            client.clone(),
        ));

        let (mailer, mail_defaults) = match &self.config.mailer {
            Some(options) if options.enabled => {
                let relay = RelayMailerBuilder::new()
                    .endpoint(options.endpoint.clone().ok_or_else(|| {
                        Error::Mailer(formgate_mailer::client::Error::MissingRequiredAttribute(
                            "endpoint".to_string(),
                        ))
                    })?)
                    .credentials_path(options.credentials_path.clone())
                    .client(client)
                    .build()?;
                let defaults = MailDefaults {
                    from: options.default_from.clone(),
                    to: options.default_to.clone(),
                };
                (Some(Arc::new(relay) as Arc<dyn Mailer>), defaults)
            }
            _ => (None, MailDefaults::default()),
        };

        let editor_credentials = match &self.config.editor_credentials_path {
            Some(path) => Some(Credentials::load(path)?),
            None => None,
        };

        let mut state_builder = AppStateBuilder::new()
            .documents(documents)
            .store(store)
            .captcha(captcha)
            .mailer(mailer)
            .mail_defaults(mail_defaults)
            .editor_credentials(editor_credentials);

        if let Some(public_url) = &self.config.public_url {
            state_builder = state_builder.public_url(public_url.clone());
        }

        let http_options = self.config.http_server.as_ref();
        let server = ServerBuilder::new()
            .state(state_builder.build()?)
            .port(http_options.and_then(|options| options.port))
            .routes_prefix(http_options.and_then(|options| options.routes_prefix.clone()))
            .build()?;

        server.start().await.map_err(Error::Server)
    }
}

/// Discovers and parses document definition files.
///
/// Unreadable or malformed files are logged and skipped; a duplicate
/// document id keeps the first definition seen.
fn load_documents(glob_pattern: &str) -> Result<HashMap<String, Document>, Error> {
    let mut documents: HashMap<String, Document> = HashMap::new();

    for path in glob::glob(glob_pattern).map_err(|e| Error::Pattern { source: e })? {
        let path = match path {
            Ok(path) => path,
            Err(e) => {
                error!("Failed to read document path: {}. Skipping.", e);
                continue;
            }
        };

        info!("Loading document: {:?}", path);
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                error!(
                    "Failed to read document file {:?}: {}. Skipping this document.",
                    path, e
                );
                continue;
            }
        };

        // Determine file format from extension.
        let file_format = match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => config::FileFormat::Yaml,
            Some("json") => config::FileFormat::Json,
            _ => config::FileFormat::Json,
        };

        let parsed = Config::builder()
            .add_source(config::File::from_str(&contents, file_format))
            .build()
            .and_then(|c| c.try_deserialize::<DocumentConfig>());

        match parsed {
            Ok(document_config) => {
                let document = document_config.document;
                if documents.contains_key(&document.id) {
                    warn!(
                        "Duplicate document id `{}` in {:?}; keeping the first definition.",
                        document.id, path
                    );
                    continue;
                }
                documents.insert(document.id.clone(), document);
            }
            Err(e) => {
                error!(
                    "Failed to parse document config {:?}: {}. Skipping this document.",
                    path, e
                );
            }
        }
    }

    Ok(documents)
}

/// Builds the configured record store adapter.
fn build_store(options: StoreOptions) -> Result<Arc<dyn FormDataStore>, Error> {
    match options.store_type {
        StoreType::Memory => Ok(Arc::new(MemoryStore::new())),
        StoreType::File => {
            let path = options.path.ok_or(Error::MissingStorePath)?;
            Ok(Arc::new(FileStore::open(path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_documents_from_directory() {
        let dir = tempfile::tempdir().unwrap();

        let mut yaml = std::fs::File::create(dir.path().join("contact.yaml")).unwrap();
        write!(
            yaml,
            "document:\n  id: contact-page\n  blocks:\n    form-id:\n      \"@type\": form\n      send: true\n"
        )
        .unwrap();

        let mut json = std::fs::File::create(dir.path().join("feedback.json")).unwrap();
        write!(
            json,
            r#"{{"document": {{"id": "feedback-page", "blocks": {{}}}}}}"#
        )
        .unwrap();

        let pattern = format!("{}/*", dir.path().display());
        let documents = load_documents(&pattern).unwrap();

        assert_eq!(documents.len(), 2);
        assert!(documents["contact-page"].form_block("form-id").is_some());
        assert!(documents.contains_key("feedback-page"));
    }

    #[test]
    fn test_load_documents_skips_malformed_files() {
        let dir = tempfile::tempdir().unwrap();

        let mut bad = std::fs::File::create(dir.path().join("bad.json")).unwrap();
        write!(bad, "{{not json").unwrap();

        let mut good = std::fs::File::create(dir.path().join("good.json")).unwrap();
        write!(good, r#"{{"document": {{"id": "good", "blocks": {{}}}}}}"#).unwrap();

        let pattern = format!("{}/*", dir.path().display());
        let documents = load_documents(&pattern).unwrap();

        assert_eq!(documents.len(), 1);
        assert!(documents.contains_key("good"));
    }

    #[test]
    fn test_load_documents_invalid_pattern() {
        let result = load_documents("[");
        assert!(matches!(result.unwrap_err(), Error::Pattern { .. }));
    }

    #[test]
    fn test_build_store_memory_default() {
        let store = build_store(StoreOptions::default());
        assert!(store.is_ok());
    }

    #[test]
    fn test_build_store_file_requires_path() {
        let options = StoreOptions {
            store_type: StoreType::File,
            path: None,
        };
        assert!(matches!(
            build_store(options).err().unwrap(),
            Error::MissingStorePath
        ));
    }

    #[test]
    fn test_build_store_file() {
        let dir = tempfile::tempdir().unwrap();
        let options = StoreOptions {
            store_type: StoreType::File,
            path: Some(dir.path().join("records.jsonl")),
        };
        assert!(build_store(options).is_ok());
    }
}
