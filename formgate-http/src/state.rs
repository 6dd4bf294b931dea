//! Shared request-handling state.
//!
//! Holds the loaded documents and the capability objects every handler
//! needs: the record store, the captcha registry, and the optional mailer.

use crate::auth::Credentials;
use formgate_captcha::registry::CaptchaRegistry;
use formgate_core::block::Document;
use formgate_core::mailer::Mailer;
use formgate_core::store::FormDataStore;
use formgate_mailer::message::MailDefaults;
use std::collections::HashMap;
use std::sync::Arc;

/// Default public URL used to build `@id` links.
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";

/// Errors that can occur while building the state.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Missing required builder attribute: {}", _0)]
    MissingRequiredAttribute(String),
}

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded documents, by document id.
    pub documents: Arc<HashMap<String, Document>>,
    /// Record store adapter.
    pub store: Arc<dyn FormDataStore>,
    /// Captcha provider registry.
    pub captcha: Arc<CaptchaRegistry>,
    /// Optional mail dispatch adapter.
    pub mailer: Option<Arc<dyn Mailer>>,
    /// Site-wide sender/recipient fallbacks for notification mail.
    pub mail_defaults: MailDefaults,
    /// Optional editor credentials gating the read endpoints.
    pub editor_credentials: Option<Credentials>,
    /// Public base URL for `@id` links.
    pub public_url: String,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("documents", &self.documents.keys().collect::<Vec<_>>())
            .field("store", &"<FormDataStore>")
            .field("captcha", &self.captcha)
            .field("mailer", &self.mailer.as_ref().map(|_| "<Mailer>"))
            .field("public_url", &self.public_url)
            .finish()
    }
}

/// Builder for the handler state.
#[derive(Default)]
pub struct AppStateBuilder {
    documents: Option<HashMap<String, Document>>,
    store: Option<Arc<dyn FormDataStore>>,
    captcha: Option<Arc<CaptchaRegistry>>,
    mailer: Option<Arc<dyn Mailer>>,
    mail_defaults: MailDefaults,
    editor_credentials: Option<Credentials>,
    public_url: Option<String>,
}

impl AppStateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(mut self, documents: HashMap<String, Document>) -> Self {
        self.documents = Some(documents);
        self
    }

    pub fn store(mut self, store: Arc<dyn FormDataStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn captcha(mut self, captcha: Arc<CaptchaRegistry>) -> Self {
        self.captcha = Some(captcha);
        self
    }

    pub fn mailer(mut self, mailer: Option<Arc<dyn Mailer>>) -> Self {
        self.mailer = mailer;
        self
    }

    pub fn mail_defaults(mut self, defaults: MailDefaults) -> Self {
        self.mail_defaults = defaults;
        self
    }

    pub fn editor_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.editor_credentials = credentials;
        self
    }

    pub fn public_url(mut self, url: String) -> Self {
        self.public_url = Some(url);
        self
    }

    pub fn build(self) -> Result<AppState, Error> {
        Ok(AppState {
            documents: Arc::new(
                self.documents
                    .ok_or_else(|| Error::MissingRequiredAttribute("documents".to_string()))?,
            ),
            store: self
                .store
                .ok_or_else(|| Error::MissingRequiredAttribute("store".to_string()))?,
            captcha: self
                .captcha
                .ok_or_else(|| Error::MissingRequiredAttribute("captcha".to_string()))?,
            mailer: self.mailer,
            mail_defaults: self.mail_defaults,
            editor_credentials: self.editor_credentials,
            public_url: self
                .public_url
                .unwrap_or_else(|| DEFAULT_PUBLIC_URL.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formgate_captcha::config::CaptchaOptions;
    use formgate_store::memory::MemoryStore;

    #[test]
    fn test_builder_missing_documents() {
        let result = AppStateBuilder::new()
            .store(Arc::new(MemoryStore::new()))
            .captcha(Arc::new(CaptchaRegistry::with_providers(
                CaptchaOptions::default(),
                vec![],
            )))
            .build();

        assert!(matches!(
            result.unwrap_err(),
            Error::MissingRequiredAttribute(attr) if attr == "documents"
        ));
    }

    #[test]
    fn test_builder_defaults() {
        let state = AppStateBuilder::new()
            .documents(HashMap::new())
            .store(Arc::new(MemoryStore::new()))
            .captcha(Arc::new(CaptchaRegistry::with_providers(
                CaptchaOptions::default(),
                vec![],
            )))
            .build()
            .unwrap();

        assert_eq!(state.public_url, DEFAULT_PUBLIC_URL);
        assert!(state.mailer.is_none());
        assert!(state.editor_credentials.is_none());
    }
}
