//! Provider lookup and settings gating.
//!
//! Resolves the provider a block selects and enforces the configuration
//! preconditions: the provider's settings section must be registered and its
//! private key must be set before any token can be verified.

use crate::config::CaptchaOptions;
use crate::{hcaptcha::Hcaptcha, recaptcha::Recaptcha};
use formgate_core::captcha::CaptchaProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// Configuration errors raised while resolving a provider.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// No settings section is registered for the selected provider.
    #[error(
        "Settings for captcha provider `{provider}` define a field `{field}`, \
         for which there is no record"
    )]
    SettingsNotRegistered {
        provider: String,
        field: &'static str,
    },
    /// The settings section exists but carries no private key.
    #[error(
        "No {provider} private key configured. \
         Go to the [captcha.{provider}] settings section to configure."
    )]
    PrivateKeyNotConfigured { provider: String },
}

/// Registry of captcha providers and their settings.
pub struct CaptchaRegistry {
    providers: HashMap<&'static str, Arc<dyn CaptchaProvider>>,
    settings: CaptchaOptions,
}

impl CaptchaRegistry {
    /// Creates a registry with the built-in providers.
    pub fn new(settings: CaptchaOptions, client: reqwest::Client) -> Self {
        Self::with_providers(
            settings,
            vec![
                Arc::new(Recaptcha::new(client.clone())),
                Arc::new(Hcaptcha::new(client)),
            ],
        )
    }

    /// Creates a registry with an explicit provider set.
    pub fn with_providers(
        settings: CaptchaOptions,
        providers: Vec<Arc<dyn CaptchaProvider>>,
    ) -> Self {
        let providers = providers.into_iter().map(|p| (p.id(), p)).collect();
        CaptchaRegistry {
            providers,
            settings,
        }
    }

    /// Resolves the provider selected by a block along with its private key.
    ///
    /// An unknown provider string is indistinguishable from an unregistered
    /// settings section: no record can exist for it.
    pub fn resolve(&self, provider: &str) -> Result<(Arc<dyn CaptchaProvider>, String), Error> {
        let keys = self.settings.keys_for(provider).ok_or_else(|| {
            Error::SettingsNotRegistered {
                provider: provider.to_string(),
                field: "public_key",
            }
        })?;

        let adapter =
            self.providers
                .get(provider)
                .cloned()
                .ok_or_else(|| Error::SettingsNotRegistered {
                    provider: provider.to_string(),
                    field: "public_key",
                })?;

        let private_key = keys
            .private_key()
            .ok_or_else(|| Error::PrivateKeyNotConfigured {
                provider: provider.to_string(),
            })?;

        Ok((adapter, private_key.to_string()))
    }
}

impl std::fmt::Debug for CaptchaRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptchaRegistry")
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
