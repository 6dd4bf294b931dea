//! Captcha provider settings.
//!
//! One public/private key pair per provider, registered site-wide in the
//! application configuration. A block that selects a provider whose section
//! is absent hits a configuration error, not a runtime fault.

use serde::{Deserialize, Serialize};

/// Per-provider captcha settings sections.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct CaptchaOptions {
    /// Google reCAPTCHA key pair.
    pub recaptcha: Option<ProviderKeys>,
    /// hCaptcha key pair.
    pub hcaptcha: Option<ProviderKeys>,
}

impl CaptchaOptions {
    /// Returns the settings section registered for `provider`, if any.
    pub fn keys_for(&self, provider: &str) -> Option<&ProviderKeys> {
        match provider {
            crate::recaptcha::PROVIDER_ID => self.recaptcha.as_ref(),
            crate::hcaptcha::PROVIDER_ID => self.hcaptcha.as_ref(),
            _ => None,
        }
    }
}

/// Key pair for one captcha provider.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct ProviderKeys {
    /// Site (public) key, served to the client widget.
    pub public_key: Option<String>,
    /// Secret (private) key, used for server-side verification.
    pub private_key: Option<String>,
}

impl ProviderKeys {
    /// The private key, if set and non-empty.
    pub fn private_key(&self) -> Option<&str> {
        self.private_key.as_deref().filter(|key| !key.is_empty())
    }
}
