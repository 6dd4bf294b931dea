//! hCaptcha provider adapter.

use crate::siteverify;
use async_trait::async_trait;
use formgate_core::captcha::{CaptchaProvider, Error, Verification};

/// Provider selector used by block configuration.
pub const PROVIDER_ID: &str = "hcaptcha";

const VERIFY_ENDPOINT: &str = "https://api.hcaptcha.com/siteverify";

/// hCaptcha verification service client.
#[derive(Clone, Debug)]
pub struct Hcaptcha {
    client: reqwest::Client,
    endpoint: String,
}

impl Hcaptcha {
    /// Creates a client against the production verification endpoint.
    pub fn new(client: reqwest::Client) -> Self {
        Hcaptcha {
            client,
            endpoint: VERIFY_ENDPOINT.to_string(),
        }
    }

    /// Creates a client against a custom verification endpoint.
    pub fn with_endpoint(client: reqwest::Client, endpoint: String) -> Self {
        Hcaptcha { client, endpoint }
    }
}

#[async_trait]
impl CaptchaProvider for Hcaptcha {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn verify(
        &self,
        token: &str,
        private_key: &str,
        remote_ip: &str,
    ) -> Result<Verification, Error> {
        siteverify::post(&self.client, &self.endpoint, token, private_key, remote_ip).await
    }
}
