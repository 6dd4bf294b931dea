//! Captcha provider capability.
//!
//! Providers validate a client-supplied token against an external
//! verification service. Concrete adapters live in the `formgate-captcha`
//! crate; all of them are polymorphic over the same `verify` operation.

use async_trait::async_trait;

/// Errors that can occur while talking to a verification service.
///
/// A failed *verification* is not an error: it comes back as
/// `Verification { is_valid: false, .. }`. These variants cover transport
/// and protocol failures only.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The verification request could not be delivered.
    #[error("Captcha verification request failed: {0}")]
    Transport(String),
    /// The verification service answered with an undecodable body.
    #[error("Captcha verification response could not be decoded: {0}")]
    Decode(String),
}

/// Outcome of a token verification call.
#[derive(PartialEq, Clone, Debug, Default)]
pub struct Verification {
    /// Whether the service accepted the token.
    pub is_valid: bool,
    /// Service-reported error codes, if any.
    pub error_codes: Vec<String>,
}

/// Trait for captcha verification services.
#[async_trait]
pub trait CaptchaProvider: Send + Sync {
    /// Stable provider identifier used by block configuration to select it.
    fn id(&self) -> &'static str;

    /// Verifies a token with the provider's service.
    async fn verify(
        &self,
        token: &str,
        private_key: &str,
        remote_ip: &str,
    ) -> Result<Verification, Error>;
}
