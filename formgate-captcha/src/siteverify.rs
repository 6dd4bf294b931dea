//! Shared siteverify wire protocol.
//!
//! Both supported providers speak the same protocol: a form-encoded POST of
//! `secret`, `response` and `remoteip`, answered with a JSON body carrying a
//! `success` flag and optional `error-codes`.

use formgate_core::captcha::{Error, Verification};
use serde::Deserialize;

#[derive(Deserialize, Debug)]
struct SiteverifyResponse {
    #[serde(default)]
    success: bool,
    #[serde(rename = "error-codes", default)]
    error_codes: Vec<String>,
}

impl From<SiteverifyResponse> for Verification {
    fn from(response: SiteverifyResponse) -> Self {
        Verification {
            is_valid: response.success,
            error_codes: response.error_codes,
        }
    }
}

/// Posts one verification request and decodes the outcome.
pub(crate) async fn post(
    client: &reqwest::Client,
    endpoint: &str,
    token: &str,
    private_key: &str,
    remote_ip: &str,
) -> Result<Verification, Error> {
    let params = [
        ("secret", private_key),
        ("response", token),
        ("remoteip", remote_ip),
    ];

    let response = client
        .post(endpoint)
        .form(&params)
        .send()
        .await
        .map_err(|e| Error::Transport(e.to_string()))?;

    let body: SiteverifyResponse = response
        .json()
        .await
        .map_err(|e| Error::Decode(e.to_string()))?;

    Ok(body.into())
}
