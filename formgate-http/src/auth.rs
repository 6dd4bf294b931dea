//! Editor authentication for the read endpoints.
//!
//! Credentials are loaded from a JSON file at startup and checked against
//! the `Authorization` header of listing and export requests. When no
//! credentials are configured the endpoints are open.

use axum::http::HeaderMap;
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur during authentication.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Failed to read credentials file at {path} with error: {source}")]
    ReadCredentials {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON serialization/deserialization failed with error: {source}")]
    SerdeJson {
        #[source]
        source: serde_json::Error,
    },
    #[error("No authorization header provided")]
    NoCredentials,
    #[error("Invalid authorization credentials")]
    InvalidCredentials,
    #[error("Malformed authorization header")]
    MalformedCredentials,
}

/// Authentication credentials for the read endpoints.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct Credentials {
    /// Bearer token for the authorization header.
    pub bearer_auth: Option<String>,
    /// Basic authentication credentials.
    pub basic_auth: Option<BasicAuth>,
}

/// Basic authentication username and password.
#[derive(PartialEq, Clone, Debug, Default, Deserialize, Serialize)]
pub struct BasicAuth {
    /// Username for basic authentication.
    pub username: String,
    /// Password for basic authentication.
    pub password: String,
}

impl Credentials {
    /// Loads credentials from a JSON file.
    pub fn load(path: &Path) -> Result<Credentials, Error> {
        let content = fs::read_to_string(path).map_err(|e| Error::ReadCredentials {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| Error::SerdeJson { source: e })
    }
}

/// Validates configured credentials against incoming request headers.
pub fn validate(credentials: &Option<Credentials>, headers: &HeaderMap) -> Result<(), Error> {
    let credentials = match credentials {
        Some(creds) => creds,
        None => return Ok(()),
    };

    let auth_header = match headers.get("authorization") {
        Some(header) => header,
        None => return Err(Error::NoCredentials),
    };

    let auth_value = match auth_header.to_str() {
        Ok(value) => value,
        Err(_) => return Err(Error::MalformedCredentials),
    };

    // Check bearer authentication.
    if let Some(expected_token) = &credentials.bearer_auth {
        match auth_value.strip_prefix("Bearer ") {
            Some(token) if token == expected_token => return Ok(()),
            Some(_) => return Err(Error::InvalidCredentials),
            None => {}
        }
    }

    // Check basic authentication.
    if let Some(basic_auth) = &credentials.basic_auth {
        if let Some(encoded) = auth_value.strip_prefix("Basic ") {
            match STANDARD.decode(encoded) {
                Ok(decoded_bytes) => match String::from_utf8(decoded_bytes) {
                    Ok(decoded_str) => {
                        let expected = format!("{}:{}", basic_auth.username, basic_auth.password);
                        return match decoded_str == expected {
                            true => Ok(()),
                            false => Err(Error::InvalidCredentials),
                        };
                    }
                    Err(_) => return Err(Error::MalformedCredentials),
                },
                Err(_) => return Err(Error::MalformedCredentials),
            }
        }
    }
    Err(Error::InvalidCredentials)
}
