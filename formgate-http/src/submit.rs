//! Form submission endpoint.
//!
//! Accepts a JSON submission for one form block on a document, gates it on
//! the block's captcha provider, optionally dispatches the notification
//! mail, and persists the record. Success is `204 No Content`; every
//! failure carries a `{message, type}` body.

use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{ConnectInfo, Json, Path, State};
use axum::http::{HeaderMap, StatusCode};
use formgate_core::submission::SubmitPayload;
use formgate_mailer::message;
use std::net::SocketAddr;
use tracing::info;

/// Message returned when a captcha-gated submission carries no token.
pub const NO_TOKEN_MESSAGE: &str = "No captcha token provided.";
/// Message returned when the verification service rejects the token.
pub const WRONG_CODE_MESSAGE: &str = "The code you entered was wrong, please enter the new one.";

/// `POST /{document_id}/@submit-form`
pub async fn submit_form(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Json(payload): Json<SubmitPayload>,
) -> Result<StatusCode, ApiError> {
    let document = state
        .documents
        .get(&document_id)
        .ok_or_else(|| ApiError::not_found(format!("Document `{document_id}` not found")))?;

    let block = document.form_block(&payload.block_id).ok_or_else(|| {
        ApiError::bad_request(format!(
            "Block `{}` on document `{document_id}` is not a form block",
            payload.block_id
        ))
    })?;

    // Captcha gate: configuration errors before input errors, one
    // verification call per attempt.
    if let Some(provider_id) = &block.captcha {
        let (provider, private_key) = state.captcha.resolve(provider_id)?;

        let token = payload
            .captcha
            .as_ref()
            .map(|captcha| captcha.token.as_str())
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::bad_request(NO_TOKEN_MESSAGE))?;

        let remote_ip = remote_ip(&headers, addr);
        let verification = provider.verify(token, &private_key, &remote_ip).await?;
        if !verification.is_valid {
            return Err(ApiError::bad_request(WRONG_CODE_MESSAGE));
        }
    }

    let attrs = payload.attrs();
    if attrs.is_empty() {
        return Err(ApiError::bad_request("Empty form data"));
    }

    // Mail dispatch precedes the store write: a failed dispatch must not
    // leave a stored record behind.
    if block.send {
        if let Some(mailer) = &state.mailer {
            let mail = message::compose(block, &payload.data, &state.mail_defaults)?;
            mailer.send(&mail).await?;
        }
    }

    let record = state.store.create(attrs).await?;
    info!(
        "Accepted submission {} for block {} on document {}",
        record.intid, payload.block_id, document_id
    );
    Ok(StatusCode::NO_CONTENT)
}

/// The caller's address: the first `X-Forwarded-For` hop when present,
/// otherwise the socket peer.
fn remote_ip(headers: &HeaderMap, addr: SocketAddr) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| addr.ip().to_string())
}
