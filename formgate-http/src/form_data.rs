//! Stored submission listing endpoint.
//!
//! Returns every stored record as a JSON item: the record's attributes plus
//! an injected `id` field carrying the record's identity.

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Json, Path, State};
use axum::http::HeaderMap;
use formgate_core::record::StoredRecord;
use serde_json::{json, Value};

/// `GET /{document_id}/@form-data`
pub async fn form_data(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    auth::validate(&state.editor_credentials, &headers)?;

    if !state.documents.contains_key(&document_id) {
        return Err(ApiError::not_found(format!(
            "Document `{document_id}` not found"
        )));
    }

    let records = state.store.search().await?;
    let items: Vec<Value> = records.iter().map(expand_record).collect();

    Ok(Json(json!({
        "@id": format!(
            "{}/{}/@form-data",
            state.public_url.trim_end_matches('/'),
            document_id
        ),
        "items": items,
        "items_total": items.len(),
    })))
}

/// A record as a listing item: its attributes plus the `id` field.
pub(crate) fn expand_record(record: &StoredRecord) -> Value {
    let mut data = record.attrs.clone();
    data.insert("id".to_string(), Value::from(record.intid));
    Value::Object(data)
}
