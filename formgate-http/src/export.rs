//! CSV export endpoint.
//!
//! Serializes all stored records to a CSV file attachment. The column set
//! is the union of attribute keys across records in first-seen order;
//! records missing a column render an empty cell there.

use crate::auth;
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use formgate_core::convert::value_to_cell;
use formgate_core::record::StoredRecord;

/// View name; the downloaded file is named after it.
pub const VIEW_NAME: &str = "form-data-export";

const CONTENT_TYPE_CSV: &str = "text/comma-separated-values";

/// `GET /{document_id}/@form-data-export`
pub async fn form_data_export(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    auth::validate(&state.editor_credentials, &headers)?;

    if !state.documents.contains_key(&document_id) {
        return Err(ApiError::not_found(format!(
            "Document `{document_id}` not found"
        )));
    }

    let records = state.store.search().await?;
    let body = render_csv(&records)
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "ExportError", e))?;

    let response_headers = [
        (header::CONTENT_TYPE, CONTENT_TYPE_CSV.to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{VIEW_NAME}.csv\""),
        ),
    ];
    Ok((response_headers, body).into_response())
}

/// Renders records to UTF-8 CSV bytes.
///
/// Columns accumulate in first-seen order while walking the records; every
/// data row is emitted with exactly that column arity.
pub(crate) fn render_csv(records: &[StoredRecord]) -> Result<Vec<u8>, String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for key in record.attrs.keys() {
            if !columns.iter().any(|column| column == key) {
                columns.push(key.clone());
            }
        }
    }

    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&columns).map_err(|e| e.to_string())?;

    for record in records {
        let row: Vec<String> = columns
            .iter()
            .map(|column| {
                record
                    .attrs
                    .get(column)
                    .map(value_to_cell)
                    .unwrap_or_default()
            })
            .collect();
        writer.write_record(&row).map_err(|e| e.to_string())?;
    }

    writer.into_inner().map_err(|e| e.to_string())
}
