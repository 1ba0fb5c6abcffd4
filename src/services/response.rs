// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Final response assembly.
//!
//! Success turns the staged CSV into a gzip attachment; the other
//! outcomes (usage document, validation failure, empty result) get their
//! own response shapes without consulting the store.

use std::io;

use axum::http::{header, HeaderName, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde_json::json;

use crate::buffer::ExportBuffer;
use crate::error::{AppError, Result};
use crate::models::ValidatedQuery;
use crate::services::validate::{ServiceInfo, ValidationError};
use crate::time_utils::format_utc_date;

/// Message body for queries that matched no vessel reports.
pub const NO_RESULTS_MESSAGE: &str = "No results found for query";

/// Attachment filename: `ais_<start-date>_<end-date>.csv`.
pub fn attachment_filename(query: &ValidatedQuery) -> String {
    format!(
        "ais_{}_{}.csv",
        format_utc_date(query.start),
        format_utc_date(query.end)
    )
}

/// Compress the staged CSV and build the downloadable attachment.
///
/// The buffer (and any disk spill behind it) is consumed and released
/// when this returns, on success and failure alike.
pub async fn csv_attachment(mut buf: ExportBuffer, query: &ValidatedQuery) -> Result<Response> {
    buf.rewind()?;

    // Maximum-ratio compression is CPU-bound; keep it off the async workers.
    let compressed = tokio::task::spawn_blocking(move || -> io::Result<Vec<u8>> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
        io::copy(&mut buf, &mut encoder)?;
        encoder.finish()
    })
    .await
    .map_err(|err| AppError::Internal(anyhow::anyhow!("compression task failed: {err}")))??;

    let headers = [
        (header::CONTENT_TYPE, "application/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment;filename={}", attachment_filename(query)),
        ),
        (header::CONTENT_ENCODING, "gzip".to_string()),
        // Connection-reuse hint: disable idle keep-alive after the download.
        (HeaderName::from_static("keep-alive"), "timeout=0".to_string()),
    ];

    Ok((StatusCode::OK, headers, compressed).into_response())
}

/// Plain-text response for an empty result set. Deliberately not an
/// attachment: "no rows" must be distinguishable from a written file.
pub fn no_results() -> Response {
    (StatusCode::OK, NO_RESULTS_MESSAGE).into_response()
}

/// The usage document returned for parameterless requests.
pub fn service_info_response(info: ServiceInfo) -> Response {
    (StatusCode::OK, Json(info)).into_response()
}

/// Structured body for a rejected request. Missing-parameter failures
/// carry the worked example alongside the error text.
pub fn validation_error_response(err: &ValidationError, example_request: &str) -> Response {
    let body = match err {
        ValidationError::MissingParameters(_) => json!({
            "error": err.to_string(),
            "example": example_request,
        }),
        _ => json!({ "error": err.to_string() }),
    };

    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}
