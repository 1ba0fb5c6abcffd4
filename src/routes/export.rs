// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! The export endpoint: request-to-response orchestration.
//!
//! Pipeline: validate → build descriptor → stream tracks from the store →
//! serialize CSV into the staging buffer → compress and respond. Any
//! validation failure short-circuits before a store connection is opened.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::buffer::ExportBuffer;
use crate::error::Result;
use crate::services::exporter::{self, ExportResult};
use crate::services::{query, response, validate, ValidationOutcome};
use crate::store::tracks::{track_stream, DEFAULT_DECIMATION_DEGREES};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(export))
}

/// Handle one export request end to end.
async fn export(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response> {
    let validated = match validate::validate(&params) {
        Ok(ValidationOutcome::ServiceInfo) => {
            return Ok(response::service_info_response(validate::service_info(
                &state.date_range,
                &state.example_request,
            )));
        }
        Ok(ValidationOutcome::Query(validated)) => validated,
        Err(err) => {
            tracing::debug!(error = %err, "Rejected export request");
            return Ok(response::validation_error_response(
                &err,
                &state.example_request,
            ));
        }
    };

    tracing::info!(
        xmin = validated.xmin,
        xmax = validated.xmax,
        ymin = validated.ymin,
        ymax = validated.ymax,
        start = validated.start.timestamp(),
        end = validated.end.timestamp(),
        "Received export request"
    );

    let descriptor = query::build_descriptor(&validated);

    // The report stream holds the store connection; it is released when
    // the stream is drained below (or dropped on an error path).
    let reports = state.store.fetch_reports(&descriptor);
    let tracks = track_stream(reports, DEFAULT_DECIMATION_DEGREES);

    let mut buf = ExportBuffer::new();
    match exporter::write_tracks(tracks, &mut buf).await? {
        ExportResult::Empty => {
            tracing::info!("Export matched no vessel reports");
            Ok(response::no_results())
        }
        ExportResult::Written { rows } => {
            tracing::info!(rows, spilled = buf.is_spilled(), "Sending CSV export");
            response::csv_attachment(buf, &validated).await
        }
    }
}
