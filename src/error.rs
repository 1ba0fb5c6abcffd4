// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::store::StoreError;

/// Application error type that converts to HTTP responses.
///
/// Validation failures are not routed through here: they carry their own
/// structured bodies (with the worked example) and are rendered by the
/// response assembler. These variants cover the upstream and internal
/// failures the pipeline does not recover locally.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Position-report store error: {0}")]
    Store(#[from] StoreError),

    #[error("Export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            AppError::Store(err) => {
                tracing::error!(error = %err, "Upstream store error");
                (StatusCode::BAD_GATEWAY, "upstream_error")
            }
            AppError::Io(err) => {
                tracing::error!(error = %err, "Export buffer I/O error");
                (StatusCode::INTERNAL_SERVER_ERROR, "export_error")
            }
            AppError::Csv(err) => {
                tracing::error!(error = %err, "CSV serialization error");
                (StatusCode::INTERNAL_SERVER_ERROR, "export_error")
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
