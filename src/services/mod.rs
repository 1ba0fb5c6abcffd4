// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - the export pipeline stages.

pub mod exporter;
pub mod query;
pub mod response;
pub mod validate;

pub use exporter::ExportResult;
pub use validate::{ValidationError, ValidationOutcome};
