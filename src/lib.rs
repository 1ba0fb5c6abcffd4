// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! AIS Export: single-endpoint CSV export of vessel-tracking history.
//!
//! This crate provides the REST backend that turns a bounding box and a
//! time window into a gzip-compressed CSV download of per-vessel tracks.

pub mod buffer;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use models::ServiceDateRange;
use store::AisStore;

/// Shared application state.
///
/// Everything here is immutable after startup; requests share it without
/// locking.
pub struct AppState {
    pub config: Config,
    pub store: AisStore,
    /// Store coverage, computed once at startup.
    pub date_range: ServiceDateRange,
    /// Worked example query string, computed once at startup.
    pub example_request: String,
}
