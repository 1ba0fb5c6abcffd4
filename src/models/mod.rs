// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod query;
pub mod track;

pub use query::{IdentityFilter, QueryDescriptor, ServiceDateRange, ValidatedQuery};
pub use track::{PositionReport, Track, TrackPoint};
