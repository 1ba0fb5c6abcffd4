// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Position reports and reconstructed vessel tracks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One AIS position report, joined with the vessel's static attributes.
///
/// Rows come out of the store ordered by `(mmsi, time)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct PositionReport {
    /// Vessel identity (MMSI)
    pub mmsi: i64,
    /// Report timestamp (UTC)
    pub time: DateTime<Utc>,
    /// Longitude in decimal degrees
    pub longitude: f64,
    /// Latitude in decimal degrees
    pub latitude: f64,
    /// Speed over ground (knots)
    pub sog: Option<f64>,
    /// Course over ground (degrees)
    pub cog: Option<f64>,
    /// Vessel name from static reports
    pub vessel_name: Option<String>,
    /// Ship type from static reports
    pub ship_type: Option<String>,
}

/// A single retained point within a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackPoint {
    pub time: DateTime<Utc>,
    pub longitude: f64,
    pub latitude: f64,
    pub sog: Option<f64>,
    pub cog: Option<f64>,
}

impl From<&PositionReport> for TrackPoint {
    fn from(report: &PositionReport) -> Self {
        Self {
            time: report.time,
            longitude: report.longitude,
            latitude: report.latitude,
            sog: report.sog,
            cog: report.cog,
        }
    }
}

/// The ordered points for one vessel within the queried window.
/// Points are monotonically non-decreasing in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub mmsi: i64,
    pub vessel_name: Option<String>,
    pub ship_type: Option<String>,
    pub points: Vec<TrackPoint>,
}
