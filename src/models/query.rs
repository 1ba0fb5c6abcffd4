// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Validated request parameters and store-facing query descriptors.

use chrono::{DateTime, Utc};

use crate::models::track::PositionReport;

/// A range-checked export request.
///
/// Invariants (enforced by the validator): `xmin < xmax` in [-180, 180],
/// `ymin < ymax` in [-90, 90], `start < end`, `end - start <= 31 days`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedQuery {
    /// Minimum longitude (decimal degrees)
    pub xmin: f64,
    /// Maximum longitude (decimal degrees)
    pub xmax: f64,
    /// Minimum latitude (decimal degrees)
    pub ymin: f64,
    /// Maximum latitude (decimal degrees)
    pub ymax: f64,
    /// Beginning of the time window (UTC)
    pub start: DateTime<Utc>,
    /// End of the time window (UTC)
    pub end: DateTime<Utc>,
}

/// Vessel-identity filtering policy applied by the store query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityFilter {
    /// Restrict to reports carrying a syntactically valid MMSI.
    /// Malformed identities are excluded, not an error.
    ValidOnly,
}

impl IdentityFilter {
    /// Lowest MMSI assigned to a vessel station (inclusive).
    pub const MIN_VALID_MMSI: i64 = 201_000_000;
    /// Upper bound of the vessel station range (exclusive).
    pub const MAX_VALID_MMSI: i64 = 776_000_000;

    /// Inclusive lower bound for the store predicate.
    pub fn min_mmsi(&self) -> i64 {
        Self::MIN_VALID_MMSI
    }

    /// Exclusive upper bound for the store predicate.
    pub fn max_mmsi(&self) -> i64 {
        Self::MAX_VALID_MMSI
    }

    /// Whether a vessel identity passes the filter.
    pub fn matches(&self, mmsi: i64) -> bool {
        match self {
            IdentityFilter::ValidOnly => {
                (Self::MIN_VALID_MMSI..Self::MAX_VALID_MMSI).contains(&mmsi)
            }
        }
    }
}

/// Store-facing query specification, derived deterministically from a
/// [`ValidatedQuery`]. The time predicate is half-open: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryDescriptor {
    pub xmin: f64,
    pub xmax: f64,
    pub ymin: f64,
    pub ymax: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub identity: IdentityFilter,
}

impl QueryDescriptor {
    /// The reference predicate for a single report, mirroring the SQL the
    /// Postgres backend runs. Used by the offline mock backend.
    pub fn matches(&self, report: &PositionReport) -> bool {
        report.time >= self.start
            && report.time < self.end
            && report.longitude >= self.xmin
            && report.longitude <= self.xmax
            && report.latitude >= self.ymin
            && report.latitude <= self.ymax
            && self.identity.matches(report.mmsi)
    }
}

/// The store's available coverage, computed once at startup.
/// Read-only for the process lifetime after initialization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceDateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_filter_bounds() {
        let filter = IdentityFilter::ValidOnly;

        assert!(filter.matches(316_001_234));
        assert!(filter.matches(IdentityFilter::MIN_VALID_MMSI));
        assert!(!filter.matches(IdentityFilter::MAX_VALID_MMSI));
        assert!(!filter.matches(0));
        assert!(!filter.matches(123));
        assert!(!filter.matches(999_999_999));
    }

    #[test]
    fn test_descriptor_time_predicate_is_half_open() {
        let start = chrono::DateTime::from_timestamp(1_690_848_000, 0).unwrap();
        let end = chrono::DateTime::from_timestamp(1_690_934_400, 0).unwrap();
        let descriptor = QueryDescriptor {
            xmin: -65.0,
            xmax: -62.0,
            ymin: 43.0,
            ymax: 45.0,
            start,
            end,
            identity: IdentityFilter::ValidOnly,
        };

        let report = |time| PositionReport {
            mmsi: 316_001_234,
            time,
            longitude: -63.0,
            latitude: 44.0,
            sog: None,
            cog: None,
            vessel_name: None,
            ship_type: None,
        };

        assert!(descriptor.matches(&report(start)));
        assert!(!descriptor.matches(&report(end)));
    }
}
