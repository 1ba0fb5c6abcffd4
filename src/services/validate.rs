// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Request validation and the service's self-description document.
//!
//! Validation is a pure function of the raw query parameters. Any failure
//! short-circuits the pipeline before a store connection is opened.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::models::{ServiceDateRange, ValidatedQuery};
use crate::time_utils::{format_utc_rfc3339, truncate_to_midnight};

/// Maximum queryable time span.
pub const MAX_QUERY_DAYS: i64 = 31;

/// The six parameters that must be supplied together.
const REQUIRED_KEYS: [&str; 6] = ["xmin", "xmax", "ymin", "ymax", "start", "end"];

/// Default example bounding box (Bay of Fundy region).
const EXAMPLE_BBOX: (f64, f64, f64, f64) = (-65.0, -62.0, 43.0, 45.0);

/// A rejected export request. All variants are recovered locally and
/// rendered as structured responses; none reaches the store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("missing keys from request: {{{}}}", join_keys(.0))]
    MissingParameters(BTreeSet<String>),

    #[error("invalid value for parameter '{0}'")]
    MalformedParameter(String),

    #[error("A maximum of 31 days can be queried at once")]
    SpanTooLong,

    #[error("end must occur after start")]
    InvertedTimeRange,

    #[error("invalid longitude range")]
    InvalidLongitudeRange,

    #[error("invalid latitude range")]
    InvalidLatitudeRange,
}

fn join_keys(keys: &BTreeSet<String>) -> String {
    keys.iter().cloned().collect::<Vec<_>>().join(", ")
}

/// Outcome of validating the raw query parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationOutcome {
    /// No parameters were supplied: respond with the usage document.
    ServiceInfo,
    /// All parameters present, typed, and in range.
    Query(ValidatedQuery),
}

/// Validate raw query parameters into a typed, range-checked query.
pub fn validate(params: &HashMap<String, String>) -> Result<ValidationOutcome, ValidationError> {
    if params.is_empty() {
        return Ok(ValidationOutcome::ServiceInfo);
    }

    let missing: BTreeSet<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| !params.contains_key(**key))
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationError::MissingParameters(missing));
    }

    let start = parse_epoch(params, "start")?;
    let end = parse_epoch(params, "end")?;
    let xmin = parse_degrees(params, "xmin")?;
    let xmax = parse_degrees(params, "xmax")?;
    let ymin = parse_degrees(params, "ymin")?;
    let ymax = parse_degrees(params, "ymax")?;

    if end - start > Duration::days(MAX_QUERY_DAYS) {
        return Err(ValidationError::SpanTooLong);
    }
    if end <= start {
        return Err(ValidationError::InvertedTimeRange);
    }
    if !(-180.0 <= xmin && xmin < xmax && xmax <= 180.0) {
        return Err(ValidationError::InvalidLongitudeRange);
    }
    if !(-90.0 <= ymin && ymin < ymax && ymax <= 90.0) {
        return Err(ValidationError::InvalidLatitudeRange);
    }

    Ok(ValidationOutcome::Query(ValidatedQuery {
        xmin,
        xmax,
        ymin,
        ymax,
        start,
        end,
    }))
}

fn parse_epoch(params: &HashMap<String, String>, name: &str) -> Result<DateTime<Utc>, ValidationError> {
    let seconds: i64 = params[name]
        .parse()
        .map_err(|_| ValidationError::MalformedParameter(name.to_string()))?;
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| ValidationError::MalformedParameter(name.to_string()))
}

fn parse_degrees(params: &HashMap<String, String>, name: &str) -> Result<f64, ValidationError> {
    params[name]
        .parse()
        .map_err(|_| ValidationError::MalformedParameter(name.to_string()))
}

/// Build the literal example query string from the store's coverage:
/// the last 31 days of coverage (or all of it, if shorter), truncated to
/// midnight UTC, over the default bounding box.
pub fn build_example_request(range: &ServiceDateRange) -> String {
    let start = truncate_to_midnight((range.end - Duration::days(MAX_QUERY_DAYS)).max(range.start));
    let end = truncate_to_midnight(range.end);
    let (xmin, xmax, ymin, ymax) = EXAMPLE_BBOX;

    format!(
        "?start={}&end={}&xmin={}&xmax={}&ymin={}&ymax={}",
        start.timestamp(),
        end.timestamp(),
        xmin,
        xmax,
        ymin,
        ymax
    )
}

/// The service's self-description, returned for parameterless requests.
#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub parameters: BTreeMap<&'static str, &'static str>,
    pub limitation: String,
    pub example_request: String,
}

/// Build the usage document from the coverage range and example string.
pub fn service_info(range: &ServiceDateRange, example_request: &str) -> ServiceInfo {
    let parameters = BTreeMap::from([
        ("xmin", "minimum longitude (decimal degrees)"),
        ("xmax", "maximum longitude (decimal degrees)"),
        ("ymin", "minimum latitude (decimal degrees)"),
        ("ymax", "maximum latitude (decimal degrees)"),
        ("start", "beginning timestamp (epoch seconds)"),
        ("end", "end timestamp (epoch seconds)"),
    ]);

    ServiceInfo {
        message: "AIS REST API",
        description: "Query AIS message history using time and coordinate region \
                      to download a CSV data export.",
        usage: "Begin request using a GET request to this endpoint.",
        parameters,
        limitation: format!(
            "Requests are limited to {} days at a time. Data is available from {} to {}.",
            MAX_QUERY_DAYS,
            format_utc_rfc3339(range.start),
            format_utc_rfc3339(range.end),
        ),
        example_request: example_request.to_string(),
    }
}
