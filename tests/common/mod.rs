// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use ais_export::config::Config;
use ais_export::models::PositionReport;
use ais_export::routes::create_router;
use ais_export::services::validate;
use ais_export::store::AisStore;
use ais_export::AppState;
use chrono::DateTime;
use std::sync::Arc;

/// Query window used by the sample data: 2023-08-01 to 2023-08-02 UTC.
#[allow(dead_code)]
pub const WINDOW_START: i64 = 1_690_848_000;
#[allow(dead_code)]
pub const WINDOW_END: i64 = 1_690_934_400;

fn report(mmsi: i64, secs: i64, lon: f64, lat: f64, name: Option<&str>) -> PositionReport {
    PositionReport {
        mmsi,
        time: DateTime::from_timestamp(secs, 0).unwrap(),
        longitude: lon,
        latitude: lat,
        sog: Some(6.0),
        cog: Some(90.0),
        vessel_name: name.map(|n| n.to_string()),
        ship_type: None,
    }
}

/// Sample reports: two vessels inside the window/box (points spaced well
/// past the decimation tolerance), plus reports that must be excluded for
/// identity, box, or time reasons. Store coverage spans July to mid-August.
#[allow(dead_code)]
pub fn sample_reports() -> Vec<PositionReport> {
    vec![
        // Coverage markers outside the query window
        report(316_100_000, WINDOW_START - 31 * 86_400, -63.0, 44.0, None),
        report(316_100_000, WINDOW_END + 13 * 86_400, -63.0, 44.0, None),
        // Vessel A: three points inside the window
        report(316_001_000, WINDOW_START + 60, -63.0, 44.0, Some("VESSEL A")),
        report(316_001_000, WINDOW_START + 120, -63.01, 44.01, Some("VESSEL A")),
        report(316_001_000, WINDOW_START + 180, -63.02, 44.02, Some("VESSEL A")),
        // Vessel B: one point inside the window
        report(316_002_000, WINDOW_START + 90, -64.5, 43.5, Some("VESSEL B")),
        // Excluded: malformed identity
        report(42, WINDOW_START + 60, -63.0, 44.0, None),
        // Excluded: outside the bounding box
        report(316_003_000, WINDOW_START + 60, -10.0, 44.0, None),
        // Excluded: at the half-open end of the window
        report(316_001_000, WINDOW_END, -63.5, 44.5, Some("VESSEL A")),
    ]
}

/// Create a test app over a mock store seeded with `reports`.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app_with(
    reports: Vec<PositionReport>,
) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let store = AisStore::new_mock(reports);
    let date_range = store
        .date_range()
        .await
        .expect("mock store must have coverage");
    let example_request = validate::build_example_request(&date_range);

    let state = Arc::new(AppState {
        config,
        store,
        date_range,
        example_request,
    });

    (create_router(state.clone()), state)
}

/// Create a test app over the standard sample data.
#[allow(dead_code)]
pub async fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(sample_reports()).await
}
