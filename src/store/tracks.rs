// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Track reconstruction over an ordered stream of position reports.
//!
//! Consecutive reports with the same MMSI become one [`Track`]. Points
//! within the decimation tolerance of the previously retained point are
//! dropped, which bounds output size without materially changing the
//! route shape.

use async_stream::try_stream;
use futures_util::{pin_mut, Stream, TryStreamExt};

use crate::models::{PositionReport, Track, TrackPoint};
use crate::store::StoreError;

/// Decimation tolerance in degrees (roughly 11 m at the equator).
pub const DEFAULT_DECIMATION_DEGREES: f64 = 0.0001;

/// Group an ordered report stream into per-vessel tracks.
///
/// Input must be ordered by `(mmsi, time)`; each yielded track keeps its
/// points in ascending time, and tracks come out in ascending MMSI. The
/// stream is finite and non-restartable: drain it fully or drop it.
pub fn track_stream<S>(
    reports: S,
    decimate: f64,
) -> impl Stream<Item = Result<Track, StoreError>>
where
    S: Stream<Item = Result<PositionReport, StoreError>>,
{
    try_stream! {
        pin_mut!(reports);

        let mut current: Option<Track> = None;
        let mut last_kept = (f64::NAN, f64::NAN);

        while let Some(report) = reports.try_next().await? {
            match current.as_mut() {
                Some(track) if track.mmsi == report.mmsi => {
                    let dx = report.longitude - last_kept.0;
                    let dy = report.latitude - last_kept.1;
                    if (dx * dx + dy * dy).sqrt() < decimate {
                        continue;
                    }
                    track.points.push(TrackPoint::from(&report));
                    last_kept = (report.longitude, report.latitude);
                }
                _ => {
                    // Vessel boundary: the first point of a track is
                    // always retained.
                    if let Some(done) = current.take() {
                        yield done;
                    }
                    last_kept = (report.longitude, report.latitude);
                    current = Some(Track {
                        mmsi: report.mmsi,
                        vessel_name: report.vessel_name.clone(),
                        ship_type: report.ship_type.clone(),
                        points: vec![TrackPoint::from(&report)],
                    });
                }
            }
        }

        if let Some(done) = current.take() {
            yield done;
        }
    }
}
