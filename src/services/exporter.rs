// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CSV serialization of the track stream into the staging buffer.
//!
//! Rows are written incrementally as tracks are pulled from the store, so
//! memory use is governed by the buffer's spill policy rather than the
//! size of the result set.

use futures_util::{pin_mut, Stream, TryStreamExt};

use crate::buffer::ExportBuffer;
use crate::error::Result;
use crate::models::Track;
use crate::store::StoreError;
use crate::time_utils::format_csv_time;

/// CSV column order, matching the store's row schema.
pub const CSV_HEADER: [&str; 8] = [
    "mmsi",
    "time",
    "longitude",
    "latitude",
    "cog",
    "sog",
    "vessel_name",
    "ship_type",
];

/// Outcome of draining a track stream.
///
/// `Empty` is a distinct successful outcome, not a zero-byte file:
/// callers must render it differently from a populated export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportResult {
    Written { rows: u64 },
    Empty,
}

/// Drain `tracks` into `buf` as CSV, one row per retained point.
///
/// Rows keep the order the stream emits them: grouped by vessel, ascending
/// in time within a vessel. Store failures propagate unretried.
pub async fn write_tracks<S>(tracks: S, buf: &mut ExportBuffer) -> Result<ExportResult>
where
    S: Stream<Item = std::result::Result<Track, StoreError>>,
{
    pin_mut!(tracks);

    let mut writer = csv::Writer::from_writer(buf);
    writer.write_record(CSV_HEADER)?;

    let mut rows: u64 = 0;
    let mut any_tracks = false;

    while let Some(track) = tracks.try_next().await? {
        any_tracks = true;
        let mmsi = track.mmsi.to_string();
        let vessel_name = track.vessel_name.as_deref().unwrap_or_default();
        let ship_type = track.ship_type.as_deref().unwrap_or_default();

        for point in &track.points {
            let time = format_csv_time(point.time);
            let longitude = point.longitude.to_string();
            let latitude = point.latitude.to_string();
            let cog = optional_field(point.cog);
            let sog = optional_field(point.sog);

            writer.write_record([
                mmsi.as_str(),
                time.as_str(),
                longitude.as_str(),
                latitude.as_str(),
                cog.as_str(),
                sog.as_str(),
                vessel_name,
                ship_type,
            ])?;
            rows += 1;
        }
    }

    writer.flush()?;

    if !any_tracks {
        return Ok(ExportResult::Empty);
    }
    Ok(ExportResult::Written { rows })
}

fn optional_field(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TrackPoint;
    use chrono::DateTime;
    use futures_util::{stream, StreamExt};
    use std::io::Read;

    fn track(mmsi: i64, points: &[(i64, f64, f64)]) -> Track {
        Track {
            mmsi,
            vessel_name: Some("EXPORT TEST".to_string()),
            ship_type: None,
            points: points
                .iter()
                .map(|&(secs, lon, lat)| TrackPoint {
                    time: DateTime::from_timestamp(secs, 0).unwrap(),
                    longitude: lon,
                    latitude: lat,
                    sog: Some(5.5),
                    cog: None,
                })
                .collect(),
        }
    }

    fn read_csv(buf: &mut ExportBuffer) -> String {
        buf.rewind().unwrap();
        let mut out = String::new();
        buf.read_to_string(&mut out).unwrap();
        out
    }

    #[tokio::test]
    async fn test_writes_header_and_rows() {
        let tracks = vec![
            track(316_001_000, &[(1_690_848_000, -63.5, 44.25)]),
            track(316_002_000, &[(1_690_848_060, -64.0, 43.5), (1_690_848_120, -64.1, 43.6)]),
        ];

        let mut buf = ExportBuffer::new();
        let result = write_tracks(stream::iter(tracks).map(Ok), &mut buf)
            .await
            .unwrap();

        assert_eq!(result, ExportResult::Written { rows: 3 });

        let csv = read_csv(&mut buf);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "mmsi,time,longitude,latitude,cog,sog,vessel_name,ship_type"
        );
        assert_eq!(
            lines[1],
            "316001000,2023-08-01 00:00:00,-63.5,44.25,,5.5,EXPORT TEST,"
        );
    }

    #[tokio::test]
    async fn test_empty_stream_reports_empty() {
        let mut buf = ExportBuffer::new();
        let result = write_tracks(stream::iter(Vec::<Track>::new()).map(Ok), &mut buf)
            .await
            .unwrap();

        assert_eq!(result, ExportResult::Empty);
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let tracks = stream::iter(vec![
            Ok(track(316_001_000, &[(1_690_848_000, -63.5, 44.25)])),
            Err(StoreError::NoCoverage),
        ]);

        let mut buf = ExportBuffer::new();
        let err = write_tracks(tracks, &mut buf).await.unwrap_err();
        assert!(matches!(err, crate::error::AppError::Store(_)));
    }

    #[tokio::test]
    async fn test_rows_counted_per_point() {
        let tracks = vec![track(
            316_001_000,
            &[
                (1_690_848_000, -63.0, 44.0),
                (1_690_848_060, -63.1, 44.1),
                (1_690_848_120, -63.2, 44.2),
            ],
        )];

        let mut buf = ExportBuffer::new();
        let result = write_tracks(stream::iter(tracks).map(Ok), &mut buf)
            .await
            .unwrap();

        assert_eq!(result, ExportResult::Written { rows: 3 });
    }
}
