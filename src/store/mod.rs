//! Position-report store access.
//!
//! Two backends behind one interface: a PostgreSQL pool for production and
//! an in-memory mock for offline tests. Both apply the same predicate and
//! emit reports ordered by `(mmsi, time)`, so the export pipeline is
//! deterministic for a given descriptor and store snapshot.

pub mod tracks;

use std::sync::Arc;

use async_stream::try_stream;
use chrono::{DateTime, Utc};
use futures_util::stream::BoxStream;
use futures_util::{StreamExt, TryStreamExt};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::Config;
use crate::models::{PositionReport, QueryDescriptor, ServiceDateRange};

/// Errors from the store connection or query execution.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("store has no position reports")]
    NoCoverage,
}

const DATE_RANGE_SQL: &str = "SELECT min(time), max(time) FROM ais_dynamic";

const REPORTS_SQL: &str = "\
SELECT d.mmsi, d.time, d.longitude, d.latitude, d.sog, d.cog,
       s.vessel_name, s.ship_type
  FROM ais_dynamic d
  LEFT JOIN ais_static s USING (mmsi)
 WHERE d.time >= $1 AND d.time < $2
   AND d.longitude BETWEEN $3 AND $4
   AND d.latitude BETWEEN $5 AND $6
   AND d.mmsi >= $7 AND d.mmsi < $8
 ORDER BY d.mmsi, d.time";

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Mock(Arc<Vec<PositionReport>>),
}

/// Handle to the position-report store.
#[derive(Clone)]
pub struct AisStore {
    backend: Backend,
}

impl AisStore {
    /// Connect to the PostgreSQL store described by the configuration.
    pub async fn connect(config: &Config) -> Result<Self, StoreError> {
        let options = PgConnectOptions::new()
            .host(&config.db_host)
            .port(config.db_port)
            .username(&config.db_user)
            .password(&config.db_password);

        let pool = PgPoolOptions::new().connect_with(options).await?;
        Ok(Self {
            backend: Backend::Postgres(pool),
        })
    }

    /// Offline store backed by an in-memory report set (tests).
    pub fn new_mock(mut reports: Vec<PositionReport>) -> Self {
        reports.sort_by(|a, b| (a.mmsi, a.time).cmp(&(b.mmsi, b.time)));
        Self {
            backend: Backend::Mock(Arc::new(reports)),
        }
    }

    /// The store's covered date range. Queried once at startup; the
    /// result is immutable for the process lifetime.
    pub async fn date_range(&self) -> Result<ServiceDateRange, StoreError> {
        match &self.backend {
            Backend::Postgres(pool) => {
                let (start, end): (Option<DateTime<Utc>>, Option<DateTime<Utc>>) =
                    sqlx::query_as(DATE_RANGE_SQL).fetch_one(pool).await?;
                match (start, end) {
                    (Some(start), Some(end)) => Ok(ServiceDateRange { start, end }),
                    _ => Err(StoreError::NoCoverage),
                }
            }
            Backend::Mock(reports) => {
                let start = reports.iter().map(|r| r.time).min();
                let end = reports.iter().map(|r| r.time).max();
                match (start, end) {
                    (Some(start), Some(end)) => Ok(ServiceDateRange { start, end }),
                    _ => Err(StoreError::NoCoverage),
                }
            }
        }
    }

    /// Stream the position reports matching `query`, ordered by
    /// `(mmsi, time)`.
    ///
    /// The Postgres backend pulls rows lazily; the pooled connection is
    /// acquired when the stream is first polled and released when the
    /// stream is drained or dropped, so its lifetime is scoped to the
    /// request consuming it.
    pub fn fetch_reports(
        &self,
        query: &QueryDescriptor,
    ) -> BoxStream<'static, Result<PositionReport, StoreError>> {
        match &self.backend {
            Backend::Postgres(pool) => {
                let pool = pool.clone();
                let query = *query;
                Box::pin(try_stream! {
                    let mut rows = sqlx::query_as::<_, PositionReport>(REPORTS_SQL)
                        .bind(query.start)
                        .bind(query.end)
                        .bind(query.xmin)
                        .bind(query.xmax)
                        .bind(query.ymin)
                        .bind(query.ymax)
                        .bind(query.identity.min_mmsi())
                        .bind(query.identity.max_mmsi())
                        .fetch(&pool);

                    while let Some(report) = rows.try_next().await? {
                        yield report;
                    }
                })
            }
            Backend::Mock(reports) => {
                let query = *query;
                let matching: Vec<PositionReport> = reports
                    .iter()
                    .filter(|r| query.matches(r))
                    .cloned()
                    .collect();
                futures_util::stream::iter(matching).map(Ok).boxed()
            }
        }
    }
}
