// SQLite metrics store (read side). Rows are written by the external sampler;
// this repo only creates the tables if missing and serves windowed reads.

pub mod query;
mod rows;

use crate::models::{CpuSample, MemorySample};
use crate::time_window::TimeWindow;
use query::{MetricKind, QueryParam, RangeQuery, RangeQueryBuilder};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use std::path::Path;
use std::str::FromStr;
use tracing::instrument;

/// Per-request rendering switches for history responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Populate `humanFriendlyTime` from the millisecond timestamp.
    pub human_friendly_time: bool,
}

pub struct MetricsRepo {
    pool: SqlitePool,
}

impl MetricsRepo {
    /// Connect to SQLite at `path`, create parent dir and DB if missing, enable WAL + pragmas.
    pub async fn connect(path: &str, max_pool_size: u32) -> anyhow::Result<Self> {
        if let Some(parent) = Path::new(path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(5))
            .synchronous(sqlx::sqlite::SqliteSynchronous::Normal);
        let pool = SqlitePoolOptions::new()
            .max_connections(max_pool_size)
            .connect_with(opts)
            .await?;
        Ok(Self { pool })
    }

    /// Create the sample tables when the sampler has not done so yet.
    pub async fn init(&self) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS container_cpu_usage (
                time TEXT NOT NULL,
                container_id TEXT NOT NULL,
                percent TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS container_memory_usage (
                time TEXT NOT NULL,
                container_id TEXT NOT NULL,
                total TEXT,
                available TEXT,
                used TEXT,
                usedPercent TEXT,
                free TEXT
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_cpu_container_time ON container_cpu_usage(container_id, time)",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_memory_container_time ON container_memory_usage(container_id, time)",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Underlying pool, for the sampler side and tests that seed rows.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// CPU samples for `container_id` inside `window`, ascending by numeric time.
    #[instrument(skip(self, window), fields(repo = "metrics", operation = "cpu_history"))]
    pub async fn cpu_history(
        &self,
        container_id: &str,
        window: &TimeWindow,
        render: RenderOptions,
    ) -> sqlx::Result<Vec<CpuSample>> {
        let query = range_query(MetricKind::Cpu, container_id, window);
        let rows = self.fetch(&query).await?;
        rows.iter()
            .map(|row| rows::decode_cpu_row(row, render))
            .collect()
    }

    /// Memory samples for `container_id` inside `window`, ascending by numeric time.
    #[instrument(skip(self, window), fields(repo = "metrics", operation = "memory_history"))]
    pub async fn memory_history(
        &self,
        container_id: &str,
        window: &TimeWindow,
        render: RenderOptions,
    ) -> sqlx::Result<Vec<MemorySample>> {
        let query = range_query(MetricKind::Memory, container_id, window);
        let rows = self.fetch(&query).await?;
        let samples = rows
            .iter()
            .map(|row| rows::decode_memory_row(row, render))
            .collect::<sqlx::Result<Vec<_>>>()?;
        tracing::debug!(records = samples.len(), "memory history read");
        Ok(samples)
    }

    async fn fetch(&self, range: &RangeQuery) -> sqlx::Result<Vec<SqliteRow>> {
        tracing::debug!(sql = %range.sql, params = ?range.params, "range query");
        let mut query = sqlx::query(&range.sql);
        for param in &range.params {
            query = match param {
                QueryParam::Text(s) => query.bind(s.as_str()),
                QueryParam::Int(v) => query.bind(*v),
            };
        }
        query.fetch_all(&self.pool).await
    }
}

fn range_query(kind: MetricKind, container_id: &str, window: &TimeWindow) -> RangeQuery {
    RangeQueryBuilder::new(kind, container_id)
        .from_millis(window.from_millis())
        .to_millis(window.to_millis())
        .build()
}
