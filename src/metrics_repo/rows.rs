// Row decoding. Numeric columns are text written by the sampler; a value that
// fails to parse degrades to zero instead of failing the response.

use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use std::str::FromStr;

use super::RenderOptions;
use crate::models::{CpuSample, MemorySample};
use crate::time_window::format_millis;

pub(super) fn decode_cpu_row(row: &SqliteRow, render: RenderOptions) -> sqlx::Result<CpuSample> {
    let time: String = row.try_get("time")?;
    let percent: Option<String> = row.try_get("percent")?;
    Ok(CpuSample {
        human_friendly_time: human_friendly(&time, render),
        percent: parse_finite_or_zero(percent.as_deref(), "percent"),
        time,
    })
}

pub(super) fn decode_memory_row(
    row: &SqliteRow,
    render: RenderOptions,
) -> sqlx::Result<MemorySample> {
    let time: String = row.try_get("time")?;
    let total: Option<String> = row.try_get("total")?;
    let available: Option<String> = row.try_get("available")?;
    let used: Option<String> = row.try_get("used")?;
    let used_percent: Option<String> = row.try_get("usedPercent")?;
    let free: Option<String> = row.try_get("free")?;
    Ok(MemorySample {
        human_friendly_time: human_friendly(&time, render),
        total: parse_or_zero(total.as_deref(), "total"),
        available: parse_or_zero(available.as_deref(), "available"),
        used: parse_or_zero(used.as_deref(), "used"),
        used_percent: parse_finite_or_zero(used_percent.as_deref(), "usedPercent"),
        free: parse_or_zero(free.as_deref(), "free"),
        time,
    })
}

/// Parse a stored text field; missing or malformed values yield `T::default()`.
pub(super) fn parse_or_zero<T>(value: Option<&str>, field: &'static str) -> T
where
    T: FromStr + Default,
{
    let Some(raw) = value else {
        return T::default();
    };
    raw.trim().parse().unwrap_or_else(|_| {
        tracing::debug!(field, value = raw, "unparseable sample field, using zero");
        T::default()
    })
}

/// Like `parse_or_zero`, but `NaN` and infinities also count as malformed.
pub(super) fn parse_finite_or_zero(value: Option<&str>, field: &'static str) -> f64 {
    let parsed: f64 = parse_or_zero(value, field);
    if parsed.is_finite() {
        parsed
    } else {
        tracing::debug!(field, ?value, "non-finite sample field, using zero");
        0.0
    }
}

fn human_friendly(time: &str, render: RenderOptions) -> Option<String> {
    render
        .human_friendly_time
        .then(|| format_millis(parse_or_zero(Some(time), "time")))
}
