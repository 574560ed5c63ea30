// Live container inventory: runtime list + best-effort per-container health.

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use std::time::Duration;
use tokio::time::timeout;
use tracing::instrument;

use super::{ContainerRuntime, RuntimeContainer, RuntimeError};
use crate::models::{ContainerSnapshot, ContainerState, HealthStatus};
use crate::time_window::format_millis;

/// Deadlines for the runtime round trips of one live listing.
#[derive(Debug, Clone, Copy)]
pub struct LiveTimeouts {
    pub list: Duration,
    pub inspect: Duration,
}

/// Outcome of one health lookup. `Unavailable` never fails the listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthProbe {
    Reported(HealthStatus),
    Unavailable(String),
}

impl HealthProbe {
    pub fn status(&self) -> HealthStatus {
        match self {
            HealthProbe::Reported(status) => *status,
            HealthProbe::Unavailable(_) => HealthStatus::Unknown,
        }
    }
}

/// One snapshot per listed container, in runtime order, stamped with `observed_at`.
///
/// Only the list call can fail the whole request; inspect failures and timeouts
/// leave that container's health `unknown`.
#[instrument(skip(runtime), fields(operation = "list_snapshots"))]
pub async fn list_snapshots(
    runtime: &dyn ContainerRuntime,
    timeouts: LiveTimeouts,
    observed_at: DateTime<Utc>,
) -> Result<Vec<ContainerSnapshot>, RuntimeError> {
    let containers = timeout(timeouts.list, runtime.list_containers())
        .await
        .map_err(|_| RuntimeError::Timeout {
            operation: "list containers",
            after: timeouts.list,
        })??;

    let probes = join_all(
        containers
            .iter()
            .map(|c| probe_health(runtime, &c.id, timeouts.inspect)),
    )
    .await;

    let time = format_millis(observed_at.timestamp_millis());
    Ok(containers
        .into_iter()
        .zip(probes)
        .map(|(c, probe)| snapshot(c, &probe, &time))
        .collect())
}

pub async fn probe_health(
    runtime: &dyn ContainerRuntime,
    id: &str,
    deadline: Duration,
) -> HealthProbe {
    match timeout(deadline, runtime.inspect_health(id)).await {
        Ok(Ok(status)) => HealthProbe::Reported(status.unwrap_or_default()),
        Ok(Err(e)) => {
            tracing::debug!(container = id, error = %e, "inspect failed, health unknown");
            HealthProbe::Unavailable(e.to_string())
        }
        Err(_) => {
            tracing::debug!(container = id, ?deadline, "inspect timed out, health unknown");
            HealthProbe::Unavailable(format!("inspect timed out after {deadline:?}"))
        }
    }
}

/// Docker prefixes names with '/'. Without names, fall back to the short id.
pub fn display_name(names: &[String], id: &str) -> String {
    match names.first() {
        Some(first) => first
            .strip_prefix('/')
            .filter(|rest| !rest.is_empty())
            .unwrap_or(first)
            .to_string(),
        None => id.chars().take(12).collect(),
    }
}

fn snapshot(c: RuntimeContainer, probe: &HealthProbe, time: &str) -> ContainerSnapshot {
    ContainerSnapshot {
        time: time.to_string(),
        name: display_name(&c.names, &c.id),
        state: ContainerState::from_docker(&c.state),
        health_status: probe.status(),
        id: c.id,
        image: c.image,
        labels: c.labels,
    }
}
