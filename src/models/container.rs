// Docker container models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Docker container state; serializes to lowercase JSON (e.g. "running").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    #[serde(other)]
    Unknown,
}

impl ContainerState {
    /// Parse from Docker API state string (e.g. "running", "exited").
    pub fn from_docker(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "created" => ContainerState::Created,
            "running" => ContainerState::Running,
            "paused" => ContainerState::Paused,
            "restarting" => ContainerState::Restarting,
            "removing" => ContainerState::Removing,
            "exited" => ContainerState::Exited,
            "dead" => ContainerState::Dead,
            _ => ContainerState::Unknown,
        }
    }
}

/// Health reported by the container's HEALTHCHECK. `Unknown` covers both
/// "inspect failed" and "no health check configured".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Starting,
    Healthy,
    Unhealthy,
    None,
    #[default]
    #[serde(other)]
    Unknown,
}

impl HealthStatus {
    /// Parse from Docker API health string (e.g. "healthy").
    pub fn from_docker(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "starting" => HealthStatus::Starting,
            "healthy" => HealthStatus::Healthy,
            "unhealthy" => HealthStatus::Unhealthy,
            "none" => HealthStatus::None,
            _ => HealthStatus::Unknown,
        }
    }
}

/// Live view of one container, built per request by the correlator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerSnapshot {
    /// Observation instant in the wire time format.
    pub time: String,
    pub id: String,
    pub image: String,
    pub name: String,
    pub state: ContainerState,
    pub labels: HashMap<String, String>,
    #[serde(rename = "health_status")]
    pub health_status: HealthStatus,
}
