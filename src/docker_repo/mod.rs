// Container runtime access: the `ContainerRuntime` seam and its bollard adapter.

pub mod live;

use crate::models::HealthStatus;
use async_trait::async_trait;
use bollard::Docker;
use bollard::query_parameters::{InspectContainerOptions, ListContainersOptions};
use bollard::models::ContainerSummary;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::instrument;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Docker(#[from] bollard::errors::Error),

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },
}

/// One entry of the runtime's container list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeContainer {
    pub id: String,
    pub image: String,
    pub names: Vec<String>,
    pub state: String,
    pub labels: HashMap<String, String>,
}

impl From<ContainerSummary> for RuntimeContainer {
    fn from(c: ContainerSummary) -> Self {
        Self {
            id: c.id.unwrap_or_default(),
            image: c.image.unwrap_or_default(),
            names: c.names.unwrap_or_default(),
            // newer API versions model the state as an enum; both render as the Docker string
            state: c.state.map(|s| s.to_string()).unwrap_or_default(),
            labels: c.labels.unwrap_or_default(),
        }
    }
}

/// What the live endpoint needs from the container engine.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// All containers, stopped ones included, in runtime order.
    async fn list_containers(&self) -> Result<Vec<RuntimeContainer>, RuntimeError>;

    /// Health reported by inspect; `None` when the container has no health check.
    async fn inspect_health(&self, id: &str) -> Result<Option<HealthStatus>, RuntimeError>;
}

pub struct DockerRepo {
    docker: Docker,
}

impl DockerRepo {
    pub fn connect() -> anyhow::Result<Self> {
        let docker = Docker::connect_with_unix_defaults()?;
        Ok(Self { docker })
    }
}

#[async_trait]
impl ContainerRuntime for DockerRepo {
    #[instrument(skip(self), fields(repo = "docker", operation = "list_containers"))]
    async fn list_containers(&self) -> Result<Vec<RuntimeContainer>, RuntimeError> {
        let options = ListContainersOptions {
            all: true,
            ..Default::default()
        };
        let containers = self.docker.list_containers(Some(options)).await?;
        Ok(containers.into_iter().map(RuntimeContainer::from).collect())
    }

    #[instrument(skip(self), fields(repo = "docker", operation = "inspect_health"))]
    async fn inspect_health(&self, id: &str) -> Result<Option<HealthStatus>, RuntimeError> {
        let details = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await?;
        Ok(details
            .state
            .and_then(|s| s.health)
            .and_then(|h| h.status)
            .map(|status| HealthStatus::from_docker(&status.to_string())))
    }
}
