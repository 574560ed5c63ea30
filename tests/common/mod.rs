// Shared test helpers
#![allow(dead_code)]

use async_trait::async_trait;
use sentinel::docker_repo::{ContainerRuntime, RuntimeContainer, RuntimeError};
use sentinel::metrics_repo::MetricsRepo;
use sentinel::models::HealthStatus;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

pub const TEST_TOKEN: &str = "s3cret";

pub fn test_config_str(debug: bool) -> String {
    format!(
        r#"
[server]
port = 8888
host = "127.0.0.1"
token = "{TEST_TOKEN}"
debug = {debug}

[database]
path = "data/test.db"
max_pool_size = 2

[runtime]
list_timeout_ms = 1000
inspect_timeout_ms = 200
"#
    )
}

/// In-memory runtime: fixed list, per-id health, counts every call.
#[derive(Default)]
pub struct FakeRuntime {
    pub containers: Vec<RuntimeContainer>,
    /// Missing id => inspect error.
    pub health: HashMap<String, Option<HealthStatus>>,
    pub list_fails: bool,
    pub calls: AtomicUsize,
}

impl FakeRuntime {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

pub fn docker_error(message: &str) -> RuntimeError {
    RuntimeError::Docker(bollard::errors::Error::DockerResponseServerError {
        status_code: 404,
        message: message.into(),
    })
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn list_containers(&self) -> Result<Vec<RuntimeContainer>, RuntimeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.list_fails {
            return Err(docker_error("Cannot connect to the Docker daemon"));
        }
        Ok(self.containers.clone())
    }

    async fn inspect_health(&self, id: &str) -> Result<Option<HealthStatus>, RuntimeError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.health
            .get(id)
            .copied()
            .ok_or_else(|| docker_error("No such container"))
    }
}

pub fn runtime_container(id: &str, names: &[&str], state: &str) -> RuntimeContainer {
    RuntimeContainer {
        id: id.into(),
        image: format!("{id}-image:latest"),
        names: names.iter().map(|n| n.to_string()).collect(),
        state: state.into(),
        labels: HashMap::from([("coolify.managed".to_string(), "true".to_string())]),
    }
}

/// Fresh store in a temp dir. `init` false leaves it without tables, so any query fails.
pub async fn temp_repo(init: bool) -> (TempDir, MetricsRepo) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("metrics.db");
    let repo = MetricsRepo::connect(path.to_str().unwrap(), 2).await.unwrap();
    if init {
        repo.init().await.unwrap();
    }
    (dir, repo)
}

pub async fn insert_cpu(repo: &MetricsRepo, time: &str, container_id: &str, percent: &str) {
    sqlx::query("INSERT INTO container_cpu_usage (time, container_id, percent) VALUES (?, ?, ?)")
        .bind(time)
        .bind(container_id)
        .bind(percent)
        .execute(repo.pool())
        .await
        .unwrap();
}

pub async fn insert_memory(repo: &MetricsRepo, time: &str, container_id: &str, fields: [&str; 5]) {
    let [total, available, used, used_percent, free] = fields;
    sqlx::query(
        "INSERT INTO container_memory_usage (time, container_id, total, available, used, usedPercent, free) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(time)
    .bind(container_id)
    .bind(total)
    .bind(available)
    .bind(used)
    .bind(used_percent)
    .bind(free)
    .execute(repo.pool())
    .await
    .unwrap();
}
