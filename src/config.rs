use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub runtime: RuntimeConfig,
    #[serde(default)]
    pub disk: DiskConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
    /// Shared secret; clients send `Authorization: Bearer <token>`. `TOKEN` env overrides.
    #[serde(default)]
    pub token: String,
    /// Diagnostic mode: history responses carry `humanFriendlyTime`.
    #[serde(default)]
    pub debug: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default = "default_list_timeout_ms")]
    pub list_timeout_ms: u64,
    /// Per-container inspect deadline on /api/containers; on expiry health is "unknown".
    #[serde(default = "default_inspect_timeout_ms")]
    pub inspect_timeout_ms: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            list_timeout_ms: default_list_timeout_ms(),
            inspect_timeout_ms: default_inspect_timeout_ms(),
        }
    }
}

impl RuntimeConfig {
    pub fn list_timeout(&self) -> Duration {
        Duration::from_millis(self.list_timeout_ms)
    }

    pub fn inspect_timeout(&self) -> Duration {
        Duration::from_millis(self.inspect_timeout_ms)
    }
}

fn default_list_timeout_ms() -> u64 {
    5000
}

fn default_inspect_timeout_ms() -> u64 {
    2000
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiskConfig {
    #[serde(default = "default_disk_path")]
    pub path: String,
}

impl Default for DiskConfig {
    fn default() -> Self {
        Self {
            path: default_disk_path(),
        }
    }
}

fn default_disk_path() -> String {
    "/".into()
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        let mut config: AppConfig = toml::from_str(&s)?;
        if let Ok(token) = std::env::var("TOKEN") {
            config.server.token = token;
        }
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.token.is_empty(),
            "server.token must be non-empty (set it in the config file or TOKEN)"
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.runtime.list_timeout_ms > 0,
            "runtime.list_timeout_ms must be > 0, got {}",
            self.runtime.list_timeout_ms
        );
        anyhow::ensure!(
            self.runtime.inspect_timeout_ms > 0,
            "runtime.inspect_timeout_ms must be > 0, got {}",
            self.runtime.inspect_timeout_ms
        );
        anyhow::ensure!(!self.disk.path.is_empty(), "disk.path must be non-empty");
        Ok(())
    }
}
