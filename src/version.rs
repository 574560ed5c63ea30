// Build-time package identity, served by GET /api/version

use serde::Serialize;

/// Package version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Package name (from Cargo.toml).
pub const NAME: &str = env!("CARGO_PKG_NAME");

#[derive(Debug, Clone, Copy, Serialize)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version: &'static str,
}

pub fn current() -> VersionInfo {
    VersionInfo {
        name: NAME,
        version: VERSION,
    }
}
