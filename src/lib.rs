// Library for tests to access modules

pub mod config;
pub mod disk_repo;
pub mod docker_repo;
pub mod error;
pub mod metrics_repo;
pub mod models;
pub mod routes;
pub mod sanitize;
pub mod time_window;
pub mod version;
