// Domain models

mod container;
mod disk;
mod metrics;

pub use container::{ContainerSnapshot, ContainerState, HealthStatus};
pub use disk::DiskUsage;
pub use metrics::{CpuSample, MemorySample};
