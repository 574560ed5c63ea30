// Root filesystem capacity

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskUsage {
    pub total: u64,
    pub used: u64,
    pub free: u64,
    pub used_percent: f64,
}

impl DiskUsage {
    /// Derive usage from statvfs-style counters. `used_percent` is 0 for an empty filesystem.
    pub fn from_blocks(blocks: u64, blocks_free: u64, block_size: u64) -> Self {
        let total = blocks.saturating_mul(block_size);
        let free = blocks_free.saturating_mul(block_size);
        let used = total.saturating_sub(free);
        let used_percent = if total > 0 {
            (used as f64 / total as f64) * 100.0
        } else {
            0.0
        };
        Self {
            total,
            used,
            free,
            used_percent,
        }
    }
}
