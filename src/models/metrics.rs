// Recorded CPU / memory samples as served by the history endpoints

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CpuSample {
    /// Epoch milliseconds, string-encoded as stored.
    pub time: String,
    pub percent: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_friendly_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemorySample {
    /// Epoch milliseconds, string-encoded as stored.
    pub time: String,
    pub total: u64,
    pub available: u64,
    pub used: u64,
    pub used_percent: f64,
    pub free: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub human_friendly_time: Option<String>,
}
