use serde::{Deserialize, Serialize};

/// On-disk form of the coordinator settings. Every field may be omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockServiceConfigDto {
    pub report_interval_ms: Option<u64>,
    pub snapshot_interval_ms: Option<u64>,
    pub start_clock_key: Option<String>,
    pub recovery_timeout_ms: Option<u64>,
}
