use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

/// Tuning knobs for the dashboard synchronization engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfig {
    /// How long a completed fetch counts as fresh, in milliseconds.
    /// Within the window `ensure_fresh` does not touch the network.
    #[serde(default = "default_freshness_window_ms")]
    pub freshness_window_ms: u64,

    /// Automatic retries for a failed fetch. Mutations are never retried.
    #[serde(default = "default_fetch_retry_limit")]
    pub fetch_retry_limit: u32,
}

fn default_freshness_window_ms() -> u64 {
    60_000
}

fn default_fetch_retry_limit() -> u32 {
    1
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            freshness_window_ms: default_freshness_window_ms(),
            fetch_retry_limit: default_fetch_retry_limit(),
        }
    }
}

impl DashboardConfig {
    pub fn freshness_window(&self) -> Duration {
        Duration::from_millis(self.freshness_window_ms)
    }
}
