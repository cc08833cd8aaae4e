//! Collector configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Which optional probes run, and how long asynchronous ones may take.
/// Everything is enabled and unbounded by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollectorConfig {
    /// `queryLocalFonts()` can raise a permission prompt.
    #[serde(alias = "local_fonts")]
    pub local_fonts: bool,
    pub battery: bool,
    /// Upper bound for each asynchronous probe. `None` waits forever.
    #[serde(alias = "probe_timeout_ms")]
    pub probe_timeout_ms: Option<u32>,
}

impl CollectorConfig {
    pub fn probe_timeout(&self) -> Option<Duration> {
        self.probe_timeout_ms
            .map(|ms| Duration::from_millis(u64::from(ms)))
    }
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            local_fonts: true,
            battery: true,
            probe_timeout_ms: None,
        }
    }
}
