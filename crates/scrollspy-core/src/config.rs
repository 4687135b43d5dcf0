//! Engine configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Tuning knobs for header tracking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Threshold position in px from the viewport top where a header is
    /// considered current when scrolling down.
    pub down_threshold: f64,
    /// Same as `down_threshold`, except when scrolling up.
    pub up_threshold: f64,
    /// Heading level at which sidebar entries start folding.
    pub fold_level: u8,
    /// How long scroll-driven updates stay disabled after a sidebar click,
    /// in milliseconds.
    pub suppress_ms: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            down_threshold: 150.0,
            up_threshold: 300.0,
            fold_level: 3,
            suppress_ms: 100,
        }
    }
}

impl TrackerConfig {
    /// Suppression window as a [`Duration`].
    pub fn suppress_window(&self) -> Duration {
        Duration::from_millis(self.suppress_ms)
    }
}
