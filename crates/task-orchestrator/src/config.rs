use motion_facade::{JointTarget, Orientation};
use scene_sync::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Orchestrator tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    /// Per-wait limit for a scene mutation to become visible
    #[serde(default = "default_sync_timeout_ms")]
    pub sync_timeout_ms: u64,
    /// Interval between scene queries while waiting
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Orientation used for every pick and place goal
    #[serde(default = "default_orientation")]
    pub orientation_hint: Orientation,
    /// Configuration the arm returns to after each place
    #[serde(default)]
    pub rest_joints: JointTarget,
}

fn default_sync_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_orientation() -> Orientation {
    Orientation::DOWNWARD
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            sync_timeout_ms: default_sync_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            orientation_hint: default_orientation(),
            rest_joints: JointTarget::rest(),
        }
    }
}

impl OrchestratorConfig {
    pub fn sync_timeout(&self) -> Duration {
        Duration::from_millis(self.sync_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = OrchestratorConfig::default();
        assert_eq!(cfg.sync_timeout(), Duration::from_secs(4));
        assert_eq!(cfg.poll_interval(), Duration::from_millis(100));
        assert_eq!(cfg.orientation_hint, Orientation::DOWNWARD);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let cfg: OrchestratorConfig = serde_json::from_str(r#"{"sync_timeout_ms": 250}"#).unwrap();
        assert_eq!(cfg.sync_timeout(), Duration::from_millis(250));
        assert_eq!(cfg.poll_interval_ms, 100);
        assert_eq!(cfg.rest_joints, JointTarget::rest());
    }
}
