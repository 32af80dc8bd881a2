use motion_facade::PlanningScene;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected membership of one object in the scene's two views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectExpectation {
    pub known: bool,
    pub attached: bool,
}

impl ObjectExpectation {
    /// After attach: held by the gripper, gone from the world list
    pub const ATTACHED: ObjectExpectation = ObjectExpectation {
        known: false,
        attached: true,
    };
    /// After detach: back in the world, no longer held
    pub const DETACHED: ObjectExpectation = ObjectExpectation {
        known: true,
        attached: false,
    };
    /// After remove: gone entirely
    pub const REMOVED: ObjectExpectation = ObjectExpectation {
        known: false,
        attached: false,
    };
}

impl fmt::Display for ObjectExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known = if self.known { "known" } else { "not known" };
        let attached = if self.attached { "attached" } else { "not attached" };
        write!(f, "{known}, {attached}")
    }
}

/// Query `scene` once and compare against `expected`.
///
/// A failing scene query counts as "not yet"; the caller's timeout bounds it.
pub fn object_state_matches<S>(scene: &S, name: &str, expected: ObjectExpectation) -> bool
where
    S: PlanningScene + ?Sized,
{
    let attached = match scene.list_attached(&[name]) {
        Ok(set) => set.contains(name),
        Err(e) => {
            tracing::debug!(object = name, "attached-objects query failed: {e}");
            return false;
        }
    };
    let known = match scene.list_known() {
        Ok(set) => set.contains(name),
        Err(e) => {
            tracing::debug!(object = name, "known-objects query failed: {e}");
            return false;
        }
    };
    attached == expected.attached && known == expected.known
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GateOutcome, ShutdownSignal, SyncGate};
    use motion_facade::{MockArm, MockArmConfig, MotionFacade};
    use std::time::Duration;

    #[test]
    fn test_expectations_follow_scene() -> anyhow::Result<()> {
        let mut arm = MockArm::with_objects(["R1"], MockArmConfig::default());
        assert!(object_state_matches(&arm, "R1", ObjectExpectation::DETACHED));
        assert!(!object_state_matches(&arm, "R1", ObjectExpectation::ATTACHED));

        arm.attach_object("R1")?;
        assert!(object_state_matches(&arm, "R1", ObjectExpectation::ATTACHED));

        arm.detach_object("R1")?;
        assert!(object_state_matches(&arm, "R1", ObjectExpectation::DETACHED));

        arm.remove_object("R1")?;
        assert!(object_state_matches(&arm, "R1", ObjectExpectation::REMOVED));
        Ok(())
    }

    #[test]
    fn test_gate_waits_out_scene_lag() -> anyhow::Result<()> {
        let mut arm = MockArm::with_objects(
            ["G1"],
            MockArmConfig {
                scene_lag_polls: 5,
                ..MockArmConfig::default()
            },
        );
        arm.attach_object("G1")?;
        let gate = SyncGate::new(Duration::from_millis(1), ShutdownSignal::new());
        let outcome = gate.await_predicate(
            || object_state_matches(&arm, "G1", ObjectExpectation::ATTACHED),
            Duration::from_secs(2),
        );
        assert_eq!(outcome, GateOutcome::Satisfied);
        Ok(())
    }

    #[test]
    fn test_display() {
        assert_eq!(ObjectExpectation::ATTACHED.to_string(), "not known, attached");
        assert_eq!(ObjectExpectation::REMOVED.to_string(), "not known, not attached");
    }
}
