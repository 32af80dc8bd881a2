use crate::{GoalPose, JointTarget, Result};
use std::collections::BTreeSet;

/// Motion and scene-mutation calls available to the orchestrator.
///
/// Motion calls block until the trajectory has been executed. `Ok(false)` means
/// the arm moved but did not end within tolerance of the target. Scene
/// mutations may be applied asynchronously by the scene service; callers must
/// confirm their effect through [`PlanningScene`] queries.
pub trait MotionFacade {
    /// Plan and execute to a joint configuration.
    fn move_to_joint_state(&mut self, target: &JointTarget) -> Result<bool>;

    /// Plan and execute to an end-effector pose.
    fn move_to_pose_goal(&mut self, goal: &GoalPose) -> Result<bool>;

    /// Rigidly attach a known object to the end effector.
    fn attach_object(&mut self, name: &str) -> Result<()>;

    /// Release an attached object back into the world.
    fn detach_object(&mut self, name: &str) -> Result<()>;

    /// Remove a (detached) object from the world model.
    fn remove_object(&mut self, name: &str) -> Result<()>;
}

/// Read-only view of the planning scene.
pub trait PlanningScene {
    /// Subset of `names` currently attached to the robot.
    fn list_attached(&self, names: &[&str]) -> Result<BTreeSet<String>>;

    /// Objects present in the world model and not attached.
    fn list_known(&self) -> Result<BTreeSet<String>>;
}
