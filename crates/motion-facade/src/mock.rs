use crate::{
    joints_within, pose_within, GoalPose, JointTarget, MotionError, MotionFacade, PlanningScene,
    Result, Vector3, DEFAULT_TOLERANCE,
};
use parking_lot::Mutex;
use std::collections::{BTreeSet, VecDeque};

/// Knobs for the simulated arm and scene service
#[derive(Clone, Debug, Default)]
pub struct MockArmConfig {
    /// Scene queries that must pass before a mutation becomes visible
    pub scene_lag_polls: u32,
    /// Accept scene mutations but never apply them
    pub drop_scene_updates: bool,
    /// 1-based index of the motion call that fails with an execution error
    pub fail_motion_at: Option<usize>,
    /// Offset added to every reached X position (metres)
    pub position_error: f64,
}

/// One recorded call on the façade
#[derive(Clone, Debug, PartialEq)]
pub enum MotionCall {
    MoveToJointState(Vec<f64>),
    MoveToPoseGoal(Vector3),
    Attach(String),
    Detach(String),
    Remove(String),
}

impl MotionCall {
    pub fn is_motion(&self) -> bool {
        matches!(
            self,
            MotionCall::MoveToJointState(_) | MotionCall::MoveToPoseGoal(_)
        )
    }
}

#[derive(Clone, Copy, Debug)]
enum SceneOp {
    Attach,
    Detach,
    Remove,
}

#[derive(Debug)]
struct PendingUpdate {
    op: SceneOp,
    name: String,
    polls_left: u32,
}

#[derive(Debug, Default)]
struct SceneState {
    known: BTreeSet<String>,
    attached: BTreeSet<String>,
    pending: VecDeque<PendingUpdate>,
    pose: GoalPose,
    joints: Vec<f64>,
    motions: usize,
    calls: Vec<MotionCall>,
}

impl SceneState {
    fn apply(&mut self, op: SceneOp, name: &str) {
        match op {
            SceneOp::Attach => {
                self.known.remove(name);
                self.attached.insert(name.to_string());
            }
            SceneOp::Detach => {
                self.attached.remove(name);
                self.known.insert(name.to_string());
            }
            SceneOp::Remove => {
                self.known.remove(name);
            }
        }
    }

    fn tick(&mut self) {
        let mut still_pending = VecDeque::with_capacity(self.pending.len());
        while let Some(mut update) = self.pending.pop_front() {
            if update.polls_left == 0 {
                self.apply(update.op, &update.name);
            } else {
                update.polls_left -= 1;
                still_pending.push_back(update);
            }
        }
        self.pending = still_pending;
    }
}

/// An in-process arm and planning scene. Each instance is independent.
pub struct MockArm {
    config: MockArmConfig,
    state: Mutex<SceneState>,
}

impl MockArm {
    /// Create an arm whose scene already knows `objects`
    pub fn with_objects<I, S>(objects: I, config: MockArmConfig) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let state = SceneState {
            known: objects.into_iter().map(Into::into).collect(),
            joints: JointTarget::rest().positions,
            ..SceneState::default()
        };
        Self {
            config,
            state: Mutex::new(state),
        }
    }

    /// Every call made so far, in order
    pub fn calls(&self) -> Vec<MotionCall> {
        self.state.lock().calls.clone()
    }

    pub fn motion_count(&self) -> usize {
        self.state.lock().motions
    }

    pub fn current_pose(&self) -> GoalPose {
        self.state.lock().pose
    }

    pub fn current_joints(&self) -> Vec<f64> {
        self.state.lock().joints.clone()
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.state.lock().known.contains(name)
    }

    pub fn is_attached(&self, name: &str) -> bool {
        self.state.lock().attached.contains(name)
    }

    fn begin_motion(&self, state: &mut SceneState) -> Result<()> {
        state.motions += 1;
        if self.config.fail_motion_at == Some(state.motions) {
            tracing::debug!(motion = state.motions, "mock arm injecting motion failure");
            return Err(MotionError::Execution(format!(
                "injected failure on motion {}",
                state.motions
            )));
        }
        Ok(())
    }

    fn mutate(&self, op: SceneOp, name: &str) {
        let mut state = self.state.lock();
        if self.config.drop_scene_updates {
            return;
        }
        if self.config.scene_lag_polls == 0 {
            state.apply(op, name);
        } else {
            state.pending.push_back(PendingUpdate {
                op,
                name: name.to_string(),
                polls_left: self.config.scene_lag_polls,
            });
        }
    }

    fn pending_op(&self, name: &str, op_matches: fn(SceneOp) -> bool) -> bool {
        self.state
            .lock()
            .pending
            .iter()
            .any(|u| u.name == name && op_matches(u.op))
    }
}

impl MotionFacade for MockArm {
    fn move_to_joint_state(&mut self, target: &JointTarget) -> Result<bool> {
        let mut state = self.state.lock();
        state
            .calls
            .push(MotionCall::MoveToJointState(target.positions.clone()));
        self.begin_motion(&mut state)?;
        let mut reached = target.positions.clone();
        if let Some(first) = reached.first_mut() {
            *first += self.config.position_error;
        }
        state.joints = reached;
        Ok(joints_within(
            &target.positions,
            &state.joints,
            DEFAULT_TOLERANCE,
        ))
    }

    fn move_to_pose_goal(&mut self, goal: &GoalPose) -> Result<bool> {
        let mut state = self.state.lock();
        state.calls.push(MotionCall::MoveToPoseGoal(goal.position));
        self.begin_motion(&mut state)?;
        let mut reached = *goal;
        reached.position.x += self.config.position_error;
        state.pose = reached;
        Ok(pose_within(goal, &state.pose, DEFAULT_TOLERANCE))
    }

    fn attach_object(&mut self, name: &str) -> Result<()> {
        {
            let mut state = self.state.lock();
            state.calls.push(MotionCall::Attach(name.to_string()));
            if !state.known.contains(name)
                && !self.config.drop_scene_updates
                && !state.pending.iter().any(|u| u.name == name)
            {
                return Err(MotionError::UnknownObject(name.to_string()));
            }
        }
        self.mutate(SceneOp::Attach, name);
        Ok(())
    }

    fn detach_object(&mut self, name: &str) -> Result<()> {
        {
            let mut state = self.state.lock();
            state.calls.push(MotionCall::Detach(name.to_string()));
        }
        if !self.is_attached(name)
            && !self.config.drop_scene_updates
            && !self.pending_op(name, |op| matches!(op, SceneOp::Attach))
        {
            return Err(MotionError::NotAttached(name.to_string()));
        }
        self.mutate(SceneOp::Detach, name);
        Ok(())
    }

    fn remove_object(&mut self, name: &str) -> Result<()> {
        self.state
            .lock()
            .calls
            .push(MotionCall::Remove(name.to_string()));
        self.mutate(SceneOp::Remove, name);
        Ok(())
    }
}

impl PlanningScene for MockArm {
    fn list_attached(&self, names: &[&str]) -> Result<BTreeSet<String>> {
        let mut state = self.state.lock();
        state.tick();
        Ok(names
            .iter()
            .filter(|n| state.attached.contains(**n))
            .map(|n| n.to_string())
            .collect())
    }

    fn list_known(&self) -> Result<BTreeSet<String>> {
        let mut state = self.state.lock();
        state.tick();
        Ok(state.known.clone())
    }
}
