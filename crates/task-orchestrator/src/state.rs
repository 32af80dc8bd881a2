use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of one (command, colour) task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Idle,
    MovingToSource,
    Grasping,
    MovingToBin,
    Releasing,
    Done,
    Failed,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Done | TaskState::Failed)
    }

    /// Pick: Idle → MovingToSource → Grasping → Done.
    /// Place: Idle → MovingToBin → Releasing → Done.
    /// Any non-terminal state may fail.
    pub fn can_transition_to(self, next: TaskState) -> bool {
        use TaskState::*;
        match (self, next) {
            (from, Failed) => !from.is_terminal(),
            (Idle, MovingToSource)
            | (MovingToSource, Grasping)
            | (Grasping, Done)
            | (Idle, MovingToBin)
            | (MovingToBin, Releasing)
            | (Releasing, Done) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A task's current state plus every state it passed through
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskMachine {
    state: TaskState,
    history: Vec<TaskState>,
}

impl TaskMachine {
    pub fn new() -> Self {
        Self {
            state: TaskState::Idle,
            history: vec![TaskState::Idle],
        }
    }

    pub fn state(&self) -> TaskState {
        self.state
    }

    pub fn history(&self) -> &[TaskState] {
        &self.history
    }

    /// Move to `next`. An illegal transition lands in `Failed` instead.
    pub fn advance(&mut self, next: TaskState) {
        if self.state.can_transition_to(next) {
            tracing::debug!(from = %self.state, to = %next, "task transition");
            self.set(next);
        } else {
            tracing::error!(from = %self.state, to = %next, "illegal task transition");
            if !self.state.is_terminal() {
                self.set(TaskState::Failed);
            }
        }
    }

    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.set(TaskState::Failed);
        }
    }

    fn set(&mut self, next: TaskState) {
        self.state = next;
        self.history.push(next);
    }
}

impl Default for TaskMachine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_path() {
        let mut m = TaskMachine::new();
        m.advance(TaskState::MovingToSource);
        m.advance(TaskState::Grasping);
        m.advance(TaskState::Done);
        assert_eq!(m.state(), TaskState::Done);
        assert_eq!(
            m.history(),
            &[
                TaskState::Idle,
                TaskState::MovingToSource,
                TaskState::Grasping,
                TaskState::Done
            ]
        );
    }

    #[test]
    fn test_place_path() {
        let mut m = TaskMachine::new();
        m.advance(TaskState::MovingToBin);
        m.advance(TaskState::Releasing);
        m.advance(TaskState::Done);
        assert_eq!(m.state(), TaskState::Done);
    }

    #[test]
    fn test_illegal_transition_fails_task() {
        let mut m = TaskMachine::new();
        m.advance(TaskState::Releasing);
        assert_eq!(m.state(), TaskState::Failed);
    }

    #[test]
    fn test_terminal_states_are_sticky() {
        let mut m = TaskMachine::new();
        m.fail();
        m.fail();
        m.advance(TaskState::MovingToSource);
        assert_eq!(m.state(), TaskState::Failed);
        assert_eq!(m.history(), &[TaskState::Idle, TaskState::Failed]);

        assert!(!TaskState::Done.can_transition_to(TaskState::Failed));
        assert!(!TaskState::Grasping.can_transition_to(TaskState::MovingToBin));
    }
}
