use crate::{TaskMachine, TaskState};
use intent_parser::{Color, Command};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

/// Which façade call a motion failure came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionStep {
    Approach,
    Attach,
    MoveToBin,
    Detach,
    Remove,
    Retract,
}

impl fmt::Display for MotionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MotionStep::Approach => "approach",
            MotionStep::Attach => "attach",
            MotionStep::MoveToBin => "move to bin",
            MotionStep::Detach => "detach",
            MotionStep::Remove => "remove",
            MotionStep::Retract => "retract",
        };
        f.write_str(s)
    }
}

/// Why a task did not reach `Done`
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskError {
    #[error("invalid/unavailable box: no {color} objects left")]
    Exhausted { color: Color },
    #[error("invalid selector: {detail}")]
    InvalidSelector { detail: String },
    #[error("{step} failed: {detail}")]
    MotionFailed { step: MotionStep, detail: String },
    #[error("timed out waiting for {object} to be {expected}")]
    SyncTimeout { object: String, expected: String },
    #[error("cancelled by shutdown request")]
    Cancelled,
    #[error("gripper already holds {held}")]
    GripperOccupied { held: String },
    #[error("nothing held to place")]
    NothingHeld,
}

/// One reported problem
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    #[serde(with = "time::serde::rfc3339")]
    pub at: OffsetDateTime,
    /// Index into [`SessionReport::tasks`], if tied to a task
    pub task: Option<usize>,
    pub error: TaskError,
}

impl Diagnostic {
    pub fn new(task: Option<usize>, error: TaskError) -> Self {
        Self {
            at: OffsetDateTime::now_utc(),
            task,
            error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.task {
            Some(i) => write!(f, "task #{i}: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Outcome of one (command, colour) pair
#[derive(Debug, Clone, Serialize)]
pub struct TaskRecord {
    pub index: usize,
    pub command: Command,
    pub color: Color,
    /// Object claimed or released by this task
    pub object: Option<String>,
    pub machine: TaskMachine,
}

impl TaskRecord {
    pub fn new(index: usize, command: Command, color: Color) -> Self {
        Self {
            index,
            command,
            color,
            object: None,
            machine: TaskMachine::new(),
        }
    }

    pub fn state(&self) -> TaskState {
        self.machine.state()
    }
}

/// Why the session stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Termination {
    /// Every queued pair was processed
    QueueDrained,
    /// All inventory was placed before the queue ran out
    InventoryExhausted,
    /// Shutdown was requested
    Cancelled,
}

/// Summary returned by [`Orchestrator::run_session`](crate::Orchestrator::run_session)
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub session_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub tasks: Vec<TaskRecord>,
    pub diagnostics: Vec<Diagnostic>,
    /// Place tasks that released and removed an object
    pub cycles_completed: usize,
    /// Queue entries left untouched when the session stopped early
    pub unprocessed: usize,
    pub inventory_exhausted: bool,
    pub termination: Termination,
}

impl SessionReport {
    pub(crate) fn begin() -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            session_id: Uuid::new_v4(),
            started_at: now,
            finished_at: now,
            tasks: Vec::new(),
            diagnostics: Vec::new(),
            cycles_completed: 0,
            unprocessed: 0,
            inventory_exhausted: false,
            termination: Termination::QueueDrained,
        }
    }

    pub fn completed(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.state() == TaskState::Done)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.state() == TaskState::Failed)
            .count()
    }

    pub fn is_cancelled(&self) -> bool {
        self.termination == Termination::Cancelled
    }

    pub fn has_diagnostic(&self, pred: impl Fn(&TaskError) -> bool) -> bool {
        self.diagnostics.iter().any(|d| pred(&d.error))
    }

    pub fn summary(&self) -> String {
        format!(
            "session {}: {} completed, {} failed, {} cycles, {} diagnostics, {} unprocessed ({:?})",
            self.session_id,
            self.completed(),
            self.failed(),
            self.cycles_completed,
            self.diagnostics.len(),
            self.unprocessed,
            self.termination
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut report = SessionReport::begin();
        let mut done = TaskRecord::new(0, Command::Pick, Color::Red);
        done.machine.advance(TaskState::MovingToSource);
        done.machine.advance(TaskState::Grasping);
        done.machine.advance(TaskState::Done);
        let mut failed = TaskRecord::new(1, Command::Place, Color::Red);
        failed.machine.fail();
        report.tasks = vec![done, failed];
        assert_eq!(report.completed(), 1);
        assert_eq!(report.failed(), 1);
        assert!(!report.is_cancelled());
    }

    #[test]
    fn test_json_shape() {
        let mut report = SessionReport::begin();
        report.diagnostics.push(Diagnostic::new(
            Some(0),
            TaskError::Exhausted { color: Color::Blue },
        ));
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(json["diagnostics"][0]["error"]["kind"], "exhausted");
        assert_eq!(json["diagnostics"][0]["error"]["color"], "blue");
        assert_eq!(json["termination"], "queue_drained");
    }

    #[test]
    fn test_error_messages() {
        let e = TaskError::SyncTimeout {
            object: "R1".into(),
            expected: "not known, attached".into(),
        };
        assert_eq!(e.to_string(), "timed out waiting for R1 to be not known, attached");
        let e = TaskError::MotionFailed {
            step: MotionStep::MoveToBin,
            detail: "boom".into(),
        };
        assert_eq!(e.to_string(), "move to bin failed: boom");
    }
}
