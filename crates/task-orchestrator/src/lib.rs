//! task-orchestrator: sequence spoken pick/place intents into arm motions
//!
//! The orchestrator drains the command and colour queues pairwise. Each pair
//! becomes one task with its own [`TaskState`] machine; every scene mutation is
//! confirmed through a [`SyncGate`](scene_sync::SyncGate) wait before the task
//! advances. Task failures are recorded and the session moves on; only
//! cancellation aborts the remaining queue.

mod config;
pub use config::OrchestratorConfig;

mod state;
pub use state::{TaskMachine, TaskState};

mod report;
pub use report::{Diagnostic, MotionStep, SessionReport, TaskError, TaskRecord, Termination};

mod metrics;
pub use metrics::SessionMetrics;

mod orchestrator;
pub use orchestrator::Orchestrator;
