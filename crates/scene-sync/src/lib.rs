//! scene-sync: wait for the planning scene to catch up
//!
//! The scene service applies attach/detach/remove asynchronously and never
//! acknowledges them. [`SyncGate`] polls a predicate at a fixed interval until
//! it holds, a timeout elapses, or the process-wide [`ShutdownSignal`] fires.
//! The gate itself never mutates anything.

mod shutdown;
pub use shutdown::ShutdownSignal;

mod gate;
pub use gate::{GateOutcome, SyncGate, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT};

mod predicate;
pub use predicate::{object_state_matches, ObjectExpectation};
