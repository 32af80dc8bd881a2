//! motion-facade: the only operations the orchestrator may invoke on the arm
//!
//! The planner and the planning-scene service are external collaborators. This
//! crate pins down the narrow contract the orchestrator relies on (five motion
//! and scene-mutation calls plus two scene queries) and ships a `mock` backend,
//! enabled by default, so the orchestrator can be exercised on any host.

mod types;
pub use types::{GoalPose, JointTarget, Orientation, Vector3};

mod error;
pub use error::{MotionError, Result};

mod traits;
pub use traits::{MotionFacade, PlanningScene};

mod tolerance;
pub use tolerance::{joints_within, pose_within, DEFAULT_TOLERANCE};

#[cfg(feature = "mock")]
mod mock;

#[cfg(feature = "mock")]
pub use mock::{MockArm, MockArmConfig, MotionCall};
