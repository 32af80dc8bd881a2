use thiserror::Error;

pub type Result<T, E = MotionError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("planning failed: {0}")]
    Planning(String),
    #[error("execution failed: {0}")]
    Execution(String),
    #[error("object not in planning scene: {0}")]
    UnknownObject(String),
    #[error("object not attached: {0}")]
    NotAttached(String),
    #[error("scene service unavailable: {0}")]
    SceneUnavailable(String),
}
