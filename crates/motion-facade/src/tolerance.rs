//! Goal-reached checks applied after every executed motion

use crate::{GoalPose, Vector3};

/// Position (metres), orientation (radians) and joint (radians) tolerance
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// True when `actual` is within `tolerance` of `goal`.
///
/// Position error is Euclidean. Orientation error is the angle between the two
/// quaternions, so `q` and `-q` compare equal.
pub fn pose_within(goal: &GoalPose, actual: &GoalPose, tolerance: f64) -> bool {
    let d = Vector3::distance(&goal.position, &actual.position);
    let cos_phi_half = goal.orientation.dot(&actual.orientation).abs();
    d <= tolerance && cos_phi_half >= (tolerance / 2.0).cos()
}

/// Element-wise joint comparison; vectors of different length never match.
pub fn joints_within(goal: &[f64], actual: &[f64], tolerance: f64) -> bool {
    goal.len() == actual.len()
        && goal
            .iter()
            .zip(actual)
            .all(|(g, a)| (a - g).abs() <= tolerance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Orientation;

    #[test]
    fn test_pose_within_position() {
        let goal = GoalPose::new(Vector3::new(0.4, 0.3, 0.4), Orientation::DOWNWARD);
        let mut actual = goal;
        assert!(pose_within(&goal, &actual, DEFAULT_TOLERANCE));
        actual.position.x += 0.005;
        assert!(pose_within(&goal, &actual, DEFAULT_TOLERANCE));
        actual.position.x += 0.02;
        assert!(!pose_within(&goal, &actual, DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_pose_within_flipped_quaternion() {
        let goal = GoalPose::new(Vector3::default(), Orientation::DOWNWARD);
        let flipped = GoalPose::new(
            Vector3::default(),
            Orientation {
                x: 1.0,
                y: 0.0,
                z: 0.0,
                w: 0.0,
            },
        );
        assert!(pose_within(&goal, &flipped, DEFAULT_TOLERANCE));
        let upright = GoalPose::new(Vector3::default(), Orientation::IDENTITY);
        assert!(!pose_within(&goal, &upright, DEFAULT_TOLERANCE));
    }

    #[test]
    fn test_joints_within() {
        let goal = [0.0, -1.57, 1.57];
        assert!(joints_within(&goal, &[0.001, -1.565, 1.571], DEFAULT_TOLERANCE));
        assert!(!joints_within(&goal, &[0.0, -1.5, 1.57], DEFAULT_TOLERANCE));
        assert!(!joints_within(&goal, &[0.0, -1.57], DEFAULT_TOLERANCE));
    }
}
