use core::fmt;
use serde::{Deserialize, Serialize};

/// Cartesian point in the planning frame (metres)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 3]", into = "[f64; 3]")]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn distance(&self, other: &Vector3) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }
}

impl From<[f64; 3]> for Vector3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Vector3> for [f64; 3] {
    fn from(v: Vector3) -> Self {
        [v.x, v.y, v.z]
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3}, {:.3})", self.x, self.y, self.z)
    }
}

/// End-effector orientation as a quaternion
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Gripper pointing straight down (half turn about X)
    pub const DOWNWARD: Orientation = Orientation {
        x: -1.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };

    pub fn dot(&self, other: &Orientation) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Scratch pose goal, overwritten for every pick or place sub-goal
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GoalPose {
    pub position: Vector3,
    pub orientation: Orientation,
}

impl GoalPose {
    pub fn new(position: Vector3, orientation: Orientation) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Point the goal at a new position, keeping the orientation hint
    pub fn retarget(&mut self, position: Vector3) {
        self.position = position;
    }
}

/// Joint-space target (radians, one entry per joint)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointTarget {
    pub positions: Vec<f64>,
}

impl JointTarget {
    pub fn new(positions: Vec<f64>) -> Self {
        Self { positions }
    }

    /// Canonical 7-DOF rest configuration clear of the zero-pose singularity
    pub fn rest() -> Self {
        Self::new(vec![0.0, 0.0, 0.0, -1.57, 0.0, 1.57, 0.785])
    }
}

impl Default for JointTarget {
    fn default() -> Self {
        Self::rest()
    }
}
