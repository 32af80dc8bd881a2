use motion_facade::Vector3;
use serde::{Deserialize, Serialize};

/// A named physical object and where it waits to be picked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryEntry {
    pub name: String,
    pub location: Vector3,
}

impl InventoryEntry {
    pub fn new(name: impl Into<String>, location: Vector3) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}
