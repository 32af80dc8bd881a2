use intent_parser::Color;
use motion_facade::Vector3;
use std::collections::BTreeMap;

/// Fixed drop-off coordinates per colour, plus an optional home point.
///
/// Populated once at startup; there are no mutators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PresetTable {
    bins: BTreeMap<Color, Vector3>,
    home: Option<Vector3>,
}

impl PresetTable {
    pub fn new<I>(bins: I, home: Option<Vector3>) -> Self
    where
        I: IntoIterator<Item = (Color, Vector3)>,
    {
        Self {
            bins: bins.into_iter().collect(),
            home,
        }
    }

    pub fn bin(&self, color: Color) -> Option<Vector3> {
        self.bins.get(&color).copied()
    }

    pub fn home(&self) -> Option<Vector3> {
        self.home
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}
