use crate::{InventoryEntry, InventoryRegistry, PresetTable};
use anyhow::Context;
use intent_parser::Color;
use motion_facade::{JointTarget, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// On-disk workcell description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WorkcellFile {
    #[serde(default)]
    catalogs: BTreeMap<Color, Vec<InventoryEntry>>,
    #[serde(default)]
    bins: BTreeMap<Color, Vector3>,
    #[serde(default)]
    home: Option<Vector3>,
    #[serde(default)]
    rest_joints: Option<JointTarget>,
}

/// Everything the orchestrator needs to know about the physical cell
#[derive(Debug, Clone)]
pub struct Workcell {
    pub registry: InventoryRegistry,
    pub presets: PresetTable,
    pub rest_joints: Option<JointTarget>,
}

impl Workcell {
    /// Two boxes per colour in front of the arm, one bin per colour around it
    pub fn reference() -> Self {
        let mut registry = InventoryRegistry::new();
        let catalogs = [
            (
                Color::Red,
                [("R1", [0.4, 0.3, 0.4]), ("R2", [0.6, 0.0, 0.4])],
            ),
            (
                Color::Green,
                [("G1", [0.4, 0.0, 0.4]), ("G2", [0.6, -0.3, 0.4])],
            ),
            (
                Color::Blue,
                [("B1", [0.4, -0.3, 0.4]), ("B2", [0.6, 0.3, 0.4])],
            ),
        ];
        for (color, items) in catalogs {
            let entries = items
                .into_iter()
                .map(|(name, loc)| InventoryEntry::new(name, Vector3::from(loc)));
            // Names above are unique, so registration cannot clash.
            if let Err(e) = registry.insert_catalog(color, entries) {
                tracing::error!("reference workcell rejected: {e}");
            }
        }
        let presets = PresetTable::new(
            [
                (Color::Blue, Vector3::new(0.0, 0.5, 0.3)),
                (Color::Green, Vector3::new(-0.5, 0.0, 0.3)),
                (Color::Red, Vector3::new(0.0, -0.5, 0.3)),
            ],
            Some(Vector3::new(0.5, 0.0, 0.5)),
        );
        Self {
            registry,
            presets,
            rest_joints: Some(JointTarget::rest()),
        }
    }

    /// Names of every catalogued object, for seeding a planning scene
    pub fn object_names(&self) -> Vec<String> {
        self.registry.entries().map(|e| e.name.clone()).collect()
    }
}

pub fn parse_workcell(raw: &str) -> anyhow::Result<Workcell> {
    let file: WorkcellFile = serde_yaml::from_str(raw).context("decoding workcell")?;
    let mut registry = InventoryRegistry::new();
    for (color, entries) in file.catalogs {
        registry
            .insert_catalog(color, entries)
            .with_context(|| format!("registering {color} catalog"))?;
    }
    Ok(Workcell {
        registry,
        presets: PresetTable::new(file.bins, file.home),
        rest_joints: file.rest_joints,
    })
}

pub fn load_workcell_file(path: impl AsRef<Path>) -> anyhow::Result<Workcell> {
    let path = path.as_ref();
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading workcell: {}", path.display()))?;
    let cell = parse_workcell(&raw).with_context(|| format!("parsing yaml: {}", path.display()))?;
    tracing::info!(
        objects = cell.registry.entries().count(),
        bins = cell.presets.len(),
        "loaded workcell {}",
        path.display()
    );
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CELL: &str = r#"
catalogs:
  red:
    - { name: R1, location: [0.4, 0.3, 0.4] }
    - { name: R2, location: [0.6, 0.0, 0.4] }
  blue:
    - { name: B1, location: [0.4, -0.3, 0.4] }
bins:
  red: [0.0, -0.5, 0.3]
  blue: [0.0, 0.5, 0.3]
home: [0.5, 0.0, 0.5]
rest_joints: [0.0, 0.0, 0.0, -1.57, 0.0, 1.57, 0.785]
"#;

    #[test]
    fn test_parse_workcell() {
        let mut cell = parse_workcell(CELL).unwrap();
        assert_eq!(cell.registry.catalog_len(Color::Red), 2);
        assert_eq!(cell.registry.catalog_len(Color::Blue), 1);
        assert_eq!(cell.registry.catalog_len(Color::Green), 0);
        assert_eq!(cell.presets.bin(Color::Blue), Some(Vector3::new(0.0, 0.5, 0.3)));
        assert_eq!(cell.presets.bin(Color::Green), None);
        assert_eq!(cell.rest_joints, Some(JointTarget::rest()));

        let first = cell.registry.claim_next(Color::Red).unwrap();
        assert_eq!(first.name, "R1");
        assert_eq!(first.location, Vector3::new(0.4, 0.3, 0.4));
    }

    #[test]
    fn test_unknown_color_rejected() {
        let raw = "catalogs:\n  yellow:\n    - { name: Y1, location: [0, 0, 0] }\n";
        assert!(parse_workcell(raw).is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let raw = r#"
catalogs:
  red:
    - { name: X, location: [0, 0, 0] }
  green:
    - { name: X, location: [1, 0, 0] }
"#;
        let err = parse_workcell(raw).unwrap_err();
        assert!(format!("{err:#}").contains("duplicate object name"));
    }

    #[test]
    fn test_empty_file_is_an_empty_cell() {
        let cell = parse_workcell("{}").unwrap();
        assert!(cell.registry.is_fully_exhausted());
        assert!(cell.presets.is_empty());
        assert!(cell.rest_joints.is_none());
    }

    #[test]
    fn test_reference_cell() {
        let cell = Workcell::reference();
        for color in Color::ALL {
            assert_eq!(cell.registry.catalog_len(color), 2);
            assert!(cell.presets.bin(color).is_some());
        }
        assert_eq!(cell.object_names().len(), 6);
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CELL.as_bytes()).unwrap();
        let cell = load_workcell_file(file.path()).unwrap();
        assert_eq!(cell.object_names().len(), 3);
        assert!(load_workcell_file("/nonexistent/workcell.yaml").is_err());
    }
}
