//! inventory-registry: which physical objects exist, and where they go
//!
//! Objects are catalogued per [`Color`](intent_parser::Color) under 1-based
//! ordinals and handed out strictly in ordinal order by
//! [`InventoryRegistry::claim_next`]. Bin drop-off points live in a read-only
//! [`PresetTable`]. Both can be loaded from a YAML workcell description.

mod types;
pub use types::InventoryEntry;

mod error;
pub use error::{InventoryError, Result};

mod registry;
pub use registry::InventoryRegistry;

mod presets;
pub use presets::PresetTable;

mod loader;
pub use loader::{load_workcell_file, parse_workcell, Workcell};
