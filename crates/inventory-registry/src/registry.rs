use crate::{InventoryEntry, InventoryError, Result};
use intent_parser::Color;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
struct ColorSlot {
    /// Ordinal handed out by the next successful claim (1-based)
    next_ordinal: usize,
    catalog: BTreeMap<usize, InventoryEntry>,
}

impl ColorSlot {
    fn new(entries: Vec<InventoryEntry>) -> Self {
        let catalog = entries
            .into_iter()
            .enumerate()
            .map(|(i, e)| (i + 1, e))
            .collect();
        Self {
            next_ordinal: 1,
            catalog,
        }
    }

    fn is_exhausted(&self) -> bool {
        self.next_ordinal > self.catalog.len()
    }
}

/// Per-colour counters and ordinal-keyed catalogs.
///
/// `claim_next` is the only mutator once catalogs are registered. It takes
/// `&mut self`, so lookup and increment form one step; a registry shared
/// between threads must sit behind a single lock.
#[derive(Debug, Clone, Default)]
pub struct InventoryRegistry {
    slots: BTreeMap<Color, ColorSlot>,
}

impl InventoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the catalog for `color`; ordinals follow iteration order.
    pub fn insert_catalog<I>(&mut self, color: Color, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = InventoryEntry>,
    {
        let entries: Vec<InventoryEntry> = entries.into_iter().collect();
        for (i, entry) in entries.iter().enumerate() {
            let clash_here = entries[..i].iter().any(|e| e.name == entry.name);
            let clash_elsewhere = self
                .slots
                .iter()
                .filter(|(c, _)| **c != color)
                .any(|(_, slot)| slot.catalog.values().any(|e| e.name == entry.name));
            if clash_here || clash_elsewhere {
                return Err(InventoryError::DuplicateName(entry.name.clone()));
            }
        }
        tracing::debug!(%color, items = entries.len(), "registering catalog");
        self.slots.insert(color, ColorSlot::new(entries));
        Ok(())
    }

    /// Builder-style [`insert_catalog`](Self::insert_catalog)
    pub fn with_catalog<I>(mut self, color: Color, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = InventoryEntry>,
    {
        self.insert_catalog(color, entries)?;
        Ok(self)
    }

    /// Hand out the next unclaimed object of `color`.
    ///
    /// A claimed ordinal is never handed out again. Colours without a catalog
    /// behave as an empty catalog.
    pub fn claim_next(&mut self, color: Color) -> Result<InventoryEntry> {
        let slot = self
            .slots
            .get_mut(&color)
            .ok_or(InventoryError::Exhausted(color))?;
        let entry = slot
            .catalog
            .get(&slot.next_ordinal)
            .cloned()
            .ok_or(InventoryError::Exhausted(color))?;
        tracing::info!(%color, ordinal = slot.next_ordinal, object = %entry.name, "claimed");
        slot.next_ordinal += 1;
        Ok(entry)
    }

    pub fn is_exhausted(&self, color: Color) -> bool {
        self.slots.get(&color).map_or(true, ColorSlot::is_exhausted)
    }

    /// True when every tracked colour has handed out its whole catalog
    pub fn is_fully_exhausted(&self) -> bool {
        self.slots.values().all(ColorSlot::is_exhausted)
    }

    pub fn catalog_len(&self, color: Color) -> usize {
        self.slots.get(&color).map_or(0, |s| s.catalog.len())
    }

    pub fn claimed(&self, color: Color) -> usize {
        self.slots.get(&color).map_or(0, |s| s.next_ordinal - 1)
    }

    pub fn remaining(&self, color: Color) -> usize {
        self.catalog_len(color) - self.claimed(color)
    }

    pub fn tracked_colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.slots.keys().copied()
    }

    /// Every catalogued object, claimed or not
    pub fn entries(&self) -> impl Iterator<Item = &InventoryEntry> + '_ {
        self.slots.values().flat_map(|s| s.catalog.values())
    }
}
