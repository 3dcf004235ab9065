//! Normalized GPU inventory
//!
//! An inventory maps GPU models to card counts. Entries keep the order in
//! which models were first seen so downstream breakdowns render
//! deterministically, and duplicate mentions of a model are summed rather
//! than overwritten.

use crate::types::GpuModel;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A `(gpu_model, count)` pair with `count >= 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuInventoryEntry {
    pub model: GpuModel,
    pub count: u32,
}

/// Ordered collection of distinct GPU models and their counts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<GpuInventoryEntry>", into = "Vec<GpuInventoryEntry>")]
pub struct GpuInventory {
    entries: Vec<GpuInventoryEntry>,
    index: HashMap<String, usize>,
}

impl TryFrom<Vec<GpuInventoryEntry>> for GpuInventory {
    type Error = Error;

    fn try_from(entries: Vec<GpuInventoryEntry>) -> Result<Self> {
        let mut inventory = Self::new();
        for entry in entries {
            inventory.add(entry.model, entry.count)?;
        }
        Ok(inventory)
    }
}

impl From<GpuInventory> for Vec<GpuInventoryEntry> {
    fn from(inventory: GpuInventory) -> Self {
        inventory.entries
    }
}

impl GpuInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an inventory from `(model, count)` pairs, summing duplicates
    pub fn from_pairs<I, M>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (M, u32)>,
        M: Into<GpuModel>,
    {
        let mut inventory = Self::new();
        for (model, count) in pairs {
            inventory.add(model.into(), count)?;
        }
        Ok(inventory)
    }

    /// Add cards of a model. A repeated model is summed into its existing
    /// entry; a zero count is rejected for this entry only.
    pub fn add(&mut self, model: GpuModel, count: u32) -> Result<()> {
        if count == 0 {
            return Err(Error::validation(format!(
                "count for GPU model '{}' must be >= 1",
                model
            )));
        }
        match self.index.get(&model.normalized()) {
            Some(&i) => {
                self.entries[i].count =
                    self.entries[i].count.checked_add(count).ok_or_else(|| {
                        Error::validation(format!(
                            "count for GPU model '{}' exceeds the supported range",
                            model
                        ))
                    })?;
            }
            None => {
                self.index.insert(model.normalized(), self.entries.len());
                self.entries.push(GpuInventoryEntry { model, count });
            }
        }
        Ok(())
    }

    /// Card count for a model, if present
    pub fn count_of(&self, model: &GpuModel) -> Option<u32> {
        self.index
            .get(&model.normalized())
            .map(|&i| self.entries[i].count)
    }

    /// Entries in first-seen order
    pub fn entries(&self) -> &[GpuInventoryEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &GpuInventoryEntry> {
        self.entries.iter()
    }

    /// Total number of physical cards across all models
    pub fn total_gpus(&self) -> u32 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a GpuInventory {
    type Item = &'a GpuInventoryEntry;
    type IntoIter = std::slice::Iter<'a, GpuInventoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_preserves_order() {
        let inventory =
            GpuInventory::from_pairs([("A40", 4), ("L40S", 2), ("L4", 1)]).unwrap();

        let models: Vec<&str> =
            inventory.iter().map(|e| e.model.as_str()).collect();
        assert_eq!(models, vec!["A40", "L40S", "L4"]);
        assert_eq!(inventory.total_gpus(), 7);
    }

    #[test]
    fn test_inventory_sums_duplicates() {
        let inventory =
            GpuInventory::from_pairs([("A40", 4), ("l40s", 2), ("a40", 2)]).unwrap();

        assert_eq!(inventory.len(), 2);
        assert_eq!(inventory.count_of(&GpuModel::new("A40")), Some(6));
        // First-seen casing wins for display
        assert_eq!(inventory.entries()[0].model.as_str(), "A40");
    }

    #[test]
    fn test_inventory_rejects_zero_count() {
        let mut inventory = GpuInventory::new();
        let err = inventory.add(GpuModel::new("A40"), 0).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        // The failing entry must not poison the rest
        inventory.add(GpuModel::new("A40"), 2).unwrap();
        assert_eq!(inventory.total_gpus(), 2);
    }

    #[test]
    fn test_inventory_rejects_count_overflow() {
        let mut inventory = GpuInventory::new();
        inventory.add(GpuModel::new("A40"), u32::MAX).unwrap();

        let err = inventory.add(GpuModel::new("A40"), 1).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        // The existing entry is left untouched
        assert_eq!(inventory.count_of(&GpuModel::new("A40")), Some(u32::MAX));
    }

    #[test]
    fn test_inventory_serde_round_trip() {
        let inventory = GpuInventory::from_pairs([("A40", 4), ("L40S", 2)]).unwrap();
        let json = serde_json::to_string(&inventory).unwrap();
        let restored: GpuInventory = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.count_of(&GpuModel::new("a40")), Some(4));
        assert_eq!(restored.entries()[1].model.as_str(), "L40S");
    }

    #[test]
    fn test_inventory_lookup_is_normalized() {
        let inventory = GpuInventory::from_pairs([("A100-80GB", 1)]).unwrap();
        assert_eq!(inventory.count_of(&GpuModel::new(" a100-80gb ")), Some(1));
        assert_eq!(inventory.count_of(&GpuModel::new("A100")), None);
    }
}
