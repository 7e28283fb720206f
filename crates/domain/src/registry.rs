//! Device registry: name → kind lookup for one compilation run.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::device::DeviceKind;

/// Maps every successfully compiled device name to its kind.
///
/// Populated by the device phase and read by every later phase. A registry
/// belongs to exactly one compilation run and is cleared before the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DeviceRegistry {
    entries: BTreeMap<String, DeviceKind>,
}

impl DeviceRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a device. Returns `false`, leaving the existing entry in place,
    /// when the name is already registered.
    pub fn register(&mut self, name: impl Into<String>, kind: DeviceKind) -> bool {
        match self.entries.entry(name.into()) {
            std::collections::btree_map::Entry::Occupied(_) => false,
            std::collections::btree_map::Entry::Vacant(slot) => {
                slot.insert(kind);
                true
            }
        }
    }

    #[must_use]
    pub fn kind_of(&self, name: &str) -> Option<DeviceKind> {
        self.entries.get(name).copied()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by device name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, DeviceKind)> {
        self.entries.iter().map(|(name, kind)| (name.as_str(), *kind))
    }
}
