//! Navigation directives for the external renderer

use npcloot_items::PickerTarget;
use serde::{Deserialize, Serialize};

/// Which read-only view to redraw after a successful command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Navigation {
    /// Paged profile list
    ProfileList { page: usize },
    /// One profile: weapon, skin slots, loot tables
    Profile { key: String },
    /// One loot table's bounds and entries
    Table { key: String, table: usize },
    /// One item entry's fields
    ItemDetail { key: String, table: usize, item: usize },
    /// One equipment skin slot
    SkinEditor { key: String, slot: usize },
    /// Item picker for a loot entry or a skin slot
    ///
    /// For skin slots `item` holds the slot index.
    ItemPicker {
        key: String,
        table: usize,
        item: usize,
        target: PickerTarget,
        query: String,
    },
}

impl Navigation {
    /// Profile the view belongs to, if any
    pub fn profile_key(&self) -> Option<&str> {
        match self {
            Self::ProfileList { .. } => None,
            Self::Profile { key }
            | Self::Table { key, .. }
            | Self::ItemDetail { key, .. }
            | Self::SkinEditor { key, .. }
            | Self::ItemPicker { key, .. } => Some(key),
        }
    }
}
