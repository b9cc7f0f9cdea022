//! NPC loadout: wear and belt containers

use crate::container::ItemContainer;
use crate::item::ItemInstance;
use serde::{Deserialize, Serialize};

/// Number of wear positions on an NPC
pub const WEAR_CAPACITY: usize = 7;

/// Number of belt (quick-access) positions on an NPC
pub const BELT_CAPACITY: usize = 6;

/// Number of main inventory positions on an NPC
pub const MAIN_CAPACITY: usize = 24;

/// Loadout container selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoadoutSlot {
    /// Worn clothing and armor
    Wear,
    /// Quick-access belt
    Belt,
    /// Main inventory
    Main,
}

/// The three containers carried by an NPC
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NpcLoadout {
    wear: ItemContainer,
    belt: ItemContainer,
    main: ItemContainer,
}

impl NpcLoadout {
    /// Create an empty loadout with standard capacities
    pub fn new() -> Self {
        Self {
            wear: ItemContainer::new(WEAR_CAPACITY),
            belt: ItemContainer::new(BELT_CAPACITY),
            main: ItemContainer::new(MAIN_CAPACITY),
        }
    }

    /// Get a container
    pub fn container(&self, slot: LoadoutSlot) -> &ItemContainer {
        match slot {
            LoadoutSlot::Wear => &self.wear,
            LoadoutSlot::Belt => &self.belt,
            LoadoutSlot::Main => &self.main,
        }
    }

    /// Get a mutable container
    pub fn container_mut(&mut self, slot: LoadoutSlot) -> &mut ItemContainer {
        match slot {
            LoadoutSlot::Wear => &mut self.wear,
            LoadoutSlot::Belt => &mut self.belt,
            LoadoutSlot::Main => &mut self.main,
        }
    }

    /// Worn items
    pub fn wear(&self) -> &ItemContainer {
        &self.wear
    }

    /// Belt items
    pub fn belt(&self) -> &ItemContainer {
        &self.belt
    }

    /// Give an item the way the host does: belt first, then main inventory
    ///
    /// Returns the item back if neither container has room.
    pub fn give(&mut self, item: ItemInstance) -> Result<LoadoutSlot, ItemInstance> {
        match self.belt.insert(item) {
            Ok(_) => Ok(LoadoutSlot::Belt),
            Err(item) => self.main.insert(item).map(|_| LoadoutSlot::Main),
        }
    }

    /// Get total number of items carried
    pub fn item_count(&self) -> usize {
        self.wear.len() + self.belt.len() + self.main.len()
    }
}

impl Default for NpcLoadout {
    fn default() -> Self {
        Self::new()
    }
}
