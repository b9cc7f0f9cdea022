//! NPC Loot Items - Item and Container Model
//!
//! This crate models the host's item layer that the loot editor writes into.
//!
//! # Features
//!
//! - Item definitions keyed by numeric id and short name
//! - Item instances with skin, condition and blueprint target
//! - Fixed-capacity containers (corpse loot, NPC wear, NPC belt)
//! - NPC loadouts
//! - Item catalog with picker search
//!
//! # Example
//!
//! ```ignore
//! use npcloot_items::prelude::*;
//!
//! let catalog = MemoryCatalog::new()
//!     .with(ItemDefinition::new(1545779598, "rifle.ak", "Assault Rifle")
//!         .with_category(ItemCategory::Weapon)
//!         .with_max_condition(200.0));
//!
//! let mut corpse = ItemContainer::new(36);
//! let rifle = catalog.create(1545779598, 1, 0)?;
//! corpse.insert(rifle);
//! ```

pub mod catalog;
pub mod container;
pub mod item;
pub mod loadout;

pub mod prelude {
    pub use crate::catalog::{search, InstantiateError, ItemCatalog, MemoryCatalog, PickerTarget};
    pub use crate::container::{ItemContainer, SharedContainer};
    pub use crate::item::{ItemCategory, ItemDefinition, ItemInstance};
    pub use crate::loadout::{LoadoutSlot, NpcLoadout};
}

pub use prelude::*;
