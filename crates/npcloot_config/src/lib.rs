//! # NPC Loot Config
//!
//! The loot configuration tree and its store:
//!
//! - Profiles keyed by entity template id, in insertion order
//! - Loot tables with item count bounds
//! - Item entries with amount, condition and drop chance ranges
//! - Seven fixed equipment skin slots per profile
//! - Clamping writers that keep every range valid
//! - Load/save through a [`ConfigPersistence`] seam
//!
//! ## Example
//!
//! ```ignore
//! use npcloot_config::prelude::*;
//!
//! let mut store = ConfigStore::new();
//! store.upsert("scientist", Profile::default())?;
//! let table = store.add_loot_table("scientist")?;
//! let item = store.add_item("scientist", table)?;
//! store.set_item_field("scientist", table, item, ItemField::DropChance, 250)?; // stored as 100
//! ```

pub mod error;
pub mod model;
pub mod persist;
pub mod store;

pub mod prelude {
    pub use crate::error::{Address, StoreError, StoreResult};
    pub use crate::model::{
        Configuration, ItemEntry, ItemField, LootTable, Profile, SkinSlot, SkinSlots, TableBound,
        SKIN_SLOT_COUNT,
    };
    pub use crate::persist::{
        load_or_default, ConfigPersistence, JsonFilePersistence, MemoryPersistence, PersistError,
    };
    pub use crate::store::ConfigStore;
}

pub use prelude::*;
