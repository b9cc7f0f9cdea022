//! # NPC Loot Generation
//!
//! Runtime side of the loot editor:
//!
//! - [`LootGenerator`] fills corpse containers from a profile's loot tables
//! - [`EquipmentApplier`] dresses a spawned NPC from a profile's weapon and skin slots
//! - [`RandomSource`] abstracts the dice so generation can be replayed in tests
//!
//! Both consumers take a `&Profile`; callers clone the profile out of the
//! store first so an edit cannot land halfway through a pass.
//!
//! ## Example
//!
//! ```ignore
//! use npcloot_loot::prelude::*;
//!
//! let generator = LootGenerator::new(catalog.clone(), Arc::new(ThreadRandom));
//! let corpse = ItemContainer::new(36).shared();
//! let report = generator.populate(&profile, &[corpse.clone()])?;
//! log::debug!("placed {} item(s) from table {:?}", report.placed, report.table);
//! ```

pub mod equip;
pub mod generator;
pub mod rng;

pub mod prelude {
    pub use crate::equip::{ApplyReport, EquipmentApplier};
    pub use crate::generator::{
        GenerationReport, GeneratorSettings, LootError, LootGenerator, StopReason,
        DEFAULT_BLUEPRINT_CARRIER, DEFAULT_MAX_PASSES,
    };
    pub use crate::rng::{FixedRandom, RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
}

pub use prelude::*;
