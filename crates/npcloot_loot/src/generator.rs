//! Corpse loot generation
//!
//! One populate pass:
//!
//! 1. Clear every target container
//! 2. Pick one loot table uniformly
//! 3. Walk the table's entries in order, repeatedly, rolling each entry's drop
//!    chance, until the table minimum is met
//!
//! Placement stops at the table maximum even mid-pass, and the number of
//! passes is capped so a table whose rolls keep failing still terminates.

use crate::rng::RandomSource;
use npcloot_config::{ItemEntry, LootTable, Profile};
use npcloot_items::{InstantiateError, ItemCatalog, ItemInstance, SharedContainer};
use std::sync::Arc;
use thiserror::Error;

/// Default cap on passes over a table's entries
pub const DEFAULT_MAX_PASSES: u32 = 256;

/// Short name of the generic item that carries a blueprint
pub const DEFAULT_BLUEPRINT_CARRIER: &str = "blueprintbase";

/// Loot generation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LootError {
    /// An entry could not be instantiated; generation stopped there
    #[error("Failed to create item {item_id} after placing {placed} item(s): {source}")]
    Instantiation {
        item_id: i32,
        placed: usize,
        #[source]
        source: InstantiateError,
    },
}

/// Why generation stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// No target containers were given
    NoContainers,
    /// The profile has no loot tables
    NoTables,
    /// The chosen table has no entries
    EmptyTable,
    /// At least `minItemAmount` items were placed
    ReachedMinimum,
    /// `maxItemAmount` items were placed
    ReachedCeiling,
    /// The pass cap was hit before the minimum was met
    PassLimit,
}

/// Outcome of one populate call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    /// Index of the chosen loot table
    pub table: Option<usize>,
    /// Items counted as placed
    pub placed: usize,
    /// Items the container refused (still counted in `placed`)
    pub overflowed: usize,
    /// Passes over the table's entries
    pub passes: u32,
    pub reason: StopReason,
}

impl GenerationReport {
    fn stopped(reason: StopReason) -> Self {
        Self {
            table: None,
            placed: 0,
            overflowed: 0,
            passes: 0,
            reason,
        }
    }
}

/// Generator settings
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Cap on passes over a table's entries
    pub max_passes: u32,
    /// Short name of the blueprint carrier item
    pub blueprint_carrier: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            blueprint_carrier: DEFAULT_BLUEPRINT_CARRIER.to_string(),
        }
    }
}

/// Fills containers from a profile's loot tables
pub struct LootGenerator {
    catalog: Arc<dyn ItemCatalog>,
    rng: Arc<dyn RandomSource>,
    settings: GeneratorSettings,
}

impl LootGenerator {
    pub fn new(catalog: Arc<dyn ItemCatalog>, rng: Arc<dyn RandomSource>) -> Self {
        Self {
            catalog,
            rng,
            settings: GeneratorSettings::default(),
        }
    }

    /// Set generator settings
    pub fn with_settings(mut self, settings: GeneratorSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Replace the contents of `containers` with generated loot
    ///
    /// Items go into the first container. On an instantiation failure the
    /// items placed so far stay where they are.
    pub fn populate(&self, profile: &Profile, containers: &[SharedContainer]) -> Result<GenerationReport, LootError> {
        for container in containers {
            container.lock().clear();
        }

        let Some(target) = containers.first() else {
            return Ok(GenerationReport::stopped(StopReason::NoContainers));
        };
        if profile.loot_tables.is_empty() {
            return Ok(GenerationReport::stopped(StopReason::NoTables));
        }

        let index = self.rng.gen_index(profile.loot_tables.len());
        let table = &profile.loot_tables[index];
        let mut report = GenerationReport {
            table: Some(index),
            ..GenerationReport::stopped(StopReason::EmptyTable)
        };
        if table.items.is_empty() {
            return Ok(report);
        }

        let (min, max) = table_bounds(table);
        while report.placed < min && report.placed < max && report.passes < self.settings.max_passes {
            report.passes += 1;

            for entry in &table.items {
                if report.placed >= max {
                    break;
                }
                if self.rng.gen_range(0, 100) >= entry.drop_chance {
                    continue;
                }

                let item = self.instantiate(entry).map_err(|source| {
                    log::warn!(
                        "Loot generation aborted at item {} after {} placed: {}",
                        entry.item_id,
                        report.placed,
                        source
                    );
                    LootError::Instantiation {
                        item_id: entry.item_id,
                        placed: report.placed,
                        source,
                    }
                })?;

                if let Err(item) = target.lock().insert(item) {
                    log::warn!("Container full, dropped generated {}", item.short_name);
                    report.overflowed += 1;
                }
                report.placed += 1;
            }
        }

        report.reason = if report.placed >= min {
            StopReason::ReachedMinimum
        } else if report.placed >= max {
            StopReason::ReachedCeiling
        } else {
            log::debug!(
                "Loot table {} met {} of {} after {} passes",
                index,
                report.placed,
                min,
                report.passes
            );
            StopReason::PassLimit
        };

        Ok(report)
    }

    /// Create one item for an entry with rolled quantity and condition
    fn instantiate(&self, entry: &ItemEntry) -> Result<ItemInstance, InstantiateError> {
        let min_amount = entry.min_amount.max(1);
        let quantity = self.rng.gen_range(min_amount, entry.max_amount.max(min_amount));
        let quantity = u32::try_from(quantity).unwrap_or(1);

        if entry.is_blueprint {
            let carrier = self
                .catalog
                .create_by_name(&self.settings.blueprint_carrier, quantity, 0)?;
            return Ok(carrier.with_blueprint_target(entry.item_id));
        }

        let mut item = self.catalog.create(entry.item_id, quantity, entry.skin_id)?;
        let roll = self.rng.gen_range(entry.min_condition, entry.max_condition);
        item.set_condition(item.max_condition * (roll as f32 / 100.0));
        Ok(item)
    }
}

/// Table bounds as counts, with negative values read as zero
fn table_bounds(table: &LootTable) -> (usize, usize) {
    let min = usize::try_from(table.min_item_amount).unwrap_or(0);
    let max = usize::try_from(table.max_item_amount).unwrap_or(0);
    (min, max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::{FixedRandom, SequenceRandom};
    use npcloot_items::{ItemCategory, ItemContainer, ItemDefinition, MemoryCatalog};

    const RIFLE: i32 = 1545779598;
    const BANDAGE: i32 = -2072273936;

    fn catalog() -> Arc<dyn ItemCatalog> {
        Arc::new(
            MemoryCatalog::new()
                .with(ItemDefinition::new(RIFLE, "rifle.ak", "Assault Rifle")
                    .with_category(ItemCategory::Weapon)
                    .with_max_condition(200.0))
                .with(ItemDefinition::new(BANDAGE, "bandage", "Bandage")
                    .with_category(ItemCategory::Medical)
                    .with_max_stack(3))
                .with(ItemDefinition::new(-996920608, "blueprintbase", "Blueprint")),
        )
    }

    fn entry(item_id: i32, drop_chance: i32) -> ItemEntry {
        ItemEntry {
            item_id,
            drop_chance,
            ..ItemEntry::default()
        }
    }

    fn profile(min: i32, max: i32, items: Vec<ItemEntry>) -> Profile {
        let mut table = LootTable::with_bounds(min, max);
        table.items = items;
        Profile::default().with_table(table)
    }

    fn corpse() -> SharedContainer {
        ItemContainer::new(36).shared()
    }

    #[test]
    fn test_places_exactly_the_bound() {
        let generator = LootGenerator::new(catalog(), Arc::new(FixedRandom(0)));
        let container = corpse();

        let report = generator
            .populate(&profile(5, 5, vec![entry(RIFLE, 100)]), &[container.clone()])
            .unwrap();

        assert_eq!(report.placed, 5);
        assert_eq!(report.passes, 5);
        assert_eq!(report.reason, StopReason::ReachedMinimum);
        let container = container.lock();
        assert_eq!(container.len(), 5);
        assert!(container.items().all(|i| i.item_id == RIFLE && i.quantity == 1));
    }

    #[test]
    fn test_failing_rolls_terminate() {
        let generator = LootGenerator::new(catalog(), Arc::new(FixedRandom(100)));
        let container = corpse();

        let report = generator
            .populate(&profile(5, 5, vec![entry(RIFLE, 1)]), &[container.clone()])
            .unwrap();

        assert_eq!(report.placed, 0);
        assert_eq!(report.passes, DEFAULT_MAX_PASSES);
        assert_eq!(report.reason, StopReason::PassLimit);
        assert!(container.lock().is_empty());
    }

    #[test]
    fn test_ceiling_stops_mid_pass() {
        let generator = LootGenerator::new(catalog(), Arc::new(FixedRandom(0)));
        let container = corpse();
        let items = vec![entry(RIFLE, 100), entry(BANDAGE, 100), entry(RIFLE, 100)];

        let report = generator.populate(&profile(1, 2, items), &[container.clone()]).unwrap();

        assert_eq!(report.placed, 2);
        assert_eq!(report.passes, 1);
        let shorts: Vec<String> = container.lock().items().map(|i| i.short_name.clone()).collect();
        assert_eq!(shorts, vec!["rifle.ak", "bandage"]);
    }

    #[test]
    fn test_pass_does_not_stop_at_minimum() {
        let generator = LootGenerator::new(catalog(), Arc::new(FixedRandom(0)));
        let items = vec![entry(RIFLE, 100), entry(BANDAGE, 100), entry(RIFLE, 100)];

        let report = generator.populate(&profile(1, 10, items), &[corpse()]).unwrap();

        assert_eq!(report.placed, 3);
        assert_eq!(report.reason, StopReason::ReachedMinimum);
    }

    #[test]
    fn test_condition_is_fraction_of_maximum() {
        let generator = LootGenerator::new(catalog(), Arc::new(FixedRandom(0)));
        let container = corpse();
        let mut rifle = entry(RIFLE, 100);
        rifle.min_condition = 50;
        rifle.max_condition = 50;

        generator.populate(&profile(3, 3, vec![rifle]), &[container.clone()]).unwrap();

        assert!(container.lock().items().all(|i| i.condition == 100.0));
    }

    #[test]
    fn test_half_condition_is_exact_for_any_maximum() {
        let maxima = [0.0133_f32, 0.013327529, 1.7, 33.3, 333.33, 999.99];
        let catalog = maxima
            .iter()
            .enumerate()
            .map(|(i, &max)| ItemDefinition::new(i as i32 + 1, format!("item{}", i), "Item").with_max_condition(max))
            .collect::<MemoryCatalog>();
        let generator = LootGenerator::new(Arc::new(catalog), Arc::new(FixedRandom(0)));

        for (i, &max) in maxima.iter().enumerate() {
            let container = corpse();
            let mut half = entry(i as i32 + 1, 100);
            half.min_condition = 50;
            half.max_condition = 50;

            generator.populate(&profile(1, 1, vec![half]), &[container.clone()]).unwrap();

            let condition = container.lock().get(0).unwrap().condition;
            assert_eq!(condition, max * 0.5, "max condition {}", max);
        }
    }

    #[test]
    fn test_drop_roll_is_strictly_less_than_chance() {
        // one drop roll per entry: 40 < 40 fails, 39 < 40 passes
        let rng = SequenceRandom::new([40, 39, 1, 100]);
        let generator = LootGenerator::new(catalog(), Arc::new(rng));
        let container = corpse();

        let report = generator
            .populate(&profile(1, 1, vec![entry(RIFLE, 40), entry(BANDAGE, 40)]), &[container.clone()])
            .unwrap();

        assert_eq!(report.placed, 1);
        assert_eq!(container.lock().get(0).unwrap().short_name, "bandage");
    }

    #[test]
    fn test_quantity_range() {
        // drop roll, quantity roll, condition roll
        let rng = SequenceRandom::new([0, 99, 100]);
        let generator = LootGenerator::new(catalog(), Arc::new(rng));
        let container = corpse();
        let mut bandage = entry(BANDAGE, 100);
        bandage.min_amount = 2;
        bandage.max_amount = 3;

        generator.populate(&profile(1, 1, vec![bandage]), &[container.clone()]).unwrap();

        assert_eq!(container.lock().get(0).unwrap().quantity, 3);
    }

    #[test]
    fn test_blueprint_uses_carrier() {
        let generator = LootGenerator::new(catalog(), Arc::new(FixedRandom(0)));
        let container = corpse();
        let mut rifle = entry(RIFLE, 100);
        rifle.is_blueprint = true;

        generator.populate(&profile(1, 1, vec![rifle]), &[container.clone()]).unwrap();

        let container = container.lock();
        let item = container.get(0).unwrap();
        assert_eq!(item.short_name, "blueprintbase");
        assert_eq!(item.blueprint_target, Some(RIFLE));
    }

    #[test]
    fn test_unknown_item_fails_fast() {
        let generator = LootGenerator::new(catalog(), Arc::new(FixedRandom(0)));
        let container = corpse();
        let items = vec![entry(RIFLE, 100), entry(42, 100), entry(BANDAGE, 100)];

        let err = generator.populate(&profile(3, 3, items), &[container.clone()]).unwrap_err();

        assert_eq!(
            err,
            LootError::Instantiation {
                item_id: 42,
                placed: 1,
                source: InstantiateError::UnknownItemId(42),
            }
        );
        assert_eq!(container.lock().len(), 1);
    }

    #[test]
    fn test_previous_contents_are_discarded() {
        let generator = LootGenerator::new(catalog(), Arc::new(FixedRandom(0)));
        let first = corpse();
        let second = corpse();
        let stale = catalog().create(BANDAGE, 1, 0).unwrap();
        first.lock().insert(stale.clone()).unwrap();
        second.lock().insert(stale).unwrap();

        let report = generator.populate(&Profile::default(), &[first.clone(), second.clone()]).unwrap();

        assert_eq!(report.reason, StopReason::NoTables);
        assert!(first.lock().is_empty());
        assert!(second.lock().is_empty());
    }

    #[test]
    fn test_terminal_states() {
        let generator = LootGenerator::new(catalog(), Arc::new(FixedRandom(0)));

        let none = generator.populate(&profile(1, 1, vec![entry(RIFLE, 100)]), &[]).unwrap();
        assert_eq!(none.reason, StopReason::NoContainers);

        let empty = generator.populate(&profile(1, 1, vec![]), &[corpse()]).unwrap();
        assert_eq!(empty.reason, StopReason::EmptyTable);
        assert_eq!(empty.table, Some(0));

        let zero = generator.populate(&profile(0, 0, vec![entry(RIFLE, 100)]), &[corpse()]).unwrap();
        assert_eq!(zero.placed, 0);
        assert_eq!(zero.reason, StopReason::ReachedMinimum);
    }

    #[test]
    fn test_full_container_still_counts() {
        let generator = LootGenerator::new(catalog(), Arc::new(FixedRandom(0)));
        let tiny = ItemContainer::new(1).shared();

        let report = generator.populate(&profile(3, 3, vec![entry(RIFLE, 100)]), &[tiny.clone()]).unwrap();

        assert_eq!(report.placed, 3);
        assert_eq!(report.overflowed, 2);
        assert_eq!(tiny.lock().len(), 1);
    }
}
