//! Integration tests for loot generation and equipment
//!
//! Runs the generator with real random sources over many seeds to check the
//! bounds that must hold for every roll:
//! - Placed count never exceeds the table maximum
//! - Quantities and conditions stay inside their configured ranges
//! - Low drop chances still terminate

use npcloot_config::{ItemEntry, LootTable, Profile, SkinSlot};
use npcloot_items::{ItemCatalog, ItemCategory, ItemContainer, ItemDefinition, MemoryCatalog, NpcLoadout};
use npcloot_loot::prelude::*;
use std::sync::Arc;

const RIFLE: i32 = 1545779598;
const SCRAP: i32 = -932201673;
const HAZMAT: i32 = 1266491000;

fn catalog() -> Arc<dyn ItemCatalog> {
    Arc::new(
        MemoryCatalog::new()
            .with(ItemDefinition::new(RIFLE, "rifle.ak", "Assault Rifle")
                .with_category(ItemCategory::Weapon)
                .with_max_condition(200.0))
            .with(ItemDefinition::new(SCRAP, "scrap", "Scrap")
                .with_category(ItemCategory::Resource)
                .with_max_stack(1000))
            .with(ItemDefinition::new(HAZMAT, "hazmatsuit", "Hazmat Suit")
                .with_category(ItemCategory::Attire)
                .with_max_condition(100.0))
            .with(ItemDefinition::new(-996920608, "blueprintbase", "Blueprint")),
    )
}

fn mixed_profile() -> Profile {
    let rifle = ItemEntry {
        item_id: RIFLE,
        min_condition: 20,
        max_condition: 60,
        drop_chance: 35,
        ..ItemEntry::default()
    };
    let scrap = ItemEntry {
        short_name: "scrap".into(),
        item_id: SCRAP,
        min_amount: 5,
        max_amount: 25,
        drop_chance: 70,
        ..ItemEntry::default()
    };

    Profile::default()
        .with_table(LootTable::with_bounds(2, 4).with_item(rifle).with_item(scrap))
        .with_table(LootTable::with_bounds(1, 1).with_item(ItemEntry {
            is_blueprint: true,
            drop_chance: 10,
            ..ItemEntry::default()
        }))
}

#[test]
fn test_bounds_hold_across_seeds() {
    let catalog = catalog();
    let profile = mixed_profile();

    for seed in 0..200 {
        let generator = LootGenerator::new(catalog.clone(), Arc::new(SeededRandom::new(seed)));
        let corpse = ItemContainer::new(36).shared();

        let report = generator.populate(&profile, &[corpse.clone()]).unwrap();
        let table = &profile.loot_tables[report.table.unwrap()];

        assert!(report.placed <= table.max_item_amount as usize, "seed {}", seed);
        assert!(report.passes <= DEFAULT_MAX_PASSES);

        for item in corpse.lock().items() {
            match item.item_id {
                RIFLE => {
                    assert_eq!(item.quantity, 1);
                    let fraction = item.condition_fraction();
                    assert!((0.2 - 1e-6..=0.6 + 1e-6).contains(&fraction), "seed {}", seed);
                }
                SCRAP => assert!((5..=25).contains(&item.quantity), "seed {}", seed),
                _ => assert_eq!(item.blueprint_target, Some(RIFLE)),
            }
        }
    }
}

#[test]
fn test_low_drop_chance_terminates() {
    let profile = Profile::default().with_table(LootTable::with_bounds(5, 5).with_item(ItemEntry {
        drop_chance: 1,
        ..ItemEntry::default()
    }));

    for seed in 0..20 {
        let generator = LootGenerator::new(catalog(), Arc::new(SeededRandom::new(seed)))
            .with_settings(GeneratorSettings {
                max_passes: 64,
                ..GeneratorSettings::default()
            });
        let corpse = ItemContainer::new(36).shared();

        let report = generator.populate(&profile, &[corpse.clone()]).unwrap();

        assert!(report.placed <= 5);
        assert!(report.passes <= 64);
        assert_eq!(corpse.lock().len(), report.placed);
    }
}

#[test]
fn test_generation_then_equipment() {
    let catalog = catalog();
    let profile = mixed_profile()
        .with_weapon("rifle.ak")
        .with_skin(0, SkinSlot::new(HAZMAT, 10));

    let generator = LootGenerator::new(catalog.clone(), Arc::new(ThreadRandom));
    let corpse = ItemContainer::new(36).shared();
    generator.populate(&profile, &[corpse]).unwrap();

    let mut npc = NpcLoadout::new();
    let report = EquipmentApplier::new(catalog).apply(&profile, &mut npc);

    assert_eq!(report.worn, 1);
    assert_eq!(npc.belt().find("rifle.ak"), Some(0));
    assert_eq!(npc.wear().get(0).unwrap().skin_id, 10);
}
