//! Spawn-time equipment
//!
//! Best effort: an item that cannot be created or placed is logged and
//! skipped, and the remaining slots are still applied.

use npcloot_config::Profile;
use npcloot_items::{ItemCatalog, LoadoutSlot, NpcLoadout};
use std::sync::Arc;

/// Outcome of one apply call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Weapon that ended up on the NPC
    pub weapon: Option<LoadoutSlot>,
    /// Skin slot items placed into the wear container
    pub worn: usize,
    /// Items that could not be created or placed
    pub skipped: usize,
}

/// Applies a profile's weapon and skin slots to an NPC
pub struct EquipmentApplier {
    catalog: Arc<dyn ItemCatalog>,
}

impl EquipmentApplier {
    pub fn new(catalog: Arc<dyn ItemCatalog>) -> Self {
        Self { catalog }
    }

    /// Replace the NPC's worn items, and its belt when a weapon is configured
    pub fn apply(&self, profile: &Profile, loadout: &mut NpcLoadout) -> ApplyReport {
        let mut report = ApplyReport::default();
        loadout.container_mut(LoadoutSlot::Wear).clear();

        if let Some(weapon) = profile.weapon() {
            loadout.container_mut(LoadoutSlot::Belt).clear();
            match self.catalog.create_by_name(weapon, 1, 0) {
                Ok(item) => match loadout.give(item) {
                    Ok(slot) => report.weapon = Some(slot),
                    Err(item) => {
                        log::warn!("No room for weapon {}", item.short_name);
                        report.skipped += 1;
                    }
                },
                Err(e) => {
                    log::warn!("Skipping weapon: {}", e);
                    report.skipped += 1;
                }
            }
        }

        for (index, slot) in profile.skins.iter().enumerate() {
            let Some(slot) = slot else { continue };

            let item = match self.catalog.create(slot.item_id, 1, slot.skin_id) {
                Ok(item) => item,
                Err(e) => {
                    log::warn!("Skipping skin slot {}: {}", index, e);
                    report.skipped += 1;
                    continue;
                }
            };

            match loadout.container_mut(LoadoutSlot::Wear).insert(item) {
                Ok(_) => report.worn += 1,
                Err(item) => {
                    log::warn!("No room for {} from skin slot {}", item.short_name, index);
                    report.skipped += 1;
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npcloot_config::SkinSlot;
    use npcloot_items::{ItemCategory, ItemDefinition, MemoryCatalog};

    const HAZMAT: i32 = 1266491000;
    const BOOTS: i32 = -1549739227;

    fn applier() -> EquipmentApplier {
        EquipmentApplier::new(Arc::new(
            MemoryCatalog::new()
                .with(ItemDefinition::new(1545779598, "rifle", "Rifle").with_category(ItemCategory::Weapon))
                .with(ItemDefinition::new(HAZMAT, "hazmatsuit", "Hazmat Suit").with_category(ItemCategory::Attire))
                .with(ItemDefinition::new(BOOTS, "shoes.boots", "Boots").with_category(ItemCategory::Attire))
                .with(ItemDefinition::new(-2072273936, "bandage", "Bandage")),
        ))
    }

    fn dressed_npc(applier: &EquipmentApplier) -> NpcLoadout {
        let mut npc = NpcLoadout::new();
        let bandage = applier.catalog.create_by_name("bandage", 1, 0).unwrap();
        npc.container_mut(LoadoutSlot::Wear).insert(bandage.clone()).unwrap();
        npc.container_mut(LoadoutSlot::Belt).insert(bandage.clone()).unwrap();
        npc.container_mut(LoadoutSlot::Belt).insert(bandage).unwrap();
        npc
    }

    #[test]
    fn test_weapon_and_slot_replace_prior_contents() {
        let applier = applier();
        let mut npc = dressed_npc(&applier);
        let profile = Profile::default()
            .with_weapon("rifle")
            .with_skin(3, SkinSlot::new(HAZMAT, 555));

        let report = applier.apply(&profile, &mut npc);

        assert_eq!(report.weapon, Some(LoadoutSlot::Belt));
        assert_eq!(report.worn, 1);
        assert_eq!(npc.belt().len(), 1);
        assert_eq!(npc.belt().get(0).unwrap().short_name, "rifle");
        assert_eq!(npc.wear().len(), 1);
        assert_eq!(npc.wear().get(0).unwrap().skin_id, 555);
    }

    #[test]
    fn test_no_weapon_keeps_belt() {
        let applier = applier();
        let mut npc = dressed_npc(&applier);

        let report = applier.apply(&Profile::default(), &mut npc);

        assert_eq!(report, ApplyReport::default());
        assert_eq!(npc.belt().len(), 2);
        assert!(npc.wear().is_empty());
    }

    #[test]
    fn test_slots_placed_in_index_order() {
        let applier = applier();
        let mut npc = NpcLoadout::new();
        let profile = Profile::default()
            .with_skin(5, SkinSlot::new(HAZMAT, 0))
            .with_skin(1, SkinSlot::new(BOOTS, 0));

        applier.apply(&profile, &mut npc);

        let order: Vec<i32> = npc.wear().items().map(|i| i.item_id).collect();
        assert_eq!(order, vec![BOOTS, HAZMAT]);
    }

    #[test]
    fn test_unknown_items_are_skipped() {
        let applier = applier();
        let mut npc = NpcLoadout::new();
        let profile = Profile::default()
            .with_weapon("laser.cannon")
            .with_skin(0, SkinSlot::new(7, 0))
            .with_skin(2, SkinSlot::new(HAZMAT, 0));

        let report = applier.apply(&profile, &mut npc);

        assert_eq!(report.weapon, None);
        assert_eq!(report.skipped, 2);
        assert_eq!(report.worn, 1);
        assert_eq!(npc.wear().get(0).unwrap().item_id, HAZMAT);
    }
}
