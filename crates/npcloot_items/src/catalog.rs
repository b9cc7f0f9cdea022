//! Item catalog: definition lookup, instantiation and picker search

use crate::item::{ItemDefinition, ItemInstance};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Instantiation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstantiateError {
    /// No definition registered for this item id
    UnknownItemId(i32),
    /// No definition registered for this short name
    UnknownShortName(String),
}

impl std::fmt::Display for InstantiateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownItemId(id) => write!(f, "Unknown item id: {}", id),
            Self::UnknownShortName(name) => write!(f, "Unknown item short name: {}", name),
        }
    }
}

impl std::error::Error for InstantiateError {}

/// Which item list a picker draws from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PickerTarget {
    /// Loot table entries pick from non-wearable items
    LootEntry,
    /// Skin slots pick from wearable items
    SkinSlot,
}

impl PickerTarget {
    /// Check if a definition belongs to this picker
    pub fn accepts(&self, definition: &ItemDefinition) -> bool {
        match self {
            Self::LootEntry => !definition.is_wearable(),
            Self::SkinSlot => definition.is_wearable(),
        }
    }
}

/// The host's item manager, as seen by the loot editor
pub trait ItemCatalog: Send + Sync {
    /// All registered definitions, in host order
    fn definitions(&self) -> &[ItemDefinition];

    /// Look up a definition by numeric id
    fn definition(&self, item_id: i32) -> Option<&ItemDefinition> {
        self.definitions().iter().find(|d| d.item_id == item_id)
    }

    /// Look up a definition by short name
    fn find_by_short_name(&self, short_name: &str) -> Option<&ItemDefinition> {
        self.definitions().iter().find(|d| d.short_name == short_name)
    }

    /// Create an item by id
    fn create(&self, item_id: i32, quantity: u32, skin_id: u64) -> Result<ItemInstance, InstantiateError> {
        self.definition(item_id)
            .map(|def| ItemInstance::new(def, quantity, skin_id))
            .ok_or(InstantiateError::UnknownItemId(item_id))
    }

    /// Create an item by short name
    fn create_by_name(&self, short_name: &str, quantity: u32, skin_id: u64) -> Result<ItemInstance, InstantiateError> {
        self.find_by_short_name(short_name)
            .map(|def| ItemInstance::new(def, quantity, skin_id))
            .ok_or_else(|| InstantiateError::UnknownShortName(short_name.to_string()))
    }
}

/// Filter the catalog for an item picker
///
/// Matches the lowercased query as a substring of the lowercased display
/// name; an empty query matches everything. At most `limit` results.
pub fn search<'a>(
    catalog: &'a dyn ItemCatalog,
    target: PickerTarget,
    query: &str,
    limit: usize,
) -> Vec<&'a ItemDefinition> {
    let needle = query.to_lowercase();
    catalog
        .definitions()
        .iter()
        .filter(|d| target.accepts(d))
        .filter(|d| d.display_name.to_lowercase().contains(&needle))
        .take(limit)
        .collect()
}

/// In-memory catalog with indexed lookups
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    definitions: Vec<ItemDefinition>,
    by_id: HashMap<i32, usize>,
    by_name: HashMap<String, usize>,
}

impl MemoryCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition (builder form)
    pub fn with(mut self, definition: ItemDefinition) -> Self {
        self.register(definition);
        self
    }

    /// Register a definition, replacing any previous one with the same id
    pub fn register(&mut self, definition: ItemDefinition) {
        if let Some(&index) = self.by_id.get(&definition.item_id) {
            self.by_name.remove(&self.definitions[index].short_name);
            self.by_name.insert(definition.short_name.clone(), index);
            self.definitions[index] = definition;
            return;
        }

        let index = self.definitions.len();
        self.by_id.insert(definition.item_id, index);
        self.by_name.insert(definition.short_name.clone(), index);
        self.definitions.push(definition);
    }

    /// Get number of registered definitions
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Check if catalog is empty
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ItemCatalog for MemoryCatalog {
    fn definitions(&self) -> &[ItemDefinition] {
        &self.definitions
    }

    fn definition(&self, item_id: i32) -> Option<&ItemDefinition> {
        self.by_id.get(&item_id).map(|&i| &self.definitions[i])
    }

    fn find_by_short_name(&self, short_name: &str) -> Option<&ItemDefinition> {
        self.by_name.get(short_name).map(|&i| &self.definitions[i])
    }
}

impl FromIterator<ItemDefinition> for MemoryCatalog {
    fn from_iter<I: IntoIterator<Item = ItemDefinition>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for definition in iter {
            catalog.register(definition);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemCategory;

    fn catalog() -> MemoryCatalog {
        MemoryCatalog::new()
            .with(ItemDefinition::new(1545779598, "rifle.ak", "Assault Rifle")
                .with_category(ItemCategory::Weapon)
                .with_max_condition(200.0))
            .with(ItemDefinition::new(1266491000, "hazmatsuit", "Hazmat Suit")
                .with_category(ItemCategory::Attire)
                .with_max_condition(100.0))
            .with(ItemDefinition::new(-2072273936, "bandage", "Bandage")
                .with_category(ItemCategory::Medical)
                .with_max_stack(3))
            .with(ItemDefinition::new(-1211166256, "ammo.rifle", "5.56 Rifle Ammo")
                .with_category(ItemCategory::Ammunition)
                .with_max_stack(128))
    }

    #[test]
    fn test_lookup_by_id_and_name() {
        let catalog = catalog();

        assert_eq!(catalog.definition(1545779598).unwrap().short_name, "rifle.ak");
        assert_eq!(catalog.find_by_short_name("bandage").unwrap().item_id, -2072273936);
        assert!(catalog.definition(1).is_none());
    }

    #[test]
    fn test_create_unknown_id_fails() {
        let catalog = catalog();

        assert_eq!(catalog.create(1, 1, 0), Err(InstantiateError::UnknownItemId(1)));
        assert!(matches!(
            catalog.create_by_name("nope", 1, 0),
            Err(InstantiateError::UnknownShortName(_))
        ));
    }

    #[test]
    fn test_create_copies_definition() {
        let item = catalog().create_by_name("rifle.ak", 1, 99).unwrap();

        assert_eq!(item.item_id, 1545779598);
        assert_eq!(item.skin_id, 99);
        assert_eq!(item.max_condition, 200.0);
    }

    #[test]
    fn test_register_replaces_same_id() {
        let mut catalog = catalog();
        catalog.register(ItemDefinition::new(-2072273936, "bandage.v2", "Bandage"));

        assert_eq!(catalog.len(), 4);
        assert!(catalog.find_by_short_name("bandage").is_none());
        assert!(catalog.find_by_short_name("bandage.v2").is_some());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = catalog();

        let hits = search(&catalog, PickerTarget::LootEntry, "RIFLE", 56);
        let names: Vec<&str> = hits.iter().map(|d| d.short_name.as_str()).collect();
        assert_eq!(names, vec!["rifle.ak", "ammo.rifle"]);
    }

    #[test]
    fn test_search_splits_wearables() {
        let catalog = catalog();

        let skins = search(&catalog, PickerTarget::SkinSlot, "", 56);
        assert_eq!(skins.len(), 1);
        assert_eq!(skins[0].short_name, "hazmatsuit");

        let loot = search(&catalog, PickerTarget::LootEntry, "", 56);
        assert_eq!(loot.len(), 3);
    }

    #[test]
    fn test_search_respects_limit() {
        let catalog = catalog();
        assert_eq!(search(&catalog, PickerTarget::LootEntry, "", 2).len(), 2);
    }

    #[test]
    fn test_catalog_from_json_definitions() {
        let json = r#"[
            {"item_id": 1545779598, "short_name": "rifle.ak", "display_name": "Assault Rifle",
             "category": "Weapon", "max_stack": 1, "max_condition": 200.0},
            {"item_id": 1266491000, "short_name": "hazmatsuit", "display_name": "Hazmat Suit",
             "category": "Attire", "max_stack": 1, "max_condition": 100.0}
        ]"#;

        let definitions: Vec<ItemDefinition> = serde_json::from_str(json).unwrap();
        let catalog: MemoryCatalog = definitions.into_iter().collect();

        assert_eq!(catalog.len(), 2);
        let rifle = catalog.create_by_name("rifle.ak", 1, 0).unwrap();
        assert_eq!(rifle.max_condition, 200.0);
        assert!(catalog.find_by_short_name("hazmatsuit").unwrap().is_wearable());
    }

    #[test]
    fn test_definition_without_category_is_rejected() {
        let json = r#"[{"item_id": 1, "short_name": "x", "display_name": "X"}]"#;

        assert!(serde_json::from_str::<Vec<ItemDefinition>>(json).is_err());
    }
}
