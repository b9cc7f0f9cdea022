//! Read-only view models for the renderer
//!
//! Each button carries the console line it sends back, produced by the
//! same encoder the handlers decode.

use crate::request::EditRequest;
use npcloot_config::ConfigStore;
use npcloot_items::{search, ItemCatalog, PickerTarget};
use serde::Serialize;

/// One row on the profile list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileEntry {
    pub key: String,
    pub weapon: Option<String>,
    pub loot_tables: usize,
    /// Opens the profile
    pub open: String,
    /// Deletes the profile and returns to this page
    pub remove: String,
}

/// One page of the profile list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfilePage {
    pub page: usize,
    pub page_count: usize,
    pub entries: Vec<ProfileEntry>,
    pub has_previous: bool,
    pub has_next: bool,
    /// The "+" placeholder button only shows on the last page
    pub show_create: bool,
}

impl ProfilePage {
    /// Build a page; pages past the end show the last page
    pub fn build(store: &ConfigStore, page: usize, page_size: usize) -> Self {
        let page_size = page_size.max(1);
        let page_count = store.page_count(page_size);
        let page = page.min(page_count - 1);

        let entries = store
            .list(page * page_size, page_size)
            .into_iter()
            .map(|(key, profile)| ProfileEntry {
                key: key.to_string(),
                weapon: profile.weapon().map(str::to_string),
                loot_tables: profile.loot_tables.len(),
                open: EditRequest::OpenProfile { key: key.to_string() }
                    .to_command_line()
                    .console_line(),
                remove: EditRequest::RemoveProfile { page, key: key.to_string() }
                    .to_command_line()
                    .console_line(),
            })
            .collect();

        Self {
            page,
            page_count,
            entries,
            has_previous: page > 0,
            has_next: page + 1 < page_count,
            show_create: page + 1 == page_count,
        }
    }
}

/// One selectable catalog item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PickerEntry {
    pub item_id: i32,
    pub short_name: String,
    pub display_name: String,
    /// Applies the selection
    pub select: String,
}

/// Filtered catalog for an entry or a skin slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemPicker {
    pub target: PickerTarget,
    pub query: String,
    pub entries: Vec<PickerEntry>,
}

impl ItemPicker {
    /// Search the catalog for an address
    ///
    /// For [`PickerTarget::SkinSlot`] `item` is the slot index and `table`
    /// is ignored.
    pub fn build(
        catalog: &dyn ItemCatalog,
        key: &str,
        table: usize,
        item: usize,
        target: PickerTarget,
        query: &str,
        limit: usize,
    ) -> Self {
        let entries = search(catalog, target, query, limit)
            .into_iter()
            .map(|def| {
                let request = match target {
                    PickerTarget::LootEntry => EditRequest::PickItem {
                        key: key.to_string(),
                        table,
                        item,
                        short_name: def.short_name.clone(),
                        item_id: def.item_id,
                    },
                    PickerTarget::SkinSlot => EditRequest::PickSkin {
                        key: key.to_string(),
                        slot: item,
                        item_id: def.item_id,
                    },
                };
                PickerEntry {
                    item_id: def.item_id,
                    short_name: def.short_name.clone(),
                    display_name: def.display_name.clone(),
                    select: request.to_command_line().console_line(),
                }
            })
            .collect();

        Self {
            target,
            query: query.to_string(),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npcloot_config::Profile;
    use npcloot_items::{ItemCategory, ItemDefinition, MemoryCatalog};

    fn store(profiles: usize) -> ConfigStore {
        let mut store = ConfigStore::new();
        for i in 0..profiles {
            store.upsert(&format!("npc {}", i), Profile::default()).unwrap();
        }
        store
    }

    #[test]
    fn test_empty_store_has_one_page_with_create() {
        let page = ProfilePage::build(&store(0), 0, 12);

        assert_eq!(page.page_count, 1);
        assert!(page.entries.is_empty());
        assert!(page.show_create);
        assert!(!page.has_next);
    }

    #[test]
    fn test_create_button_only_on_last_page() {
        let store = store(13);

        let first = ProfilePage::build(&store, 0, 12);
        assert_eq!(first.entries.len(), 12);
        assert!(first.has_next);
        assert!(!first.show_create);

        let last = ProfilePage::build(&store, 1, 12);
        assert_eq!(last.entries.len(), 1);
        assert!(last.has_previous);
        assert!(last.show_create);
    }

    #[test]
    fn test_page_past_end_clamps() {
        let page = ProfilePage::build(&store(3), 9, 12);
        assert_eq!(page.page, 0);
        assert_eq!(page.entries.len(), 3);
    }

    #[test]
    fn test_entry_buttons() {
        let page = ProfilePage::build(&store(1), 0, 12);

        assert_eq!(page.entries[0].open, "UI_NL OPENPREFAB npc 0");
        assert_eq!(page.entries[0].remove, "UI_NL REMOVEPREFAB 0 npc 0");
    }

    #[test]
    fn test_picker_buttons() {
        let catalog = MemoryCatalog::new()
            .with(ItemDefinition::new(1266491000, "hazmatsuit", "Hazmat Suit").with_category(ItemCategory::Attire))
            .with(ItemDefinition::new(-2072273936, "bandage", "Bandage").with_category(ItemCategory::Medical));

        let skins = ItemPicker::build(&catalog, "npc", 0, 3, PickerTarget::SkinSlot, "SUIT", 56);
        assert_eq!(skins.entries.len(), 1);
        assert_eq!(skins.entries[0].select, "UI_NL ADDSKIN 1266491000 3 npc");

        let loot = ItemPicker::build(&catalog, "npc", 1, 2, PickerTarget::LootEntry, "", 56);
        assert_eq!(loot.entries.len(), 1);
        assert_eq!(loot.entries[0].select, "UI_NL ADDITEM bandage -2072273936 2 1 npc");
    }
}
