//! Structured edit requests
//!
//! Every console verb decodes into an [`EditRequest`]; callers that do not go
//! through the console can build requests directly and avoid token parsing.

use crate::navigation::Navigation;
use crate::path::{CommandLine, RENAME_SENTINEL, VALUE_SENTINEL};
use crate::router::RouterSettings;
use npcloot_config::{ConfigStore, ItemField, Profile, StoreResult, TableBound};
use npcloot_items::PickerTarget;

/// Console verbs
pub mod verb {
    pub const OPEN_PROFILES: &str = "OPENPREFABS";
    pub const OPEN_PROFILE: &str = "OPENPREFAB";
    pub const RENAME_PROFILE: &str = "CHANGEPREFABNAME";
    pub const REMOVE_PROFILE: &str = "REMOVEPREFAB";
    pub const ADD_LOOT_TABLE: &str = "ADDLOOTTABLE";
    pub const REMOVE_LOOT_TABLE: &str = "REMOVELOOTTABLE";
    pub const OPEN_TABLE: &str = "OPENTABLESETTINGS";
    pub const SET_MIN_COUNT: &str = "SETMINCOUNTVALUE";
    pub const SET_MAX_COUNT: &str = "SETMAXCOUNTVALUE";
    pub const ADD_ITEM_ENTRY: &str = "ADDNEWITEM";
    pub const REMOVE_ITEM: &str = "REMOVEITEM";
    pub const OPEN_ITEM: &str = "SETNEWITEM";
    pub const PICK_ITEM: &str = "ADDITEM";
    pub const SET_ITEM_SKIN: &str = "CHGSKIN";
    pub const SET_MIN_AMOUNT: &str = "CHGMINAMOUNT";
    pub const SET_MAX_AMOUNT: &str = "CHGMAXAMOUNT";
    pub const SET_MIN_CONDITION: &str = "CHGMINCONDITION";
    pub const SET_MAX_CONDITION: &str = "CHGMAXCONDITION";
    pub const SET_DROP_CHANCE: &str = "CHGDROPCHANCE";
    pub const TOGGLE_BLUEPRINT: &str = "CHGISBLUEPRINT";
    pub const OPEN_SKIN_SLOT: &str = "OPENSKINS";
    pub const PICK_SKIN: &str = "ADDSKIN";
    pub const SET_SLOT_SKIN: &str = "CHGSKINBOT";
    pub const SEARCH: &str = "SEARCHING";
    pub const BACK_TO_TABLE: &str = "BACKTOITEMS";
    pub const BACK_TO_PROFILE: &str = "BACKTOPREFAB";
    pub const BACK_TO_PROFILES: &str = "BACKTOPREFABS";
}

/// Console verb that edits a numeric item field
pub fn field_verb(field: ItemField) -> &'static str {
    match field {
        ItemField::MinAmount => verb::SET_MIN_AMOUNT,
        ItemField::MaxAmount => verb::SET_MAX_AMOUNT,
        ItemField::MinCondition => verb::SET_MIN_CONDITION,
        ItemField::MaxCondition => verb::SET_MAX_CONDITION,
        ItemField::DropChance => verb::SET_DROP_CHANCE,
    }
}

/// Console verb that edits a loot table bound
pub fn bound_verb(bound: TableBound) -> &'static str {
    match bound {
        TableBound::Min => verb::SET_MIN_COUNT,
        TableBound::Max => verb::SET_MAX_COUNT,
    }
}

/// One editor operation with a fully resolved address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    OpenProfiles { page: usize, create: bool },
    OpenProfile { key: String },
    RenameProfile { key: String, new_key: String },
    RemoveProfile { page: usize, key: String },
    AddLootTable { key: String },
    RemoveLootTable { key: String, table: usize },
    OpenTable { key: String, table: usize },
    SetTableBound { key: String, table: usize, bound: TableBound, value: i32 },
    AddItem { key: String, table: usize },
    RemoveItem { key: String, table: usize, item: usize },
    OpenItem { key: String, table: usize, item: usize },
    PickItem { key: String, table: usize, item: usize, short_name: String, item_id: i32 },
    SetItemField { key: String, table: usize, item: usize, field: ItemField, value: i32 },
    SetItemSkin { key: String, table: usize, item: usize, skin_id: u64 },
    ToggleBlueprint { key: String, table: usize, item: usize },
    OpenSkinSlot { key: String, slot: usize },
    PickSkin { key: String, slot: usize, item_id: i32 },
    SetSlotSkin { key: String, slot: usize, skin_id: u64 },
    Search { key: String, table: usize, item: usize, target: PickerTarget, query: String },
    BackToProfiles,
}

impl EditRequest {
    /// Check if applying this request may change the configuration
    pub fn is_mutating(&self) -> bool {
        match self {
            Self::OpenProfiles { create, .. } => *create,
            Self::OpenProfile { .. }
            | Self::OpenTable { .. }
            | Self::OpenItem { .. }
            | Self::Search { .. }
            | Self::BackToProfiles => false,
            _ => true,
        }
    }

    /// Apply to the store and pick the view to redraw
    ///
    /// Pure navigation still validates its address so a stale view fails
    /// instead of drawing nothing.
    pub fn apply(&self, store: &mut ConfigStore, settings: &RouterSettings) -> StoreResult<Navigation> {
        let nav = match self {
            Self::OpenProfiles { page, create } => {
                if *create && store.insert_if_absent(&settings.placeholder_key, Profile::default())? {
                    log::info!("Created placeholder profile '{}'", settings.placeholder_key);
                }
                Navigation::ProfileList { page: *page }
            }
            Self::OpenProfile { key } => {
                store.profile(key)?;
                profile_view(key)
            }
            Self::RenameProfile { key, new_key } => {
                store.rename(key, new_key)?;
                log::info!("Renamed profile '{}' to '{}'", key, new_key);
                profile_view(new_key)
            }
            Self::RemoveProfile { page, key } => {
                store.remove(key)?;
                log::info!("Removed profile '{}'", key);
                Navigation::ProfileList { page: *page }
            }
            Self::AddLootTable { key } => {
                store.add_loot_table(key)?;
                profile_view(key)
            }
            Self::RemoveLootTable { key, table } => {
                store.remove_loot_table(key, *table)?;
                profile_view(key)
            }
            Self::OpenTable { key, table } => {
                store.table(key, *table)?;
                table_view(key, *table)
            }
            Self::SetTableBound { key, table, bound, value } => {
                store.set_table_bound(key, *table, *bound, *value)?;
                table_view(key, *table)
            }
            Self::AddItem { key, table } => {
                store.add_item(key, *table)?;
                table_view(key, *table)
            }
            Self::RemoveItem { key, table, item } => {
                store.remove_item(key, *table, *item)?;
                table_view(key, *table)
            }
            Self::OpenItem { key, table, item } => {
                store.item(key, *table, *item)?;
                item_view(key, *table, *item)
            }
            Self::PickItem { key, table, item, short_name, item_id } => {
                store.set_item_definition(key, *table, *item, short_name, *item_id)?;
                item_view(key, *table, *item)
            }
            Self::SetItemField { key, table, item, field, value } => {
                let stored = store.set_item_field(key, *table, *item, *field, *value)?;
                if stored != *value {
                    log::debug!("{:?} clamped from {} to {}", field, value, stored);
                }
                item_view(key, *table, *item)
            }
            Self::SetItemSkin { key, table, item, skin_id } => {
                store.set_item_skin(key, *table, *item, *skin_id)?;
                item_view(key, *table, *item)
            }
            Self::ToggleBlueprint { key, table, item } => {
                store.toggle_blueprint(key, *table, *item)?;
                item_view(key, *table, *item)
            }
            Self::OpenSkinSlot { key, slot } => {
                store.ensure_skin_slot(key, *slot)?;
                skin_view(key, *slot)
            }
            Self::PickSkin { key, slot, item_id } => {
                store.set_skin_slot_item(key, *slot, *item_id)?;
                skin_view(key, *slot)
            }
            Self::SetSlotSkin { key, slot, skin_id } => {
                store.set_skin_slot_skin(key, *slot, *skin_id)?;
                skin_view(key, *slot)
            }
            Self::Search { key, table, item, target, query } => {
                match target {
                    PickerTarget::LootEntry => {
                        store.item(key, *table, *item)?;
                    }
                    PickerTarget::SkinSlot => {
                        store.skin_slot(key, *item)?;
                    }
                }
                Navigation::ItemPicker {
                    key: key.clone(),
                    table: *table,
                    item: *item,
                    target: *target,
                    query: query.clone(),
                }
            }
            Self::BackToProfiles => Navigation::ProfileList { page: 0 },
        };
        Ok(nav)
    }

    /// Encode as a console command line
    pub fn to_command_line(&self) -> CommandLine {
        match self {
            Self::OpenProfiles { page, create } => CommandLine::new(verb::OPEN_PROFILES).arg(page).arg(create),
            Self::OpenProfile { key } => CommandLine::new(verb::OPEN_PROFILE).key(key),
            Self::RenameProfile { key, new_key } => CommandLine::new(verb::RENAME_PROFILE)
                .key(key)
                .value(RENAME_SENTINEL, new_key),
            Self::RemoveProfile { page, key } => CommandLine::new(verb::REMOVE_PROFILE).arg(page).key(key),
            Self::AddLootTable { key } => CommandLine::new(verb::ADD_LOOT_TABLE).key(key),
            Self::RemoveLootTable { key, table } => CommandLine::new(verb::REMOVE_LOOT_TABLE).arg(table).key(key),
            Self::OpenTable { key, table } => CommandLine::new(verb::OPEN_TABLE).arg(table).key(key),
            Self::SetTableBound { key, table, bound, value } => CommandLine::new(bound_verb(*bound))
                .arg(table)
                .key(key)
                .value(VALUE_SENTINEL, value),
            Self::AddItem { key, table } => CommandLine::new(verb::ADD_ITEM_ENTRY).arg(table).key(key),
            Self::RemoveItem { key, table, item } => item_line(verb::REMOVE_ITEM, key, *table, *item),
            Self::OpenItem { key, table, item } => item_line(verb::OPEN_ITEM, key, *table, *item),
            Self::PickItem { key, table, item, short_name, item_id } => CommandLine::new(verb::PICK_ITEM)
                .arg(short_name)
                .arg(item_id)
                .arg(item)
                .arg(table)
                .key(key),
            Self::SetItemField { key, table, item, field, value } => {
                item_line(field_verb(*field), key, *table, *item).value(VALUE_SENTINEL, value)
            }
            Self::SetItemSkin { key, table, item, skin_id } => {
                item_line(verb::SET_ITEM_SKIN, key, *table, *item).value(VALUE_SENTINEL, skin_id)
            }
            Self::ToggleBlueprint { key, table, item } => item_line(verb::TOGGLE_BLUEPRINT, key, *table, *item),
            Self::OpenSkinSlot { key, slot } => CommandLine::new(verb::OPEN_SKIN_SLOT).arg(slot).key(key),
            Self::PickSkin { key, slot, item_id } => CommandLine::new(verb::PICK_SKIN).arg(item_id).arg(slot).key(key),
            Self::SetSlotSkin { key, slot, skin_id } => CommandLine::new(verb::SET_SLOT_SKIN)
                .arg(slot)
                .key(key)
                .value(VALUE_SENTINEL, skin_id),
            Self::Search { key, table, item, target, query } => CommandLine::new(verb::SEARCH)
                .arg(*target == PickerTarget::SkinSlot)
                .arg(item)
                .arg(table)
                .key(key)
                .value(VALUE_SENTINEL, query),
            Self::BackToProfiles => CommandLine::new(verb::BACK_TO_PROFILES),
        }
    }
}

fn item_line(verb: &str, key: &str, table: usize, item: usize) -> CommandLine {
    CommandLine::new(verb).arg(item).arg(table).key(key)
}

fn profile_view(key: &str) -> Navigation {
    Navigation::Profile { key: key.to_string() }
}

fn table_view(key: &str, table: usize) -> Navigation {
    Navigation::Table { key: key.to_string(), table }
}

fn item_view(key: &str, table: usize, item: usize) -> Navigation {
    Navigation::ItemDetail { key: key.to_string(), table, item }
}

fn skin_view(key: &str, slot: usize) -> Navigation {
    Navigation::SkinEditor { key: key.to_string(), slot }
}
