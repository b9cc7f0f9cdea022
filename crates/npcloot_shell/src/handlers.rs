//! Editor verb handlers
//!
//! Token positions are relative to the first token after the verb.

use crate::command::CommandHandler;
use crate::path::{parse_number, parse_saturating, ArgReader, DecodeError, RENAME_SENTINEL, VALUE_SENTINEL};
use crate::request::{bound_verb, field_verb, verb, EditRequest};
use npcloot_config::{ItemField, TableBound};
use npcloot_items::PickerTarget;
use std::sync::Arc;

/// All editor verbs
pub fn builtin_handlers() -> Vec<Arc<dyn CommandHandler>> {
    let mut handlers: Vec<Arc<dyn CommandHandler>> = vec![
        Arc::new(OpenProfilesCommand),
        Arc::new(OpenProfileCommand::new(verb::OPEN_PROFILE)),
        Arc::new(OpenProfileCommand::new(verb::BACK_TO_PROFILE)),
        Arc::new(RenameProfileCommand),
        Arc::new(RemoveProfileCommand),
        Arc::new(AddLootTableCommand),
        Arc::new(RemoveLootTableCommand),
        Arc::new(OpenTableCommand::new(verb::OPEN_TABLE)),
        Arc::new(OpenTableCommand::new(verb::BACK_TO_TABLE)),
        Arc::new(TableBoundCommand::new(TableBound::Min)),
        Arc::new(TableBoundCommand::new(TableBound::Max)),
        Arc::new(AddItemEntryCommand),
        Arc::new(RemoveItemCommand),
        Arc::new(OpenItemCommand),
        Arc::new(PickItemCommand),
        Arc::new(ItemSkinCommand),
        Arc::new(ToggleBlueprintCommand),
        Arc::new(OpenSkinSlotCommand),
        Arc::new(PickSkinCommand),
        Arc::new(SlotSkinCommand),
        Arc::new(SearchCommand),
        Arc::new(BackToProfilesCommand),
    ];

    for field in [
        ItemField::MinAmount,
        ItemField::MaxAmount,
        ItemField::MinCondition,
        ItemField::MaxCondition,
        ItemField::DropChance,
    ] {
        handlers.push(Arc::new(ItemFieldCommand::new(field)));
    }

    handlers
}

/// OPENPREFABS - list profiles, optionally adding the placeholder profile
pub struct OpenProfilesCommand;

impl CommandHandler for OpenProfilesCommand {
    fn name(&self) -> &str {
        verb::OPEN_PROFILES
    }

    fn description(&self) -> &str {
        "Show a page of profiles"
    }

    fn usage(&self) -> &str {
        "OPENPREFABS <page> <create>"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::OpenProfiles {
            page: args.index(0, "page")?,
            create: args.flag(1, "createFlag")?,
        })
    }
}

/// OPENPREFAB / BACKTOPREFAB - show one profile
pub struct OpenProfileCommand {
    verb: &'static str,
}

impl OpenProfileCommand {
    pub fn new(verb: &'static str) -> Self {
        Self { verb }
    }
}

impl CommandHandler for OpenProfileCommand {
    fn name(&self) -> &str {
        self.verb
    }

    fn description(&self) -> &str {
        "Show a profile"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::OpenProfile { key: args.key(0)? })
    }
}

/// CHANGEPREFABNAME - move a profile to a new key
pub struct RenameProfileCommand;

impl CommandHandler for RenameProfileCommand {
    fn name(&self) -> &str {
        verb::RENAME_PROFILE
    }

    fn description(&self) -> &str {
        "Rename a profile"
    }

    fn usage(&self) -> &str {
        "CHANGEPREFABNAME <key> newname <new key>"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        let kv = args.key_value(0, RENAME_SENTINEL)?;
        Ok(EditRequest::RenameProfile {
            key: kv.key,
            new_key: kv.value,
        })
    }
}

/// REMOVEPREFAB - delete a profile and return to the list
pub struct RemoveProfileCommand;

impl CommandHandler for RemoveProfileCommand {
    fn name(&self) -> &str {
        verb::REMOVE_PROFILE
    }

    fn description(&self) -> &str {
        "Delete a profile"
    }

    fn usage(&self) -> &str {
        "REMOVEPREFAB <page> <key>"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::RemoveProfile {
            page: args.index(0, "page")?,
            key: args.key(1)?,
        })
    }
}

pub struct AddLootTableCommand;

impl CommandHandler for AddLootTableCommand {
    fn name(&self) -> &str {
        verb::ADD_LOOT_TABLE
    }

    fn description(&self) -> &str {
        "Append an empty loot table"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::AddLootTable { key: args.key(0)? })
    }
}

pub struct RemoveLootTableCommand;

impl CommandHandler for RemoveLootTableCommand {
    fn name(&self) -> &str {
        verb::REMOVE_LOOT_TABLE
    }

    fn description(&self) -> &str {
        "Delete a loot table"
    }

    fn usage(&self) -> &str {
        "REMOVELOOTTABLE <table> <key>"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::RemoveLootTable {
            table: args.index(0, "tableIndex")?,
            key: args.key(1)?,
        })
    }
}

/// OPENTABLESETTINGS / BACKTOITEMS - show one loot table
pub struct OpenTableCommand {
    verb: &'static str,
}

impl OpenTableCommand {
    pub fn new(verb: &'static str) -> Self {
        Self { verb }
    }
}

impl CommandHandler for OpenTableCommand {
    fn name(&self) -> &str {
        self.verb
    }

    fn description(&self) -> &str {
        "Show a loot table"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::OpenTable {
            table: args.index(0, "tableIndex")?,
            key: args.key(1)?,
        })
    }
}

/// SETMINCOUNTVALUE / SETMAXCOUNTVALUE
pub struct TableBoundCommand {
    bound: TableBound,
}

impl TableBoundCommand {
    pub fn new(bound: TableBound) -> Self {
        Self { bound }
    }
}

impl CommandHandler for TableBoundCommand {
    fn name(&self) -> &str {
        bound_verb(self.bound)
    }

    fn description(&self) -> &str {
        "Set a loot table's item count bound"
    }

    fn usage(&self) -> &str {
        "<verb> <table> <key> amount <value>"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        let table = args.index(0, "tableIndex")?;
        let kv = args.key_value(1, VALUE_SENTINEL)?;
        Ok(EditRequest::SetTableBound {
            key: kv.key,
            table,
            bound: self.bound,
            value: parse_saturating(&kv.value, "value")?,
        })
    }
}

/// ADDNEWITEM - append a default entry to a table
pub struct AddItemEntryCommand;

impl CommandHandler for AddItemEntryCommand {
    fn name(&self) -> &str {
        verb::ADD_ITEM_ENTRY
    }

    fn description(&self) -> &str {
        "Append a default item entry"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::AddItem {
            table: args.index(0, "tableIndex")?,
            key: args.key(1)?,
        })
    }
}

pub struct RemoveItemCommand;

impl CommandHandler for RemoveItemCommand {
    fn name(&self) -> &str {
        verb::REMOVE_ITEM
    }

    fn description(&self) -> &str {
        "Delete an item entry"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        let (item, table) = item_address(&args)?;
        Ok(EditRequest::RemoveItem { key: args.key(2)?, table, item })
    }
}

/// SETNEWITEM - show one item entry
pub struct OpenItemCommand;

impl CommandHandler for OpenItemCommand {
    fn name(&self) -> &str {
        verb::OPEN_ITEM
    }

    fn description(&self) -> &str {
        "Show an item entry"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        let (item, table) = item_address(&args)?;
        Ok(EditRequest::OpenItem { key: args.key(2)?, table, item })
    }
}

/// ADDITEM - apply an item picker selection to an entry
pub struct PickItemCommand;

impl CommandHandler for PickItemCommand {
    fn name(&self) -> &str {
        verb::PICK_ITEM
    }

    fn description(&self) -> &str {
        "Point an item entry at a catalog item"
    }

    fn usage(&self) -> &str {
        "ADDITEM <shortName> <itemId> <item> <table> <key>"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::PickItem {
            short_name: args.token(0, "shortName")?.to_string(),
            item_id: args.int(1, "itemId")?,
            item: args.index(2, "itemIndex")?,
            table: args.index(3, "tableIndex")?,
            key: args.key(4)?,
        })
    }
}

/// CHGMINAMOUNT / CHGMAXAMOUNT / CHGMINCONDITION / CHGMAXCONDITION / CHGDROPCHANCE
pub struct ItemFieldCommand {
    field: ItemField,
}

impl ItemFieldCommand {
    pub fn new(field: ItemField) -> Self {
        Self { field }
    }
}

impl CommandHandler for ItemFieldCommand {
    fn name(&self) -> &str {
        field_verb(self.field)
    }

    fn description(&self) -> &str {
        "Set a numeric item entry field"
    }

    fn usage(&self) -> &str {
        "<verb> <item> <table> <key> amount <value>"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        let (item, table) = item_address(&args)?;
        let kv = args.key_value(2, VALUE_SENTINEL)?;
        Ok(EditRequest::SetItemField {
            key: kv.key,
            table,
            item,
            field: self.field,
            value: parse_saturating(&kv.value, "value")?,
        })
    }
}

/// CHGSKIN - set an item entry's skin id
pub struct ItemSkinCommand;

impl CommandHandler for ItemSkinCommand {
    fn name(&self) -> &str {
        verb::SET_ITEM_SKIN
    }

    fn description(&self) -> &str {
        "Set an item entry's skin"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        let (item, table) = item_address(&args)?;
        let kv = args.key_value(2, VALUE_SENTINEL)?;
        Ok(EditRequest::SetItemSkin {
            key: kv.key,
            table,
            item,
            skin_id: parse_number(&kv.value, "skin")?,
        })
    }
}

pub struct ToggleBlueprintCommand;

impl CommandHandler for ToggleBlueprintCommand {
    fn name(&self) -> &str {
        verb::TOGGLE_BLUEPRINT
    }

    fn description(&self) -> &str {
        "Toggle whether an entry drops as a blueprint"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        let (item, table) = item_address(&args)?;
        Ok(EditRequest::ToggleBlueprint { key: args.key(2)?, table, item })
    }
}

/// OPENSKINS - open a skin slot, creating it when empty
pub struct OpenSkinSlotCommand;

impl CommandHandler for OpenSkinSlotCommand {
    fn name(&self) -> &str {
        verb::OPEN_SKIN_SLOT
    }

    fn description(&self) -> &str {
        "Open an equipment skin slot"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::OpenSkinSlot {
            slot: args.index(0, "slotIndex")?,
            key: args.key(1)?,
        })
    }
}

/// ADDSKIN - apply a wearable picker selection to a slot
pub struct PickSkinCommand;

impl CommandHandler for PickSkinCommand {
    fn name(&self) -> &str {
        verb::PICK_SKIN
    }

    fn description(&self) -> &str {
        "Set a skin slot's item"
    }

    fn usage(&self) -> &str {
        "ADDSKIN <itemId> <slot> <key>"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::PickSkin {
            item_id: args.int(0, "itemId")?,
            slot: args.index(1, "slotIndex")?,
            key: args.key(2)?,
        })
    }
}

/// CHGSKINBOT - set a skin slot's skin id
pub struct SlotSkinCommand;

impl CommandHandler for SlotSkinCommand {
    fn name(&self) -> &str {
        verb::SET_SLOT_SKIN
    }

    fn description(&self) -> &str {
        "Set a skin slot's skin"
    }

    fn usage(&self) -> &str {
        "CHGSKINBOT <slot> <key> amount <skin>"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        let slot = args.index(0, "slotIndex")?;
        let kv = args.key_value(1, VALUE_SENTINEL)?;
        Ok(EditRequest::SetSlotSkin {
            key: kv.key,
            slot,
            skin_id: parse_number(&kv.value, "skin")?,
        })
    }
}

/// SEARCHING - filter the item picker
pub struct SearchCommand;

impl CommandHandler for SearchCommand {
    fn name(&self) -> &str {
        verb::SEARCH
    }

    fn description(&self) -> &str {
        "Search the item picker"
    }

    fn usage(&self) -> &str {
        "SEARCHING <isSkin> <item> <table> <key> amount <query>"
    }

    fn decode(&self, args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        let target = if args.flag(0, "isSkinFlag")? {
            PickerTarget::SkinSlot
        } else {
            PickerTarget::LootEntry
        };
        let item = args.index(1, "itemIndex")?;
        let table = args.index(2, "tableIndex")?;
        let kv = args.key_value(3, VALUE_SENTINEL)?;
        Ok(EditRequest::Search {
            key: kv.key,
            table,
            item,
            target,
            query: kv.value,
        })
    }
}

pub struct BackToProfilesCommand;

impl CommandHandler for BackToProfilesCommand {
    fn name(&self) -> &str {
        verb::BACK_TO_PROFILES
    }

    fn description(&self) -> &str {
        "Return to the first profile page"
    }

    fn decode(&self, _args: ArgReader<'_>) -> Result<EditRequest, DecodeError> {
        Ok(EditRequest::BackToProfiles)
    }
}

/// Leading `<item> <table>` pair shared by entry verbs
fn item_address(args: &ArgReader<'_>) -> Result<(usize, usize), DecodeError> {
    Ok((args.index(0, "itemIndex")?, args.index(1, "tableIndex")?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;
    use std::collections::HashSet;

    fn decode(line: &str) -> Result<EditRequest, DecodeError> {
        let cmd = Command::parse(line).unwrap();
        let handler = builtin_handlers()
            .into_iter()
            .find(|h| h.name() == cmd.verb)
            .unwrap();
        handler.decode(cmd.reader())
    }

    #[test]
    fn test_every_verb_registered_once() {
        let names: Vec<String> = builtin_handlers().iter().map(|h| h.name().to_string()).collect();
        let unique: HashSet<&String> = names.iter().collect();

        assert_eq!(names.len(), 27);
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn test_decode_field_edit() {
        assert_eq!(
            decode("CHGMINCONDITION 2 0 Ice Cream Man amount 35").unwrap(),
            EditRequest::SetItemField {
                key: "Ice Cream Man".into(),
                table: 0,
                item: 2,
                field: ItemField::MinCondition,
                value: 35,
            }
        );
    }

    #[test]
    fn test_decode_rename() {
        assert_eq!(
            decode("CHANGEPREFABNAME old npc newname new npc").unwrap(),
            EditRequest::RenameProfile { key: "old npc".into(), new_key: "new npc".into() }
        );
    }

    #[test]
    fn test_decode_search() {
        assert_eq!(
            decode("SEARCHING True 3 0 npc amount Hazmat Suit").unwrap(),
            EditRequest::Search {
                key: "npc".into(),
                table: 0,
                item: 3,
                target: PickerTarget::SkinSlot,
                query: "Hazmat Suit".into(),
            }
        );
    }

    #[test]
    fn test_decode_slot_skin() {
        assert_eq!(
            decode("CHGSKINBOT 4 my npc amount 2105470413").unwrap(),
            EditRequest::SetSlotSkin { key: "my npc".into(), slot: 4, skin_id: 2105470413 }
        );
    }

    #[test]
    fn test_short_token_lists_are_malformed() {
        assert_eq!(decode("OPENTABLESETTINGS 0"), Err(DecodeError::EmptyKey));
        assert_eq!(decode("ADDITEM rifle.ak"), Err(DecodeError::MissingArgument("itemId")));
        assert_eq!(decode("OPENPREFABS"), Err(DecodeError::MissingArgument("page")));
        assert!(matches!(
            decode("CHGDROPCHANCE 0 0 npc amount lots"),
            Err(DecodeError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_decoded_requests_encode_back() {
        for line in [
            "OPENPREFABS 1 true",
            "REMOVEPREFAB 0 my npc",
            "SETMAXCOUNTVALUE 1 my npc amount 6",
            "ADDITEM bandage -2072273936 0 1 my npc",
            "CHGSKIN 0 1 my npc amount 99",
            "ADDSKIN 1266491000 2 my npc",
            "SEARCHING false 0 1 my npc amount ak",
        ] {
            assert_eq!(decode(line).unwrap().to_command_line().to_string(), line);
        }
    }
}
