//! In-memory configuration store
//!
//! Every operation resolves its full address before touching anything, so a
//! failing call leaves the configuration exactly as it was.

use crate::error::{Address, StoreError, StoreResult};
use crate::model::{Configuration, ItemEntry, ItemField, LootTable, Profile, SkinSlot, TableBound};

/// Owner of the loot configuration tree
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    config: Configuration,
}

impl ConfigStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from a loaded document, repairing out-of-range values
    pub fn from_configuration(mut config: Configuration) -> Self {
        let dropped = config.sanitize();
        if dropped > 0 {
            log::warn!("Dropped {} profile(s) with empty or duplicate keys", dropped);
        }
        Self { config }
    }

    /// Borrow the whole document (for persistence)
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Replace the whole document
    pub fn replace(&mut self, config: Configuration) {
        *self = Self::from_configuration(config);
    }

    /// Number of profiles
    pub fn len(&self) -> usize {
        self.config.len()
    }

    /// Check if there are no profiles
    pub fn is_empty(&self) -> bool {
        self.config.is_empty()
    }

    // ===== Reads =====

    pub fn get(&self, key: &str) -> Option<&Profile> {
        self.config.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.config.contains_key(key)
    }

    /// Clone a profile so a caller can work on a consistent copy
    pub fn snapshot(&self, key: &str) -> Option<Profile> {
        self.config.get(key).cloned()
    }

    pub fn profile(&self, key: &str) -> StoreResult<&Profile> {
        self.config
            .get(key)
            .ok_or_else(|| StoreError::NotFound(Address::Profile(key.to_string())))
    }

    pub fn table(&self, key: &str, table: usize) -> StoreResult<&LootTable> {
        self.profile(key)?
            .loot_tables
            .get(table)
            .ok_or_else(|| table_address(key, table))
    }

    pub fn item(&self, key: &str, table: usize, item: usize) -> StoreResult<&ItemEntry> {
        self.table(key, table)?
            .items
            .get(item)
            .ok_or_else(|| item_address(key, table, item))
    }

    /// Read a skin slot; `Ok(None)` is an empty slot, an index past the
    /// fixed slot count is `NotFound`
    pub fn skin_slot(&self, key: &str, slot: usize) -> StoreResult<Option<&SkinSlot>> {
        let profile = self.profile(key)?;
        if slot >= crate::model::SKIN_SLOT_COUNT {
            return Err(slot_address(key, slot));
        }
        Ok(profile.skins.get(slot))
    }

    /// Page through profiles in insertion order
    pub fn list(&self, skip: usize, take: usize) -> Vec<(&str, &Profile)> {
        self.config.iter().skip(skip).take(take).collect()
    }

    /// Number of pages for a page size (an empty store still has one page)
    pub fn page_count(&self, page_size: usize) -> usize {
        let size = page_size.max(1);
        self.len().div_ceil(size).max(1)
    }

    // ===== Profiles =====

    /// Insert or replace a profile
    pub fn upsert(&mut self, key: &str, profile: Profile) -> StoreResult<()> {
        check_key(key)?;
        self.config.insert(key, profile);
        Ok(())
    }

    /// Insert only when the key is free; returns whether it was inserted
    pub fn insert_if_absent(&mut self, key: &str, profile: Profile) -> StoreResult<bool> {
        check_key(key)?;
        if self.config.contains_key(key) {
            return Ok(false);
        }
        self.config.insert(key, profile);
        Ok(true)
    }

    /// Move a profile to a new key
    ///
    /// Fails with `Conflict` when the target exists, including renaming a key
    /// onto itself. The profile keeps its listing position.
    pub fn rename(&mut self, old_key: &str, new_key: &str) -> StoreResult<()> {
        let index = self
            .config
            .position(old_key)
            .ok_or_else(|| StoreError::NotFound(Address::Profile(old_key.to_string())))?;
        check_key(new_key)?;
        if self.config.contains_key(new_key) {
            return Err(StoreError::Conflict(new_key.to_string()));
        }
        self.config.rekey(index, new_key.to_string());
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> StoreResult<Profile> {
        self.config
            .remove(key)
            .ok_or_else(|| StoreError::NotFound(Address::Profile(key.to_string())))
    }

    // ===== Loot tables =====

    /// Append a default table; returns its index
    pub fn add_loot_table(&mut self, key: &str) -> StoreResult<usize> {
        let profile = self.profile_mut(key)?;
        profile.loot_tables.push(LootTable::default());
        Ok(profile.loot_tables.len() - 1)
    }

    /// Remove a table; later tables shift down by one
    pub fn remove_loot_table(&mut self, key: &str, table: usize) -> StoreResult<LootTable> {
        self.table_mut(key, table)?;
        let profile = self.profile_mut(key)?;
        Ok(profile.loot_tables.remove(table))
    }

    /// Write both bounds, clamped
    pub fn set_table_bounds(&mut self, key: &str, table: usize, min: i32, max: i32) -> StoreResult<()> {
        self.table_mut(key, table)?.set_bounds(min, max);
        Ok(())
    }

    /// Write one bound against the other; returns the stored value
    pub fn set_table_bound(&mut self, key: &str, table: usize, bound: TableBound, value: i32) -> StoreResult<i32> {
        Ok(self.table_mut(key, table)?.set_bound(bound, value))
    }

    // ===== Item entries =====

    /// Append a default entry; returns its index
    pub fn add_item(&mut self, key: &str, table: usize) -> StoreResult<usize> {
        let table = self.table_mut(key, table)?;
        table.items.push(ItemEntry::default());
        Ok(table.items.len() - 1)
    }

    /// Remove an entry; later entries shift down by one
    pub fn remove_item(&mut self, key: &str, table: usize, item: usize) -> StoreResult<ItemEntry> {
        self.item_mut(key, table, item)?;
        Ok(self.table_mut(key, table)?.items.remove(item))
    }

    /// Write a numeric field, clamped; returns the stored value
    pub fn set_item_field(
        &mut self,
        key: &str,
        table: usize,
        item: usize,
        field: ItemField,
        value: i32,
    ) -> StoreResult<i32> {
        Ok(self.item_mut(key, table, item)?.set_field(field, value))
    }

    /// Point an entry at another item definition
    pub fn set_item_definition(
        &mut self,
        key: &str,
        table: usize,
        item: usize,
        short_name: &str,
        item_id: i32,
    ) -> StoreResult<()> {
        let entry = self.item_mut(key, table, item)?;
        entry.short_name = short_name.to_string();
        entry.item_id = item_id;
        Ok(())
    }

    pub fn set_item_skin(&mut self, key: &str, table: usize, item: usize, skin_id: u64) -> StoreResult<()> {
        self.item_mut(key, table, item)?.skin_id = skin_id;
        Ok(())
    }

    /// Flip the blueprint flag; returns the new value
    pub fn toggle_blueprint(&mut self, key: &str, table: usize, item: usize) -> StoreResult<bool> {
        let entry = self.item_mut(key, table, item)?;
        entry.is_blueprint = !entry.is_blueprint;
        Ok(entry.is_blueprint)
    }

    // ===== Skin slots =====

    pub fn set_skin_slot(&mut self, key: &str, slot: usize, item_id: i32, skin_id: u64) -> StoreResult<()> {
        *self.slot_entry_mut(key, slot)? = Some(SkinSlot::new(item_id, skin_id));
        Ok(())
    }

    /// Open a slot for editing, filling an empty one with the default slot
    pub fn ensure_skin_slot(&mut self, key: &str, slot: usize) -> StoreResult<SkinSlot> {
        let entry = self.slot_entry_mut(key, slot)?;
        Ok(*entry.get_or_insert_with(SkinSlot::default))
    }

    pub fn set_skin_slot_item(&mut self, key: &str, slot: usize, item_id: i32) -> StoreResult<()> {
        let entry = self.slot_entry_mut(key, slot)?;
        entry.get_or_insert_with(SkinSlot::default).item_id = item_id;
        Ok(())
    }

    pub fn set_skin_slot_skin(&mut self, key: &str, slot: usize, skin_id: u64) -> StoreResult<()> {
        let entry = self.slot_entry_mut(key, slot)?;
        entry.get_or_insert_with(SkinSlot::default).skin_id = skin_id;
        Ok(())
    }

    // ===== Resolution =====

    fn profile_mut(&mut self, key: &str) -> StoreResult<&mut Profile> {
        self.config
            .get_mut(key)
            .ok_or_else(|| StoreError::NotFound(Address::Profile(key.to_string())))
    }

    fn table_mut(&mut self, key: &str, table: usize) -> StoreResult<&mut LootTable> {
        self.profile_mut(key)?
            .loot_tables
            .get_mut(table)
            .ok_or_else(|| table_address(key, table))
    }

    fn item_mut(&mut self, key: &str, table: usize, item: usize) -> StoreResult<&mut ItemEntry> {
        self.table_mut(key, table)?
            .items
            .get_mut(item)
            .ok_or_else(|| item_address(key, table, item))
    }

    fn slot_entry_mut(&mut self, key: &str, slot: usize) -> StoreResult<&mut Option<SkinSlot>> {
        self.profile_mut(key)?
            .skins
            .entry_mut(slot)
            .ok_or_else(|| slot_address(key, slot))
    }
}

fn check_key(key: &str) -> StoreResult<()> {
    if key.is_empty() {
        Err(StoreError::InvalidKey)
    } else {
        Ok(())
    }
}

fn table_address(key: &str, table: usize) -> StoreError {
    StoreError::NotFound(Address::Table { key: key.to_string(), table })
}

fn item_address(key: &str, table: usize, item: usize) -> StoreError {
    StoreError::NotFound(Address::Item { key: key.to_string(), table, item })
}

fn slot_address(key: &str, slot: usize) -> StoreError {
    StoreError::NotFound(Address::SkinSlot { key: key.to_string(), slot })
}
