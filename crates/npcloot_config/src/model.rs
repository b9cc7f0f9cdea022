//! Configuration data model
//!
//! The serialized field names follow the plugin's long-standing data file
//! layout (`LootTables`, `BotSkins`, `itemID`, ...) so existing files load
//! unchanged.

use serde::{Deserialize, Serialize};

/// Number of fixed equipment skin positions on a profile
pub const SKIN_SLOT_COUNT: usize = 7;

/// Lowest and highest condition percentage
pub const CONDITION_RANGE: (i32, i32) = (1, 100);

/// Lowest and highest drop chance percentage
pub const DROP_CHANCE_RANGE: (i32, i32) = (1, 100);

/// Default item id for a freshly opened skin slot
pub const DEFAULT_SLOT_ITEM_ID: i32 = 1266491000;

/// Numeric item entry fields editable from the command layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemField {
    MinAmount,
    MaxAmount,
    MinCondition,
    MaxCondition,
    DropChance,
}

/// Loot table count bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableBound {
    Min,
    Max,
}

/// One candidate item in a loot table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemEntry {
    #[serde(rename = "shortName")]
    pub short_name: String,
    #[serde(rename = "itemID")]
    pub item_id: i32,
    #[serde(rename = "skin")]
    pub skin_id: u64,
    #[serde(rename = "minAmount")]
    pub min_amount: i32,
    #[serde(rename = "maxAmount")]
    pub max_amount: i32,
    #[serde(rename = "minCondition")]
    pub min_condition: i32,
    #[serde(rename = "maxCondition")]
    pub max_condition: i32,
    #[serde(rename = "dropChance")]
    pub drop_chance: i32,
    #[serde(rename = "isBlueprint")]
    pub is_blueprint: bool,
}

impl Default for ItemEntry {
    fn default() -> Self {
        Self {
            short_name: "rifle.ak".to_string(),
            item_id: 1545779598,
            skin_id: 0,
            min_amount: 1,
            max_amount: 1,
            min_condition: 100,
            max_condition: 100,
            drop_chance: 100,
            is_blueprint: false,
        }
    }
}

impl ItemEntry {
    /// Read a numeric field
    pub fn field(&self, field: ItemField) -> i32 {
        match field {
            ItemField::MinAmount => self.min_amount,
            ItemField::MaxAmount => self.max_amount,
            ItemField::MinCondition => self.min_condition,
            ItemField::MaxCondition => self.max_condition,
            ItemField::DropChance => self.drop_chance,
        }
    }

    /// Write a numeric field, clamping it into its valid range
    ///
    /// Paired bounds clamp against their partner, which never moves:
    /// a minimum is capped at the current maximum and vice versa.
    /// Returns the stored value.
    pub fn set_field(&mut self, field: ItemField, value: i32) -> i32 {
        let (lo, hi) = CONDITION_RANGE;
        match field {
            ItemField::MinAmount => {
                self.min_amount = value.clamp(1, self.max_amount.max(1));
                self.min_amount
            }
            ItemField::MaxAmount => {
                self.max_amount = value.max(self.min_amount.max(1));
                self.max_amount
            }
            ItemField::MinCondition => {
                self.min_condition = value.clamp(lo, self.max_condition.clamp(lo, hi));
                self.min_condition
            }
            ItemField::MaxCondition => {
                self.max_condition = value.clamp(self.min_condition.clamp(lo, hi), hi);
                self.max_condition
            }
            ItemField::DropChance => {
                self.drop_chance = value.clamp(DROP_CHANCE_RANGE.0, DROP_CHANCE_RANGE.1);
                self.drop_chance
            }
        }
    }

    /// Force every field back into its valid range
    pub fn sanitize(&mut self) {
        let (lo, hi) = CONDITION_RANGE;
        self.min_amount = self.min_amount.max(1);
        self.max_amount = self.max_amount.max(self.min_amount);
        self.min_condition = self.min_condition.clamp(lo, hi);
        self.max_condition = self.max_condition.clamp(self.min_condition, hi);
        self.drop_chance = self.drop_chance.clamp(DROP_CHANCE_RANGE.0, DROP_CHANCE_RANGE.1);
    }
}

/// A bundle of candidate items with count bounds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LootTable {
    #[serde(rename = "minItemAmount")]
    pub min_item_amount: i32,
    #[serde(rename = "maxItemAmount")]
    pub max_item_amount: i32,
    pub items: Vec<ItemEntry>,
}

impl Default for LootTable {
    fn default() -> Self {
        Self {
            min_item_amount: 1,
            max_item_amount: 2,
            items: Vec::new(),
        }
    }
}

impl LootTable {
    /// Create an empty table with explicit bounds
    pub fn with_bounds(min: i32, max: i32) -> Self {
        let mut table = Self::default();
        table.set_bounds(min, max);
        table
    }

    /// Add an entry (builder form)
    pub fn with_item(mut self, item: ItemEntry) -> Self {
        self.items.push(item);
        self
    }

    /// Write one bound, clamped against the other. Returns the stored value.
    pub fn set_bound(&mut self, bound: TableBound, value: i32) -> i32 {
        match bound {
            TableBound::Min => {
                self.min_item_amount = value.clamp(0, self.max_item_amount.max(0));
                self.min_item_amount
            }
            TableBound::Max => {
                self.max_item_amount = value.max(self.min_item_amount.max(0));
                self.max_item_amount
            }
        }
    }

    /// Write both bounds at once: `min` is floored at 0, `max` at `min`
    pub fn set_bounds(&mut self, min: i32, max: i32) {
        self.min_item_amount = min.max(0);
        self.max_item_amount = max.max(self.min_item_amount);
    }

    /// Force every field back into its valid range
    pub fn sanitize(&mut self) {
        let (min, max) = (self.min_item_amount, self.max_item_amount);
        self.set_bounds(min, max);
        self.items.iter_mut().for_each(ItemEntry::sanitize);
    }
}

/// Equipment skin for one fixed slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkinSlot {
    #[serde(rename = "itemID")]
    pub item_id: i32,
    #[serde(rename = "skin")]
    pub skin_id: u64,
}

impl Default for SkinSlot {
    fn default() -> Self {
        Self {
            item_id: DEFAULT_SLOT_ITEM_ID,
            skin_id: 0,
        }
    }
}

impl SkinSlot {
    pub fn new(item_id: i32, skin_id: u64) -> Self {
        Self { item_id, skin_id }
    }
}

/// Exactly [`SKIN_SLOT_COUNT`] independently nullable skin slots
///
/// Serialized as a plain array; arrays of any other length are padded with
/// empty slots or truncated on load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Option<SkinSlot>>", into = "Vec<Option<SkinSlot>>")]
pub struct SkinSlots([Option<SkinSlot>; SKIN_SLOT_COUNT]);

impl SkinSlots {
    /// Get a slot (None if empty or out of range)
    pub fn get(&self, index: usize) -> Option<&SkinSlot> {
        self.0.get(index)?.as_ref()
    }

    /// Get a mutable slot entry, `None` when out of range
    pub fn entry_mut(&mut self, index: usize) -> Option<&mut Option<SkinSlot>> {
        self.0.get_mut(index)
    }

    /// Number of populated slots
    pub fn populated(&self) -> usize {
        self.0.iter().filter(|s| s.is_some()).count()
    }

    /// Iterate all slots in index order
    pub fn iter(&self) -> impl Iterator<Item = Option<&SkinSlot>> {
        self.0.iter().map(|s| s.as_ref())
    }
}

impl From<Vec<Option<SkinSlot>>> for SkinSlots {
    fn from(slots: Vec<Option<SkinSlot>>) -> Self {
        let mut fixed = [None; SKIN_SLOT_COUNT];
        for (target, slot) in fixed.iter_mut().zip(slots) {
            *target = slot;
        }
        Self(fixed)
    }
}

impl From<SkinSlots> for Vec<Option<SkinSlot>> {
    fn from(slots: SkinSlots) -> Self {
        slots.0.to_vec()
    }
}

/// One entity template's weapon, equipment skins and loot tables
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    #[serde(rename = "Weapon [Shortname]")]
    pub weapon: Option<String>,
    #[serde(rename = "BotSkins")]
    pub skins: SkinSlots,
    #[serde(rename = "LootTables")]
    pub loot_tables: Vec<LootTable>,
}

impl Profile {
    /// Configured weapon short name; empty strings count as none
    pub fn weapon(&self) -> Option<&str> {
        self.weapon.as_deref().filter(|w| !w.trim().is_empty())
    }

    /// Set weapon (builder form)
    pub fn with_weapon(mut self, short_name: impl Into<String>) -> Self {
        self.weapon = Some(short_name.into());
        self
    }

    /// Set a skin slot (builder form); out-of-range indices are ignored
    pub fn with_skin(mut self, index: usize, slot: SkinSlot) -> Self {
        if let Some(entry) = self.skins.entry_mut(index) {
            *entry = Some(slot);
        }
        self
    }

    /// Add a loot table (builder form)
    pub fn with_table(mut self, table: LootTable) -> Self {
        self.loot_tables.push(table);
        self
    }

    /// Force every field back into its valid range
    pub fn sanitize(&mut self) {
        self.loot_tables.iter_mut().for_each(LootTable::sanitize);
    }
}

/// All profiles, keyed by entity template id, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Configuration {
    #[serde(rename = "LootTables", with = "ordered_profiles", default)]
    profiles: Vec<(String, Profile)>,
}

impl Configuration {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of profiles
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Check if there are no profiles
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Position of a key in insertion order
    pub fn position(&self, key: &str) -> Option<usize> {
        self.profiles.iter().position(|(k, _)| k == key)
    }

    /// Check if a key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Get a profile
    pub fn get(&self, key: &str) -> Option<&Profile> {
        self.profiles.iter().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    /// Get a mutable profile
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Profile> {
        self.profiles.iter_mut().find(|(k, _)| k == key).map(|(_, p)| p)
    }

    /// Insert or replace; replaced profiles keep their position
    pub fn insert(&mut self, key: impl Into<String>, profile: Profile) -> Option<Profile> {
        let key = key.into();
        match self.position(&key) {
            Some(index) => Some(std::mem::replace(&mut self.profiles[index].1, profile)),
            None => {
                self.profiles.push((key, profile));
                None
            }
        }
    }

    /// Remove a profile; later profiles shift down
    pub fn remove(&mut self, key: &str) -> Option<Profile> {
        let index = self.position(key)?;
        Some(self.profiles.remove(index).1)
    }

    /// Replace the key at a position, keeping the profile and its position
    pub(crate) fn rekey(&mut self, index: usize, key: String) {
        if let Some(entry) = self.profiles.get_mut(index) {
            entry.0 = key;
        }
    }

    /// Iterate profiles in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Profile)> {
        self.profiles.iter().map(|(k, p)| (k.as_str(), p))
    }

    /// Repair a hand-edited document
    ///
    /// Drops empty keys and duplicate keys (first occurrence wins) and clamps
    /// every numeric field. Returns the number of dropped profiles.
    pub fn sanitize(&mut self) -> usize {
        let before = self.profiles.len();
        let mut seen = std::collections::HashSet::new();
        self.profiles
            .retain(|(key, _)| !key.is_empty() && seen.insert(key.clone()));
        for (_, profile) in &mut self.profiles {
            profile.sanitize();
        }
        before - self.profiles.len()
    }
}

impl FromIterator<(String, Profile)> for Configuration {
    fn from_iter<I: IntoIterator<Item = (String, Profile)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (key, profile) in iter {
            config.insert(key, profile);
        }
        config
    }
}

/// Serialize the ordered profile list as a JSON object, keeping document order
mod ordered_profiles {
    use super::Profile;
    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};
    use std::fmt;

    pub fn serialize<S: Serializer>(profiles: &[(String, Profile)], serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(profiles.len()))?;
        for (key, profile) in profiles {
            map.serialize_entry(key, profile)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<(String, Profile)>, D::Error> {
        deserializer.deserialize_map(OrderedVisitor)
    }

    struct OrderedVisitor;

    impl<'de> Visitor<'de> for OrderedVisitor {
        type Value = Vec<(String, Profile)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of profile key to profile")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
            let mut profiles = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, profile)) = access.next_entry::<String, Profile>()? {
                profiles.push((key, profile));
            }
            Ok(profiles)
        }
    }
}
