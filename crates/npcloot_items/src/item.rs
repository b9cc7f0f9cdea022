//! Item definitions and instances

use serde::{Deserialize, Serialize};

/// Item category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    /// Firearms and melee weapons
    Weapon,
    /// Wearable clothing and armor
    Attire,
    /// Tools
    Tool,
    /// Raw resources
    Resource,
    /// Crafting components
    Component,
    /// Ammunition
    Ammunition,
    /// Medical supplies
    Medical,
    /// Food and water
    Food,
    /// Construction items
    Construction,
    /// Misc items
    Misc,
}

impl Default for ItemCategory {
    fn default() -> Self {
        Self::Misc
    }
}

impl ItemCategory {
    /// Check if items of this category go into wear slots
    pub fn is_wearable(&self) -> bool {
        matches!(self, Self::Attire)
    }
}

/// Item definition, as registered by the host's item manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDefinition {
    /// Numeric item id
    pub item_id: i32,
    /// Short name (e.g. `rifle.ak`)
    pub short_name: String,
    /// English display name
    pub display_name: String,
    /// Category
    pub category: ItemCategory,
    /// Maximum stack size (1 = not stackable)
    pub max_stack: u32,
    /// Maximum condition (0 = item has no condition)
    pub max_condition: f32,
}

impl ItemDefinition {
    /// Create a new item definition
    pub fn new(item_id: i32, short_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            item_id,
            short_name: short_name.into(),
            display_name: display_name.into(),
            category: ItemCategory::default(),
            max_stack: 1,
            max_condition: 0.0,
        }
    }

    /// Set category
    pub fn with_category(mut self, category: ItemCategory) -> Self {
        self.category = category;
        self
    }

    /// Set max stack size
    pub fn with_max_stack(mut self, max: u32) -> Self {
        self.max_stack = max.max(1);
        self
    }

    /// Set maximum condition
    pub fn with_max_condition(mut self, max: f32) -> Self {
        self.max_condition = max.max(0.0);
        self
    }

    /// Check if the item can be worn
    pub fn is_wearable(&self) -> bool {
        self.category.is_wearable()
    }

    /// Check if stackable
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// Check if the item tracks condition
    pub fn has_condition(&self) -> bool {
        self.max_condition > 0.0
    }
}

/// A concrete item created from a definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemInstance {
    /// Item id (references ItemDefinition)
    pub item_id: i32,
    /// Short name, copied from the definition
    pub short_name: String,
    /// Quantity
    pub quantity: u32,
    /// Workshop skin id (0 = default skin)
    pub skin_id: u64,
    /// Current condition
    pub condition: f32,
    /// Maximum condition, copied from the definition
    pub max_condition: f32,
    /// Item id this blueprint teaches, if the instance is a blueprint carrier
    pub blueprint_target: Option<i32>,
}

impl ItemInstance {
    /// Create a fresh instance at full condition
    pub fn new(definition: &ItemDefinition, quantity: u32, skin_id: u64) -> Self {
        Self {
            item_id: definition.item_id,
            short_name: definition.short_name.clone(),
            quantity: quantity.max(1),
            skin_id,
            condition: definition.max_condition,
            max_condition: definition.max_condition,
            blueprint_target: None,
        }
    }

    /// Set the item this blueprint teaches
    pub fn with_blueprint_target(mut self, item_id: i32) -> Self {
        self.blueprint_target = Some(item_id);
        self
    }

    /// Set condition, clamped to `[0, max_condition]`
    pub fn set_condition(&mut self, condition: f32) {
        self.condition = condition.clamp(0.0, self.max_condition);
    }

    /// Condition as a fraction of the maximum (1.0 for items without condition)
    pub fn condition_fraction(&self) -> f32 {
        if self.max_condition > 0.0 {
            self.condition / self.max_condition
        } else {
            1.0
        }
    }

    /// Check if this instance is a blueprint carrier
    pub fn is_blueprint(&self) -> bool {
        self.blueprint_target.is_some()
    }
}
