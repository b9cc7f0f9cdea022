//! Item containers

use crate::item::ItemInstance;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Container shared between the host and deferred loot generation
pub type SharedContainer = Arc<Mutex<ItemContainer>>;

/// Fixed-capacity, ordered item container
///
/// Items are never merged on insert: every generated instance keeps its own
/// condition and skin, so each occupies its own position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemContainer {
    /// Stored items in insertion order
    items: Vec<ItemInstance>,
    /// Maximum number of items
    capacity: usize,
}

impl ItemContainer {
    /// Create a new container with given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Wrap into a shared handle
    pub fn shared(self) -> SharedContainer {
        Arc::new(Mutex::new(self))
    }

    /// Get container capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Get number of stored items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if container is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get number of free positions
    pub fn free_slots(&self) -> usize {
        self.capacity.saturating_sub(self.items.len())
    }

    /// Check if container is full
    pub fn is_full(&self) -> bool {
        self.free_slots() == 0
    }

    /// Get item at position
    pub fn get(&self, position: usize) -> Option<&ItemInstance> {
        self.items.get(position)
    }

    /// Insert an item at the end
    ///
    /// Returns the position, or hands the item back when the container is full.
    pub fn insert(&mut self, item: ItemInstance) -> Result<usize, ItemInstance> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(self.items.len() - 1)
    }

    /// Remove item at position (later items shift down)
    pub fn remove(&mut self, position: usize) -> Option<ItemInstance> {
        if position < self.items.len() {
            Some(self.items.remove(position))
        } else {
            None
        }
    }

    /// Remove and return all items
    pub fn clear(&mut self) -> Vec<ItemInstance> {
        self.items.drain(..).collect()
    }

    /// Count total quantity of an item
    pub fn count_item(&self, item_id: i32) -> u32 {
        self.items
            .iter()
            .filter(|i| i.item_id == item_id)
            .map(|i| i.quantity)
            .sum()
    }

    /// Find first position holding a short name
    pub fn find(&self, short_name: &str) -> Option<usize> {
        self.items.iter().position(|i| i.short_name == short_name)
    }

    /// Iterate stored items
    pub fn items(&self) -> impl Iterator<Item = &ItemInstance> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemDefinition;

    fn stack(id: i32, short: &str, qty: u32) -> ItemInstance {
        ItemInstance::new(&ItemDefinition::new(id, short, short), qty, 0)
    }

    #[test]
    fn test_container_creation() {
        let c = ItemContainer::new(6);

        assert_eq!(c.capacity(), 6);
        assert!(c.is_empty());
        assert_eq!(c.free_slots(), 6);
    }

    #[test]
    fn test_insert_keeps_instances_apart() {
        let mut c = ItemContainer::new(4);

        assert_eq!(c.insert(stack(1, "scrap", 1)), Ok(0));
        assert_eq!(c.insert(stack(1, "scrap", 1)), Ok(1));

        assert_eq!(c.len(), 2);
        assert_eq!(c.count_item(1), 2);
    }

    #[test]
    fn test_full_container_returns_item() {
        let mut c = ItemContainer::new(1);
        c.insert(stack(1, "scrap", 5)).unwrap();

        let rejected = c.insert(stack(2, "wood", 3)).unwrap_err();
        assert_eq!(rejected.short_name, "wood");
        assert!(c.is_full());
    }

    #[test]
    fn test_clear_returns_contents() {
        let mut c = ItemContainer::new(3);
        c.insert(stack(1, "scrap", 1)).unwrap();
        c.insert(stack(2, "wood", 1)).unwrap();

        let drained = c.clear();
        assert_eq!(drained.len(), 2);
        assert!(c.is_empty());
    }

    #[test]
    fn test_remove_compacts() {
        let mut c = ItemContainer::new(3);
        c.insert(stack(1, "a", 1)).unwrap();
        c.insert(stack(2, "b", 1)).unwrap();
        c.insert(stack(3, "c", 1)).unwrap();

        assert_eq!(c.remove(1).unwrap().short_name, "b");
        assert_eq!(c.find("c"), Some(1));
        assert!(c.remove(7).is_none());
    }
}
