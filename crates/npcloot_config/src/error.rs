//! Store errors

use thiserror::Error;

/// Errors from [`ConfigStore`](crate::store::ConfigStore) operations
///
/// A failed operation never leaves a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Address does not resolve
    #[error("Not found: {0}")]
    NotFound(Address),

    /// Rename target already exists
    #[error("Profile already exists: {0}")]
    Conflict(String),

    /// Profile keys must be non-empty
    #[error("Profile key must not be empty")]
    InvalidKey,
}

impl StoreError {
    /// Check if this is an unresolved address
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// A location in the configuration tree
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Address {
    Profile(String),
    Table { key: String, table: usize },
    Item { key: String, table: usize, item: usize },
    SkinSlot { key: String, slot: usize },
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Profile(key) => write!(f, "profile '{}'", key),
            Self::Table { key, table } => write!(f, "loot table {} of '{}'", table, key),
            Self::Item { key, table, item } => {
                write!(f, "item {} in loot table {} of '{}'", item, table, key)
            }
            Self::SkinSlot { key, slot } => write!(f, "skin slot {} of '{}'", slot, key),
        }
    }
}

/// Result alias for store operations
pub type StoreResult<T> = Result<T, StoreError>;
