//! Configuration persistence

use crate::model::Configuration;
use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Persistence errors
#[derive(Debug, Error)]
pub enum PersistError {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Stored document could not be parsed
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl PersistError {
    /// Check if the stored document is unreadable (as opposed to unreachable)
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Deserialization(_))
    }
}

/// Load/save capability for the whole configuration document
pub trait ConfigPersistence: Send + Sync {
    /// Load the stored document; `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<Configuration>, PersistError>;

    /// Store the whole document
    fn save(&self, config: &Configuration) -> Result<(), PersistError>;
}

/// Load the stored document, falling back to an empty one
///
/// A corrupt document is logged and overwritten with the empty default.
pub fn load_or_default(persistence: &dyn ConfigPersistence) -> Result<Configuration, PersistError> {
    match persistence.load() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => {
            log::info!("No loot configuration stored, starting empty");
            Ok(Configuration::default())
        }
        Err(e) if e.is_corrupt() => {
            log::error!("Loot configuration is corrupt, replacing with default: {}", e);
            let config = Configuration::default();
            persistence.save(&config)?;
            Ok(config)
        }
        Err(e) => Err(e),
    }
}

/// JSON document on disk
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
    pretty: bool,
}

impl JsonFilePersistence {
    /// Create a persistence for a file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Set pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Get file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_dir(&self) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl ConfigPersistence for JsonFilePersistence {
    fn load(&self) -> Result<Option<Configuration>, PersistError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&self.path)?;
        let config = serde_json::from_slice(&bytes)
            .map_err(|e| PersistError::Deserialization(e.to_string()))?;

        log::debug!("Loaded loot configuration from {}", self.path.display());
        Ok(Some(config))
    }

    fn save(&self, config: &Configuration) -> Result<(), PersistError> {
        self.ensure_dir()?;

        let bytes = if self.pretty {
            serde_json::to_vec_pretty(config)
        } else {
            serde_json::to_vec(config)
        }
        .map_err(|e| PersistError::Serialization(e.to_string()))?;

        fs::write(&self.path, bytes)?;
        log::debug!("Saved loot configuration to {}", self.path.display());
        Ok(())
    }
}

/// In-memory persistence that counts saves
#[derive(Debug, Default)]
pub struct MemoryPersistence {
    stored: Mutex<Option<Configuration>>,
    saves: AtomicUsize,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a stored document
    pub fn with_document(config: Configuration) -> Self {
        Self {
            stored: Mutex::new(Some(config)),
            saves: AtomicUsize::new(0),
        }
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Last stored document
    pub fn stored(&self) -> Option<Configuration> {
        self.stored.lock().clone()
    }
}

impl ConfigPersistence for MemoryPersistence {
    fn load(&self) -> Result<Option<Configuration>, PersistError> {
        Ok(self.stored.lock().clone())
    }

    fn save(&self, config: &Configuration) -> Result<(), PersistError> {
        *self.stored.lock() = Some(config.clone());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Profile;

    struct CorruptPersistence {
        inner: MemoryPersistence,
    }

    impl ConfigPersistence for CorruptPersistence {
        fn load(&self) -> Result<Option<Configuration>, PersistError> {
            Err(PersistError::Deserialization("expected value at line 1".into()))
        }

        fn save(&self, config: &Configuration) -> Result<(), PersistError> {
            self.inner.save(config)
        }
    }

    #[test]
    fn test_memory_round_trip() {
        let memory = MemoryPersistence::new();
        assert!(memory.load().unwrap().is_none());

        let mut config = Configuration::new();
        config.insert("scientist", Profile::default());
        memory.save(&config).unwrap();

        assert_eq!(memory.load().unwrap(), Some(config));
        assert_eq!(memory.save_count(), 1);
    }

    #[test]
    fn test_missing_document_defaults_without_saving() {
        let memory = MemoryPersistence::new();

        let config = load_or_default(&memory).unwrap();
        assert!(config.is_empty());
        assert_eq!(memory.save_count(), 0);
    }

    #[test]
    fn test_corrupt_document_is_replaced() {
        let corrupt = CorruptPersistence { inner: MemoryPersistence::new() };

        let config = load_or_default(&corrupt).unwrap();
        assert!(config.is_empty());
        assert_eq!(corrupt.inner.save_count(), 1);
    }
}
