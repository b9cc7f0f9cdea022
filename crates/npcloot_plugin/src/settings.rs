//! Plugin settings
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables: `NPCLOOT_DATA_FILE`, `NPCLOOT_PAGE_SIZE`
//! 2. Settings file: `npcloot.toml` in the working directory
//! 3. Built-in defaults
//!
//! # Example Settings File
//!
//! ```toml
//! data_file = "data/NPCLoot.json"
//! catalog_file = "data/items.json"
//! page_size = 12
//! search_limit = 56
//! max_generation_passes = 256
//! placeholder_key = "ENTER NPC PREFAB HERE"
//! blueprint_carrier = "blueprintbase"
//! ```

use npcloot_loot::{GeneratorSettings, DEFAULT_BLUEPRINT_CARRIER, DEFAULT_MAX_PASSES};
use npcloot_shell::{RouterSettings, DEFAULT_PLACEHOLDER_KEY};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default settings file name
pub const SETTINGS_FILE: &str = "npcloot.toml";

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid settings file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {name}: '{value}'")]
    InvalidValue { name: &'static str, value: String },
}

/// Plugin settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginSettings {
    /// Loot configuration document
    pub data_file: PathBuf,
    /// Item definitions for the console binary (JSON array)
    pub catalog_file: Option<PathBuf>,
    /// Profiles per list page
    pub page_size: usize,
    /// Maximum item picker results
    pub search_limit: usize,
    /// Cap on passes over a loot table's entries
    pub max_generation_passes: u32,
    /// Key of the profile created by the "+" button
    pub placeholder_key: String,
    /// Short name of the item that carries blueprints
    pub blueprint_carrier: String,
}

impl Default for PluginSettings {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/NPCLoot.json"),
            catalog_file: None,
            page_size: 12,
            search_limit: 56,
            max_generation_passes: DEFAULT_MAX_PASSES,
            placeholder_key: DEFAULT_PLACEHOLDER_KEY.to_string(),
            blueprint_carrier: DEFAULT_BLUEPRINT_CARRIER.to_string(),
        }
    }
}

impl PluginSettings {
    /// Load from [`SETTINGS_FILE`] if present, then apply environment overrides
    pub fn load() -> Result<Self, SettingsError> {
        let path = Path::new(SETTINGS_FILE);
        let settings = if path.exists() {
            let settings = Self::load_from_file(path)?;
            log::info!("Loaded settings from {}", path.display());
            settings
        } else {
            Self::default()
        };

        settings.with_overrides(|name| std::env::var(name).ok())
    }

    /// Load from a TOML file; missing fields keep their defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        let settings: Self = toml::from_str(content)?;
        Ok(settings.normalized())
    }

    /// Apply `NPCLOOT_*` overrides from a variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("NPCLOOT_DATA_FILE").filter(|v| !v.is_empty()) {
            log::info!("Data file from env: {}", path);
            self.data_file = PathBuf::from(path);
        }

        if let Some(size) = lookup("NPCLOOT_PAGE_SIZE") {
            self.page_size = size.trim().parse().map_err(|_| SettingsError::InvalidValue {
                name: "NPCLOOT_PAGE_SIZE",
                value: size.clone(),
            })?;
        }

        Ok(self.normalized())
    }

    /// Settings for the command router
    pub fn router_settings(&self) -> RouterSettings {
        RouterSettings {
            placeholder_key: self.placeholder_key.clone(),
        }
    }

    /// Settings for the loot generator
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            max_passes: self.max_generation_passes,
            blueprint_carrier: self.blueprint_carrier.clone(),
        }
    }

    fn normalized(mut self) -> Self {
        self.page_size = self.page_size.max(1);
        self.max_generation_passes = self.max_generation_passes.max(1);
        if self.placeholder_key.trim().is_empty() {
            self.placeholder_key = DEFAULT_PLACEHOLDER_KEY.to_string();
        }
        self
    }
}
