//! # NPC Loot Plugin
//!
//! Host-facing entry point that wires the editor and the runtime together:
//!
//! - [`PluginSettings`] from `npcloot.toml` plus `NPCLOOT_*` environment overrides
//! - [`NpcLootPlugin`] lifecycle hooks (load, save, unload)
//! - Console command routing for the editor panels
//! - Next-tick corpse population and spawn-time equipment
//!
//! ## Example
//!
//! ```ignore
//! use npcloot_plugin::prelude::*;
//! use std::sync::Arc;
//!
//! let settings = PluginSettings::load()?;
//! let persistence = Arc::new(JsonFilePersistence::new(settings.data_file.clone()));
//! let plugin = NpcLootPlugin::new(settings, persistence, catalog, Arc::new(ThreadRandom));
//! plugin.on_server_initialized()?;
//!
//! // Host events
//! plugin.on_corpse_populate("scientist", vec![corpse]);
//! plugin.tick();
//! ```

pub mod plugin;
pub mod settings;

pub mod prelude {
    pub use crate::plugin::{NpcLootPlugin, PluginError, TickSummary};
    pub use crate::settings::{PluginSettings, SettingsError, SETTINGS_FILE};
    pub use npcloot_config::{ConfigPersistence, JsonFilePersistence};
    pub use npcloot_loot::ThreadRandom;
    pub use npcloot_shell::Navigation;
}

pub use plugin::{NpcLootPlugin, PluginError, TickSummary};
pub use settings::{PluginSettings, SettingsError, SETTINGS_FILE};
pub use npcloot_shell::Navigation;
