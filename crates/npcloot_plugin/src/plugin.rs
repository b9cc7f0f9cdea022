//! Plugin lifecycle
//!
//! Glue between host events and the editor/runtime crates. The host calls
//! the `on_*` hooks; corpse population is deferred to the next [`tick`]
//! because the host fills corpses with its own loot after the hook returns.
//!
//! [`tick`]: NpcLootPlugin::tick

use crate::settings::PluginSettings;
use crossbeam_channel::{unbounded, Receiver, Sender};
use npcloot_config::{load_or_default, ConfigPersistence, ConfigStore, PersistError};
use npcloot_items::{ItemCatalog, NpcLoadout, SharedContainer};
use npcloot_loot::{ApplyReport, EquipmentApplier, GenerationReport, LootError, LootGenerator, RandomSource};
use npcloot_shell::{Command, CommandError, CommandRouter, ItemPicker, Navigation, ProfilePage};
use parking_lot::RwLock;
use std::sync::Arc;
use thiserror::Error;

/// Plugin errors
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error(transparent)]
    Command(#[from] CommandError),
}

/// Corpse waiting for its loot
struct PopulateRequest {
    template_id: String,
    containers: Vec<SharedContainer>,
}

/// Outcome of one [`NpcLootPlugin::tick`]
#[derive(Debug, Default)]
pub struct TickSummary {
    /// Corpses filled, with their template id
    pub populated: Vec<(String, GenerationReport)>,
    /// Requests whose profile was removed before the tick
    pub dropped: usize,
    /// Generations aborted by an instantiation error
    pub failed: Vec<(String, LootError)>,
}

impl TickSummary {
    pub fn is_empty(&self) -> bool {
        self.populated.is_empty() && self.dropped == 0 && self.failed.is_empty()
    }
}

/// NPC loot plugin
pub struct NpcLootPlugin {
    settings: PluginSettings,
    store: Arc<RwLock<ConfigStore>>,
    persistence: Arc<dyn ConfigPersistence>,
    catalog: Arc<dyn ItemCatalog>,
    router: CommandRouter,
    generator: LootGenerator,
    equipment: EquipmentApplier,
    queue_tx: Sender<PopulateRequest>,
    queue_rx: Receiver<PopulateRequest>,
}

impl NpcLootPlugin {
    /// Create a plugin with an empty configuration
    ///
    /// Call [`on_server_initialized`](Self::on_server_initialized) to load the
    /// stored document.
    pub fn new(
        settings: PluginSettings,
        persistence: Arc<dyn ConfigPersistence>,
        catalog: Arc<dyn ItemCatalog>,
        rng: Arc<dyn RandomSource>,
    ) -> Self {
        let store = Arc::new(RwLock::new(ConfigStore::new()));
        let router = CommandRouter::new(store.clone(), persistence.clone())
            .with_settings(settings.router_settings());
        let generator = LootGenerator::new(catalog.clone(), rng)
            .with_settings(settings.generator_settings());
        let equipment = EquipmentApplier::new(catalog.clone());
        let (queue_tx, queue_rx) = unbounded();

        Self {
            settings,
            store,
            persistence,
            catalog,
            router,
            generator,
            equipment,
            queue_tx,
            queue_rx,
        }
    }

    pub fn settings(&self) -> &PluginSettings {
        &self.settings
    }

    pub fn store(&self) -> &Arc<RwLock<ConfigStore>> {
        &self.store
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Load the configuration document
    pub fn on_server_initialized(&self) -> Result<(), PluginError> {
        let config = load_or_default(self.persistence.as_ref())?;
        let mut store = self.store.write();
        store.replace(config);
        log::info!("Loaded {} loot profile(s)", store.len());
        Ok(())
    }

    /// Persist the configuration
    pub fn on_server_save(&self) -> Result<(), PluginError> {
        self.router.save()?;
        Ok(())
    }

    /// Persist and discard corpses that never got their tick
    pub fn unload(&self) -> Result<(), PluginError> {
        let discarded = self.queue_rx.try_iter().count();
        if discarded > 0 {
            log::debug!("Discarding {} pending populate request(s)", discarded);
        }
        self.on_server_save()
    }

    // =========================================================================
    // Editor
    // =========================================================================

    /// Run console arguments (`UI_NL` prefix optional)
    pub fn console_command<S: AsRef<str>>(&self, args: &[S]) -> Result<Navigation, PluginError> {
        let command = Command::from_tokens(args.iter().map(|a| a.as_ref()))?;
        Ok(self.router.execute(command)?)
    }

    /// Run one console line
    pub fn console_line(&self, line: &str) -> Result<Navigation, PluginError> {
        Ok(self.router.execute_line(line)?)
    }

    /// Directive for the editor's entry view
    pub fn open_editor(&self) -> Navigation {
        Navigation::ProfileList { page: 0 }
    }

    /// Profile list page view
    pub fn profile_page(&self, page: usize) -> ProfilePage {
        ProfilePage::build(&self.store.read(), page, self.settings.page_size)
    }

    /// Picker view for an [`Navigation::ItemPicker`] directive
    pub fn item_picker(&self, nav: &Navigation) -> Option<ItemPicker> {
        match nav {
            Navigation::ItemPicker { key, table, item, target, query } => Some(ItemPicker::build(
                self.catalog.as_ref(),
                key,
                *table,
                *item,
                *target,
                query,
                self.settings.search_limit,
            )),
            _ => None,
        }
    }

    // =========================================================================
    // Host events
    // =========================================================================

    /// Queue a corpse for population on the next tick
    ///
    /// Returns `false` when the template has no profile; the host's own loot
    /// is left alone in that case.
    pub fn on_corpse_populate(&self, template_id: &str, containers: Vec<SharedContainer>) -> bool {
        if !self.store.read().contains(template_id) {
            return false;
        }

        let request = PopulateRequest {
            template_id: template_id.to_string(),
            containers,
        };
        // Both ends live in self, so the channel cannot be disconnected here.
        if self.queue_tx.send(request).is_err() {
            log::error!("Populate queue closed; dropping corpse for {}", template_id);
            return false;
        }
        true
    }

    /// Number of corpses waiting for the next tick
    pub fn pending(&self) -> usize {
        self.queue_rx.len()
    }

    /// Populate every queued corpse
    pub fn tick(&self) -> TickSummary {
        let mut summary = TickSummary::default();

        for request in self.queue_rx.try_iter() {
            let Some(profile) = self.store.read().snapshot(&request.template_id) else {
                log::debug!("Profile {} removed before populate", request.template_id);
                summary.dropped += 1;
                continue;
            };

            match self.generator.populate(&profile, &request.containers) {
                Ok(report) => summary.populated.push((request.template_id, report)),
                Err(e) => {
                    log::warn!("Loot generation for {} aborted: {}", request.template_id, e);
                    summary.failed.push((request.template_id, e));
                }
            }
        }

        if !summary.is_empty() {
            log::debug!(
                "Tick: {} populated, {} dropped, {} failed",
                summary.populated.len(),
                summary.dropped,
                summary.failed.len()
            );
        }
        summary
    }

    /// Dress a freshly spawned NPC
    pub fn on_entity_spawned(&self, template_id: &str, loadout: &mut NpcLoadout) -> Option<ApplyReport> {
        let profile = self.store.read().snapshot(template_id)?;
        Some(self.equipment.apply(&profile, loadout))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npcloot_config::{Configuration, ItemEntry, LootTable, MemoryPersistence, Profile};
    use npcloot_items::{ItemContainer, ItemDefinition, LoadoutSlot, MemoryCatalog};
    use npcloot_loot::FixedRandom;

    const RIFLE: i32 = 1545779598;

    fn plugin_with(config: Configuration) -> (NpcLootPlugin, Arc<MemoryPersistence>) {
        let persistence = Arc::new(MemoryPersistence::with_document(config));
        let catalog = MemoryCatalog::new().with(ItemDefinition::new(RIFLE, "rifle.ak", "Assault Rifle"));
        let plugin = NpcLootPlugin::new(
            PluginSettings::default(),
            persistence.clone(),
            Arc::new(catalog),
            Arc::new(FixedRandom(0)),
        );
        plugin.on_server_initialized().unwrap();
        (plugin, persistence)
    }

    fn scientist() -> Configuration {
        let profile = Profile::default()
            .with_weapon("rifle.ak")
            .with_table(LootTable::with_bounds(1, 1).with_item(ItemEntry::default()));
        [("scientist".to_string(), profile)].into_iter().collect()
    }

    #[test]
    fn test_populate_waits_for_tick() {
        let (plugin, _) = plugin_with(scientist());
        let corpse = ItemContainer::new(12).shared();

        assert!(plugin.on_corpse_populate("scientist", vec![corpse.clone()]));
        assert!(corpse.lock().is_empty());
        assert_eq!(plugin.pending(), 1);

        let summary = plugin.tick();

        assert_eq!(summary.populated.len(), 1);
        assert_eq!(plugin.pending(), 0);
        assert_eq!(corpse.lock().len(), 1);
    }

    #[test]
    fn test_unknown_template_is_ignored() {
        let (plugin, _) = plugin_with(scientist());

        assert!(!plugin.on_corpse_populate("murderer", vec![ItemContainer::new(12).shared()]));
        assert_eq!(plugin.pending(), 0);
        assert!(plugin.on_entity_spawned("murderer", &mut NpcLoadout::new()).is_none());
    }

    #[test]
    fn test_removed_profile_drops_request() {
        let (plugin, _) = plugin_with(scientist());
        plugin.on_corpse_populate("scientist", vec![ItemContainer::new(12).shared()]);

        plugin.console_line("UI_NL REMOVEPREFAB 0 scientist").unwrap();
        let summary = plugin.tick();

        assert_eq!(summary.dropped, 1);
        assert!(summary.populated.is_empty());
    }

    #[test]
    fn test_spawn_equips_weapon() {
        let (plugin, _) = plugin_with(scientist());
        let mut npc = NpcLoadout::new();

        let report = plugin.on_entity_spawned("scientist", &mut npc).unwrap();

        assert_eq!(report.weapon, Some(LoadoutSlot::Belt));
    }

    #[test]
    fn test_unload_saves_and_clears_queue() {
        let (plugin, persistence) = plugin_with(scientist());
        plugin.on_corpse_populate("scientist", vec![ItemContainer::new(12).shared()]);

        plugin.unload().unwrap();

        assert_eq!(plugin.pending(), 0);
        assert_eq!(persistence.save_count(), 1);
        assert!(persistence.stored().unwrap().contains_key("scientist"));
    }

    #[test]
    fn test_console_args() {
        let (plugin, _) = plugin_with(Configuration::default());

        let nav = plugin.console_command(&["OPENPREFABS", "0", "true"]).unwrap();

        assert_eq!(nav, Navigation::ProfileList { page: 0 });
        assert_eq!(plugin.profile_page(0).entries.len(), 1);
    }
}
