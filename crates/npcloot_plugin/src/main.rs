//! NPC Loot console
//!
//! Drives the loot editor from a terminal. Each line is an editor command
//! (`UI_NL` prefix optional); the resulting navigation directive and its
//! view model are printed as JSON instead of drawing a panel.
//!
//! Run with: cargo run -p npcloot_plugin
//!       or: cargo run --bin npcloot

use npcloot_config::JsonFilePersistence;
use npcloot_items::{ItemContainer, ItemDefinition, MemoryCatalog, NpcLoadout};
use npcloot_loot::ThreadRandom;
use npcloot_plugin::{Navigation, NpcLootPlugin, PluginSettings};
use serde_json::json;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;

/// Corpse capacity used by `populate`
const CORPSE_SLOTS: usize = 36;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match PluginSettings::load() {
        Ok(settings) => settings,
        Err(e) => {
            log::error!("Failed to load settings: {}", e);
            std::process::exit(1);
        }
    };

    let catalog = match settings.catalog_file.as_deref() {
        Some(path) => match load_catalog(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                log::error!("Failed to load item catalog {}: {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            log::warn!("No catalog_file configured; item picker and generation will find nothing");
            MemoryCatalog::new()
        }
    };

    let persistence = JsonFilePersistence::new(settings.data_file.clone()).with_pretty(true);
    let plugin = NpcLootPlugin::new(settings, Arc::new(persistence), Arc::new(catalog), Arc::new(ThreadRandom));

    if let Err(e) = plugin.on_server_initialized() {
        log::error!("Failed to load loot configuration: {}", e);
        std::process::exit(1);
    }

    println!("NPC Loot console");
    println!("Type 'help' for commands, 'exit' to quit.");
    print_directive(&plugin, &plugin.open_editor());

    run(&plugin);

    if let Err(e) = plugin.unload() {
        log::error!("Failed to save loot configuration: {}", e);
    }
}

fn run(plugin: &NpcLootPlugin) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("npcloot> ");
        // A broken stdout only loses the prompt.
        let _ = io::stdout().flush();

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                log::error!("Failed to read input: {}", e);
                break;
            }
            None => break,
        };

        let line = line.trim();
        let mut words = line.split_whitespace();
        match words.next() {
            None => continue,
            Some("exit") | Some("quit") => break,
            Some("help") => print_help(plugin),
            Some("save") => match plugin.on_server_save() {
                Ok(()) => println!("Saved."),
                Err(e) => println!("Save failed: {}", e),
            },
            Some("populate") => populate(plugin, words.collect::<Vec<_>>().join(" ").as_str()),
            Some("spawn") => spawn(plugin, words.collect::<Vec<_>>().join(" ").as_str()),
            Some(_) => match plugin.console_line(line) {
                Ok(nav) => print_directive(plugin, &nav),
                Err(e) => println!("Error: {}", e),
            },
        }
    }
}

fn load_catalog(path: &Path) -> Result<MemoryCatalog, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let definitions: Vec<ItemDefinition> = serde_json::from_str(&content)?;
    let catalog: MemoryCatalog = definitions.into_iter().collect();
    log::info!("Loaded {} item definition(s) from {}", catalog.len(), path.display());
    Ok(catalog)
}

fn print_directive(plugin: &NpcLootPlugin, nav: &Navigation) {
    let view = match nav {
        Navigation::ProfileList { page } => serde_json::to_value(plugin.profile_page(*page)),
        Navigation::ItemPicker { .. } => serde_json::to_value(plugin.item_picker(nav)),
        _ => {
            let store = plugin.store().read();
            let profile = nav.profile_key().and_then(|key| store.get(key));
            serde_json::to_value(profile)
        }
    };

    let output = match view {
        Ok(view) => json!({ "navigation": nav, "view": view }),
        Err(e) => {
            log::error!("Failed to serialize view: {}", e);
            json!({ "navigation": nav })
        }
    };

    match serde_json::to_string_pretty(&output) {
        Ok(text) => println!("{}", text),
        Err(e) => log::error!("Failed to serialize directive: {}", e),
    }
}

fn print_help(plugin: &NpcLootPlugin) {
    println!("Console commands:");
    println!("  help                 Show this help");
    println!("  save                 Write the loot configuration");
    println!("  populate <template>  Fill a test corpse from a profile");
    println!("  spawn <template>     Dress a test NPC from a profile");
    println!("  exit                 Save and quit");
    println!();
    println!("Editor commands:");
    for name in plugin.router().command_names() {
        if let Some(handler) = plugin.router().get_handler(name) {
            println!("  {:<18} {}", name, handler.description());
            println!("  {:<18}   {}", "", handler.usage());
        }
    }
}

fn populate(plugin: &NpcLootPlugin, template_id: &str) {
    let corpse = ItemContainer::new(CORPSE_SLOTS).shared();
    if !plugin.on_corpse_populate(template_id, vec![corpse.clone()]) {
        println!("No profile for '{}'.", template_id);
        return;
    }

    let summary = plugin.tick();
    for (template, e) in &summary.failed {
        println!("Generation for '{}' failed: {}", template, e);
    }
    for (_, report) in &summary.populated {
        println!(
            "Placed {} item(s) from table {:?} in {} pass(es) ({:?})",
            report.placed, report.table, report.passes, report.reason
        );
    }

    for item in corpse.lock().items() {
        println!("  {}", json!(item));
    }
}

fn spawn(plugin: &NpcLootPlugin, template_id: &str) {
    let mut npc = NpcLoadout::new();
    let Some(report) = plugin.on_entity_spawned(template_id, &mut npc) else {
        println!("No profile for '{}'.", template_id);
        return;
    };

    println!(
        "Weapon: {:?}, worn: {}, skipped: {}",
        report.weapon, report.worn, report.skipped
    );
    for item in npc.wear().items().chain(npc.belt().items()) {
        println!("  {}", json!(item));
    }
}
