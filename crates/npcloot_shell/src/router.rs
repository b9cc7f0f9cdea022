//! Command router
//!
//! Dispatches verbs to handlers and runs every decoded request through one
//! locked mutate-then-persist path.

use crate::command::{Command, CommandError, CommandHandler};
use crate::handlers;
use crate::navigation::Navigation;
use crate::request::EditRequest;
use npcloot_config::{ConfigPersistence, ConfigStore, PersistError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Default profile key inserted by the "+" button on the profile list
pub const DEFAULT_PLACEHOLDER_KEY: &str = "ENTER NPC PREFAB HERE";

/// Router settings
#[derive(Debug, Clone)]
pub struct RouterSettings {
    /// Key inserted by `OPENPREFABS <page> true`
    pub placeholder_key: String,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            placeholder_key: DEFAULT_PLACEHOLDER_KEY.to_string(),
        }
    }
}

/// Command router
pub struct CommandRouter {
    /// Registered verb handlers
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    /// Shared configuration
    store: Arc<RwLock<ConfigStore>>,
    /// Load/save capability
    persistence: Arc<dyn ConfigPersistence>,
    settings: RouterSettings,
}

impl CommandRouter {
    /// Create a router with every editor verb registered
    pub fn new(store: Arc<RwLock<ConfigStore>>, persistence: Arc<dyn ConfigPersistence>) -> Self {
        let mut router = Self {
            handlers: HashMap::new(),
            store,
            persistence,
            settings: RouterSettings::default(),
        };

        for handler in handlers::builtin_handlers() {
            router.register(handler);
        }

        router
    }

    /// Set router settings
    pub fn with_settings(mut self, settings: RouterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Register a handler, replacing any handler for the same verb
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        self.handlers.insert(handler.name().to_string(), handler);
    }

    /// Unregister a handler
    pub fn unregister(&mut self, verb: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.remove(verb)
    }

    /// Get handler for a verb
    pub fn get_handler(&self, verb: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(verb).cloned()
    }

    /// Get all verbs, sorted
    pub fn command_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Shared store handle
    pub fn store(&self) -> &Arc<RwLock<ConfigStore>> {
        &self.store
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    /// Parse and execute a console line
    pub fn execute_line(&self, line: &str) -> Result<Navigation, CommandError> {
        self.execute(Command::parse(line)?)
    }

    /// Execute a tokenized command
    pub fn execute(&self, cmd: Command) -> Result<Navigation, CommandError> {
        let handler = self.handlers.get(&cmd.verb).ok_or_else(|| {
            log::debug!("Unknown command: {}", cmd.verb);
            CommandError::UnknownCommand(cmd.verb.clone())
        })?;

        let request = handler.decode(cmd.reader()).map_err(|source| {
            log::debug!("Rejected {} {:?}: {}", cmd.verb, cmd.args, source);
            CommandError::Malformed {
                verb: cmd.verb.clone(),
                source,
            }
        })?;

        self.submit(request)
    }

    /// Apply a structured request
    ///
    /// Holds the write lock from mutation through persistence. A failed
    /// save is logged and does not undo the edit.
    pub fn submit(&self, request: EditRequest) -> Result<Navigation, CommandError> {
        let mut store = self.store.write();

        let nav = request.apply(&mut store, &self.settings).map_err(|e| {
            log::warn!("Command failed: {}", e);
            CommandError::from(e)
        })?;

        if request.is_mutating() {
            if let Err(e) = self.persistence.save(store.configuration()) {
                log::error!("Failed to save loot configuration: {}", e);
            }
        }

        Ok(nav)
    }

    /// Persist the current configuration
    pub fn save(&self) -> Result<(), PersistError> {
        let store = self.store.read();
        self.persistence.save(store.configuration())
    }
}
