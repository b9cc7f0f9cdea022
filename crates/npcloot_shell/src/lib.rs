//! # NPC Loot Shell
//!
//! Command layer for the loot editor:
//! - Token commands as sent by the editor panels
//! - Sentinel-delimited path encoding and decoding
//! - Verb handlers decoding into structured edit requests
//! - A router that applies and persists edits under one lock
//! - Navigation directives and view models for the renderer
//!
//! ## Architecture
//!
//! ```text
//! Console line ──► Command ──► Handler ──► EditRequest ──► Router ──► ConfigStore
//!                                              ▲              │
//!                          submit() ───────────┘              ▼
//!                                                        Navigation
//! ```
//!
//! ## Usage
//!
//! ```text
//! UI_NL OPENPREFABS 0 true
//! UI_NL ADDLOOTTABLE ENTER NPC PREFAB HERE
//! UI_NL CHANGEPREFABNAME ENTER NPC PREFAB HERE newname scientist
//! UI_NL CHGDROPCHANCE 0 0 scientist amount 40
//! ```

pub mod command;
pub mod handlers;
pub mod navigation;
pub mod path;
pub mod request;
pub mod router;
pub mod views;

pub use command::{Command, CommandError, CommandHandler, CONSOLE_PREFIX};
pub use navigation::Navigation;
pub use path::{
    decode_key, decode_key_value, ArgReader, CommandLine, DecodeError, KeyValue, RENAME_SENTINEL,
    VALUE_SENTINEL,
};
pub use request::{verb, EditRequest};
pub use router::{CommandRouter, RouterSettings, DEFAULT_PLACEHOLDER_KEY};
pub use views::{ItemPicker, PickerEntry, ProfileEntry, ProfilePage};
