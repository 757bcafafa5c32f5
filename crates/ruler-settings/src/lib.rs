//! Settings-store layer for the ruler synchronizer.
//!
//! The coordinator talks to the editor's settings through the
//! [`store::SettingsStore`] trait; production code uses the flat-JSON
//! [`json_store::JsonSettingsStore`] over `.vscode/settings.json`, tests use
//! the in-memory [`store::MemoryStore`].

pub mod json_store;
pub mod store;

pub use json_store::{changed_keys, JsonSettingsStore};
pub use store::{MemoryStore, SettingsStore, COLOR_KEY, RULERS_KEY, SETTINGS_NAMESPACE};
