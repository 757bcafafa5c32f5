//! The settings interface the coordinator reconciles against.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use ruler_core::ruler::RulerItem;
use ruler_core::Result;

// ── Setting keys ──────────────────────────────────────────────────────────────

/// Settings key holding the ordered ruler list.
pub const RULERS_KEY: &str = "editor.rulers";

/// This tool's own settings namespace.
pub const SETTINGS_NAMESPACE: &str = "clangRuler";

/// Settings key holding the ruler color override.
pub const COLOR_KEY: &str = "clangRuler.color";

// ── SettingsStore ─────────────────────────────────────────────────────────────

/// Shared mutable settings accessed by the coordinator.
///
/// All reads and writes go through this trait so tests can substitute
/// [`MemoryStore`] for the file-backed store. The host serializes access;
/// there is exactly one writer (the coordinator), so read-then-write is
/// acceptable without further locking.
pub trait SettingsStore: Send + Sync {
    /// The current ruler list; an empty list when the setting is absent.
    fn rulers(&self) -> Result<Vec<RulerItem>>;

    /// Replace the ruler list at workspace scope.
    fn set_rulers(&self, rulers: &[RulerItem]) -> Result<()>;

    /// The configured ruler color, exactly as stored.
    ///
    /// The empty string is a valid stored value; the coordinator treats it
    /// as "unset" when computing the desired entry.
    fn ruler_color(&self) -> Result<Option<String>>;
}

// ── MemoryStore ───────────────────────────────────────────────────────────────

/// In-memory [`SettingsStore`] for tests.
///
/// Counts ruler writes so tests can assert that an unchanged reconciliation
/// performs no redundant write.
#[derive(Default)]
pub struct MemoryStore {
    rulers: Mutex<Vec<RulerItem>>,
    color: Mutex<Option<String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with an initial ruler list.
    pub fn with_rulers(rulers: Vec<RulerItem>) -> Self {
        let store = Self::new();
        *store.rulers.lock().expect("rulers lock") = rulers;
        store
    }

    /// Set the color option as a user would through the settings UI.
    pub fn set_color(&self, color: Option<&str>) {
        *self.color.lock().expect("color lock") = color.map(str::to_string);
    }

    /// Number of [`SettingsStore::set_rulers`] calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SettingsStore for MemoryStore {
    fn rulers(&self) -> Result<Vec<RulerItem>> {
        Ok(self.rulers.lock().expect("rulers lock").clone())
    }

    fn set_rulers(&self, rulers: &[RulerItem]) -> Result<()> {
        *self.rulers.lock().expect("rulers lock") = rulers.to_vec();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn ruler_color(&self) -> Result<Option<String>> {
        Ok(self.color.lock().expect("color lock").clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
