//! Host notifications and cancellation handles.
//!
//! Everything the coordinator reacts to arrives as a [`HostEvent`] on one
//! channel, so handling is strictly ordered on a single task. Registrations
//! hand out [`Subscription`] handles; a cancelled subscription gates the
//! corresponding events off without tearing down the channel.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

// ── Events ────────────────────────────────────────────────────────────────────

/// A single notification delivered to the coordinator's event loop.
#[derive(Debug, Clone)]
pub enum HostEvent {
    /// The active document switched; `None` when no document is open.
    DocumentActivated(Option<PathBuf>),
    /// One or more settings values changed.
    SettingsChanged(SettingsChange),
    /// The watched style file was created, changed, or deleted.
    StyleFile(StyleFileEvent),
    /// Stop the event loop and dispose the coordinator.
    Shutdown,
}

/// What happened to the watched style file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFileEvent {
    Created,
    Changed,
    Deleted,
}

// ── SettingsChange ────────────────────────────────────────────────────────────

/// Description of which settings keys changed, filterable by section.
#[derive(Debug, Clone, Default)]
pub struct SettingsChange {
    keys: Vec<String>,
}

impl SettingsChange {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// `true` when the change touches `section`.
    ///
    /// A changed key matches when it equals the section, lives under it
    /// (`clangRuler.color` affects `clangRuler`), or is an ancestor of it
    /// (a rewrite of all of `editor` affects `editor.rulers`).
    pub fn affects(&self, section: &str) -> bool {
        self.keys.iter().any(|key| {
            key.as_str() == section
                || key
                    .strip_prefix(section)
                    .is_some_and(|rest| rest.starts_with('.'))
                || section
                    .strip_prefix(key.as_str())
                    .is_some_and(|rest| rest.starts_with('.'))
        })
    }
}

// ── Subscription ──────────────────────────────────────────────────────────────

/// Shared flag that gates delivery of one event registration.
pub type Gate = Arc<AtomicBool>;

/// Cancellation handle returned by an event registration.
///
/// Cancelling flips the shared gate so the dispatching side stops
/// delivering. `cancel` is idempotent, dropping the handle cancels, and the
/// [`Subscription::inert`] form stands in for a registration that was never
/// made.
#[derive(Debug, Default)]
pub struct Subscription {
    gate: Option<Gate>,
}

impl Subscription {
    /// Create an active subscription together with its dispatcher-side gate.
    pub fn pair() -> (Self, Gate) {
        let gate: Gate = Arc::new(AtomicBool::new(true));
        (
            Self {
                gate: Some(Arc::clone(&gate)),
            },
            gate,
        )
    }

    /// A handle for a registration that never happened; cancelling is a no-op.
    pub fn inert() -> Self {
        Self { gate: None }
    }

    /// Stop delivery for this registration. Safe to call repeatedly.
    pub fn cancel(&mut self) {
        if let Some(gate) = self.gate.take() {
            gate.store(false, Ordering::SeqCst);
        }
    }

    /// `true` while the registration is live and uncancelled.
    pub fn is_active(&self) -> bool {
        self.gate
            .as_ref()
            .is_some_and(|gate| gate.load(Ordering::SeqCst))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
