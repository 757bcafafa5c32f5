//! Filesystem watches feeding the coordinator's event channel.
//!
//! A style-file watch observes a single `.clang-format` path inside one
//! workspace folder. The production implementation watches the folder
//! non-recursively with `notify` and filters to the style file; `notify`
//! callbacks run on their own thread and only enqueue events, so all
//! handling still happens in arrival order on the event-loop task.

use std::any::Any;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::sync::atomic::Ordering;

use notify::{EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc::UnboundedSender;

use ruler_core::style::STYLE_FILE_NAME;
use ruler_core::{Result, RulerError};
use ruler_settings::json_store::changed_keys;
use ruler_settings::JsonSettingsStore;

use crate::events::{HostEvent, SettingsChange, StyleFileEvent, Subscription};

// ── StyleFileWatch ────────────────────────────────────────────────────────────

/// A live watch on one workspace folder's style file.
///
/// Holds the underlying watcher plus one subscription per event kind;
/// cancelling a subscription gates that kind off, cancelling the watch
/// releases everything.
pub struct StyleFileWatch {
    on_create: Subscription,
    on_change: Subscription,
    on_delete: Subscription,
    watcher: Option<Box<dyn Any + Send>>,
}

impl StyleFileWatch {
    pub fn new(
        on_create: Subscription,
        on_change: Subscription,
        on_delete: Subscription,
        watcher: Option<Box<dyn Any + Send>>,
    ) -> Self {
        Self {
            on_create,
            on_change,
            on_delete,
            watcher,
        }
    }

    /// A watch that never fires, for single-shot runs and tests.
    pub fn inert() -> Self {
        Self::new(
            Subscription::inert(),
            Subscription::inert(),
            Subscription::inert(),
            None,
        )
    }

    /// Cancel the three event subscriptions and release the watcher.
    pub fn cancel(&mut self) {
        self.on_create.cancel();
        self.on_change.cancel();
        self.on_delete.cancel();
        self.watcher = None;
    }
}

impl Drop for StyleFileWatch {
    fn drop(&mut self) {
        self.cancel();
    }
}

// ── WatchFactory ──────────────────────────────────────────────────────────────

/// Creates style-file watches for the coordinator.
///
/// Injected so tests can observe watch churn without touching the
/// filesystem.
pub trait WatchFactory: Send {
    /// Watch `<folder>/.clang-format` for create/change/delete, delivering
    /// through `events`.
    fn watch_style_file(
        &mut self,
        folder: &Path,
        events: UnboundedSender<HostEvent>,
    ) -> Result<StyleFileWatch>;
}

/// Factory producing inert watches; used by single-shot reconciliation.
pub struct NullWatchFactory;

impl WatchFactory for NullWatchFactory {
    fn watch_style_file(
        &mut self,
        _folder: &Path,
        _events: UnboundedSender<HostEvent>,
    ) -> Result<StyleFileWatch> {
        Ok(StyleFileWatch::inert())
    }
}

// ── NotifyWatchFactory ────────────────────────────────────────────────────────

/// Production [`WatchFactory`] backed by the `notify` crate.
///
/// Watches the folder rather than the file itself so a style file created
/// after the watch begins is still observed.
pub struct NotifyWatchFactory;

impl WatchFactory for NotifyWatchFactory {
    fn watch_style_file(
        &mut self,
        folder: &Path,
        events: UnboundedSender<HostEvent>,
    ) -> Result<StyleFileWatch> {
        let (on_create, create_gate) = Subscription::pair();
        let (on_change, change_gate) = Subscription::pair();
        let (on_delete, delete_gate) = Subscription::pair();

        let mut watcher = notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
            let event = match result {
                Ok(event) => event,
                Err(e) => {
                    tracing::warn!(error = %e, "style file watch error");
                    return;
                }
            };

            let is_style_file = event
                .paths
                .iter()
                .any(|path| path.file_name() == Some(OsStr::new(STYLE_FILE_NAME)));
            if !is_style_file {
                return;
            }

            let (gate, file_event) = match event.kind {
                EventKind::Create(_) => (&create_gate, StyleFileEvent::Created),
                EventKind::Modify(_) => (&change_gate, StyleFileEvent::Changed),
                EventKind::Remove(_) => (&delete_gate, StyleFileEvent::Deleted),
                _ => return,
            };
            if !gate.load(Ordering::SeqCst) {
                return;
            }

            let _ = events.send(HostEvent::StyleFile(file_event));
        })
        .map_err(|e| RulerError::Watch(e.to_string()))?;

        watcher
            .watch(folder, RecursiveMode::NonRecursive)
            .map_err(|e| RulerError::Watch(e.to_string()))?;
        tracing::debug!(folder = %folder.display(), "watching style file");

        Ok(StyleFileWatch::new(
            on_create,
            on_change,
            on_delete,
            Some(Box::new(watcher)),
        ))
    }
}

// ── Settings-file watch ───────────────────────────────────────────────────────

/// Guard keeping a settings-file watch alive; dropping it stops the watch.
pub struct SettingsFileWatch {
    _watcher: Box<dyn Any + Send>,
}

/// Watch the settings file for external edits, emitting
/// [`HostEvent::SettingsChanged`] with the top-level keys whose values
/// actually differ.
///
/// The file's directory is created if absent (a fresh workspace has no
/// `.vscode/` yet) and is what the watcher observes, so the first write of
/// the settings file is seen too. The previous snapshot lives inside the
/// callback; self-inflicted writes produce a change event like any other and
/// reconcile to a no-op.
pub fn watch_settings_file(
    path: &Path,
    events: UnboundedSender<HostEvent>,
) -> Result<SettingsFileWatch> {
    let dir = path
        .parent()
        .ok_or_else(|| RulerError::Watch("settings path has no parent directory".to_string()))?
        .to_path_buf();
    fs::create_dir_all(&dir)?;

    let file_name = path
        .file_name()
        .ok_or_else(|| RulerError::Watch("settings path has no file name".to_string()))?
        .to_os_string();

    let store = JsonSettingsStore::new(path);
    let mut last = store.snapshot()?;

    let mut watcher = notify::recommended_watcher(move |result: notify::Result<notify::Event>| {
        let event = match result {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "settings file watch error");
                return;
            }
        };

        if !matches!(
            event.kind,
            EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
        ) {
            return;
        }
        let is_settings_file = event
            .paths
            .iter()
            .any(|path| path.file_name() == Some(file_name.as_os_str()));
        if !is_settings_file {
            return;
        }

        let current = match store.snapshot() {
            Ok(map) => map,
            Err(e) => {
                // Mid-write reads can see a torn document; the next event
                // will deliver the settled state.
                tracing::debug!(error = %e, "settings snapshot unreadable; skipping");
                return;
            }
        };

        let keys = changed_keys(&last, &current);
        last = current;
        if keys.is_empty() {
            return;
        }

        tracing::debug!(?keys, "settings changed");
        let _ = events.send(HostEvent::SettingsChanged(SettingsChange::new(keys)));
    })
    .map_err(|e| RulerError::Watch(e.to_string()))?;

    watcher
        .watch(&dir, RecursiveMode::NonRecursive)
        .map_err(|e| RulerError::Watch(e.to_string()))?;

    Ok(SettingsFileWatch {
        _watcher: Box::new(watcher),
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
