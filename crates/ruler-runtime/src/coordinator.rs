//! The ruler update coordinator.
//!
//! [`RulerSync`] owns the whole behavior: it tracks which workspace folder
//! the active document belongs to, keeps a style-file watch bound to that
//! folder, and reconciles the editor's ruler list against the
//! `.clang-format` file on every relevant notification. Disposal removes
//! the entry it added.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use ruler_core::ruler::{remove_first_managed, RulerEntry, RulerItem};
use ruler_core::style::{StyleConfig, STYLE_FILE_NAME};
use ruler_core::Result;
use ruler_settings::{SettingsStore, RULERS_KEY, SETTINGS_NAMESPACE};

use crate::events::{HostEvent, SettingsChange, StyleFileEvent, Subscription};
use crate::watch::{StyleFileWatch, WatchFactory};

// ── Free helpers ──────────────────────────────────────────────────────────────

/// The workspace folder containing `document`, if any.
///
/// When folders nest, the longest (most specific) containing folder wins.
pub fn resolve_workspace_folder<'a>(folders: &'a [PathBuf], document: &Path) -> Option<&'a Path> {
    folders
        .iter()
        .filter(|folder| document.starts_with(folder))
        .max_by_key(|folder| folder.components().count())
        .map(PathBuf::as_path)
}

/// Remove the tagged ruler entry from the store, if present.
///
/// Needs only a store reference, so shutdown paths can run it without a
/// live coordinator. Idempotent: when no tagged entry exists nothing is
/// written. Returns `true` when an entry was removed.
pub fn remove_managed_ruler(store: &dyn SettingsStore) -> Result<bool> {
    let mut rulers = store.rulers()?;
    if !remove_first_managed(&mut rulers) {
        return Ok(false);
    }
    store.set_rulers(&rulers)?;
    Ok(true)
}

// ── RulerSync ─────────────────────────────────────────────────────────────────

/// Coordinates the editor's ruler list with the tracked workspace's
/// `.clang-format` file.
///
/// All handlers run to completion on one task; the only shared mutable
/// resource is the settings store, which has exactly one writer (this
/// coordinator).
pub struct RulerSync {
    /// Injected settings access.
    store: Arc<dyn SettingsStore>,
    /// Creates style-file watches for whichever folder is tracked.
    watches: Box<dyn WatchFactory>,
    /// Folders the host treats as workspace roots.
    folders: Vec<PathBuf>,
    /// Sender handed to newly created watches.
    events: UnboundedSender<HostEvent>,
    /// Folder the active document belongs to; `None` when the document is
    /// outside every workspace folder or no document is open.
    tracked: Option<PathBuf>,
    /// Registration for active-document notifications.
    doc_events: Subscription,
    /// Registration for settings-change notifications.
    settings_events: Subscription,
    /// Watch bound 1:1 to the tracked folder.
    style_watch: Option<StyleFileWatch>,
}

impl RulerSync {
    pub fn new(
        store: Arc<dyn SettingsStore>,
        watches: Box<dyn WatchFactory>,
        folders: Vec<PathBuf>,
        events: UnboundedSender<HostEvent>,
        doc_events: Subscription,
        settings_events: Subscription,
    ) -> Self {
        Self {
            store,
            watches,
            folders,
            events,
            tracked: None,
            doc_events,
            settings_events,
            style_watch: None,
        }
    }

    /// Folder currently being tracked, if any.
    pub fn tracked_folder(&self) -> Option<&Path> {
        self.tracked.as_deref()
    }

    // ── Event handlers ────────────────────────────────────────────────────

    /// React to the active document switching.
    ///
    /// A switch within the tracked folder is a no-op so watch churn stays
    /// bounded by folder changes, not document changes. An actual folder
    /// change tears down the old watch, and — when the new folder is a
    /// workspace folder — establishes a new one and reconciles.
    pub fn handle_document_activated(&mut self, document: Option<&Path>) -> Result<()> {
        let Some(document) = document else {
            return Ok(());
        };

        let folder = resolve_workspace_folder(&self.folders, document).map(Path::to_path_buf);
        if folder == self.tracked {
            return Ok(());
        }

        tracing::debug!(
            from = ?self.tracked,
            to = ?folder,
            "tracked workspace folder changed"
        );
        self.tracked = folder;

        if let Some(mut watch) = self.style_watch.take() {
            watch.cancel();
        }
        let Some(folder) = self.tracked.clone() else {
            return Ok(());
        };

        self.style_watch = Some(self.watches.watch_style_file(&folder, self.events.clone())?);
        self.reconcile()
    }

    /// React to a settings change; only the ruler list and this tool's own
    /// namespace are relevant.
    pub fn handle_settings_changed(&mut self, change: &SettingsChange) -> Result<()> {
        if !change.affects(RULERS_KEY) && !change.affects(SETTINGS_NAMESPACE) {
            return Ok(());
        }
        self.reconcile()
    }

    /// React to the watched style file being created, changed, or deleted.
    pub fn handle_style_file_event(&mut self, event: StyleFileEvent) -> Result<()> {
        tracing::debug!(?event, "style file event");
        self.reconcile()
    }

    // ── Reconciliation ────────────────────────────────────────────────────

    /// Bring the ruler list in line with the tracked folder's style file.
    ///
    /// The style file is parsed fresh on every call. Writes only happen
    /// when the list actually needs to change, so reconciliation is
    /// idempotent and self-inflicted change events settle immediately.
    pub fn reconcile(&mut self) -> Result<()> {
        let Some(folder) = &self.tracked else {
            return Ok(());
        };
        let style_path = folder.join(STYLE_FILE_NAME);

        if !style_path.exists() {
            if remove_managed_ruler(self.store.as_ref())? {
                tracing::info!("style file absent; removed ruler entry");
            }
            return Ok(());
        }

        let config = StyleConfig::load(&style_path)?;
        let column = config.effective_column_limit();
        // An empty color string means "no color override".
        let color = self.store.ruler_color()?.filter(|color| !color.is_empty());

        let mut rulers = self.store.rulers()?;

        // Only the first tagged entry is considered; untagged entries are
        // never touched.
        if let Some(index) = rulers.iter().position(RulerItem::is_managed) {
            if let RulerItem::Entry(entry) = &mut rulers[index] {
                if entry.column == Some(column) && entry.color == color {
                    return Ok(());
                }
                entry.column = Some(column);
                entry.color = color;
                tracing::info!(column, "ruler entry updated");
                self.store.set_rulers(&rulers)?;
            }
            return Ok(());
        }

        rulers.push(RulerItem::Entry(RulerEntry::managed(column, color)));
        tracing::info!(column, "ruler entry added");
        self.store.set_rulers(&rulers)
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Cancel every registration and remove the entry this coordinator
    /// added. Safe to call more than once.
    pub fn dispose(&mut self) {
        self.doc_events.cancel();
        self.settings_events.cancel();
        if let Some(mut watch) = self.style_watch.take() {
            watch.cancel();
        }

        match remove_managed_ruler(self.store.as_ref()) {
            Ok(true) => tracing::info!("removed ruler entry on shutdown"),
            Ok(false) => {}
            Err(e) => tracing::warn!(error = %e, "failed to remove ruler entry on shutdown"),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
