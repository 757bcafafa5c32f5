//! Event loop driving a [`RulerSync`].
//!
//! [`RulerHost`] owns the event channel and the coordinator, dispatching
//! [`HostEvent`]s strictly in arrival order on a single task. Watch
//! callbacks and signal handlers only enqueue; no reconciliation ever
//! overlaps another.

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedSender};

use ruler_core::Result;
use ruler_settings::SettingsStore;

use crate::coordinator::RulerSync;
use crate::events::{Gate, HostEvent, Subscription};
use crate::watch::WatchFactory;

// ── RulerHost ─────────────────────────────────────────────────────────────────

/// Owns the coordinator and the channel feeding it.
///
/// Construction registers the coordinator for document and settings
/// notifications and queues the initial activation, so the startup
/// reconciliation pass is the first event processed by [`RulerHost::run`].
pub struct RulerHost {
    events_tx: UnboundedSender<HostEvent>,
    events_rx: mpsc::UnboundedReceiver<HostEvent>,
    doc_gate: Gate,
    settings_gate: Gate,
    sync: RulerSync,
}

impl RulerHost {
    /// Build the host around a coordinator.
    ///
    /// # Parameters
    /// - `store`           – injected settings access.
    /// - `watches`         – style-file watch factory.
    /// - `folders`         – workspace folders documents resolve against.
    /// - `active_document` – document considered active at startup, if any.
    pub fn new(
        store: Arc<dyn SettingsStore>,
        watches: Box<dyn WatchFactory>,
        folders: Vec<PathBuf>,
        active_document: Option<PathBuf>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (doc_sub, doc_gate) = Subscription::pair();
        let (settings_sub, settings_gate) = Subscription::pair();

        let sync = RulerSync::new(
            store,
            watches,
            folders,
            events_tx.clone(),
            doc_sub,
            settings_sub,
        );

        // Queue the startup pass; the receiver has not been polled yet, so
        // this is guaranteed to be handled before any watch event.
        let _ = events_tx.send(HostEvent::DocumentActivated(active_document));

        Self {
            events_tx,
            events_rx,
            doc_gate,
            settings_gate,
            sync,
        }
    }

    /// A sender for feeding events into the loop (watches, signal handlers).
    pub fn sender(&self) -> UnboundedSender<HostEvent> {
        self.events_tx.clone()
    }

    /// Consume events until [`HostEvent::Shutdown`] arrives, then dispose
    /// the coordinator.
    ///
    /// Handler failures are logged and the loop keeps going; the next
    /// relevant event re-triggers reconciliation and self-corrects.
    pub async fn run(mut self) -> Result<()> {
        while let Some(event) = self.events_rx.recv().await {
            match event {
                HostEvent::DocumentActivated(document) => {
                    if !self.doc_gate.load(Ordering::SeqCst) {
                        continue;
                    }
                    if let Err(e) = self.sync.handle_document_activated(document.as_deref()) {
                        tracing::warn!(error = %e, "document activation handling failed");
                    }
                }
                HostEvent::SettingsChanged(change) => {
                    if !self.settings_gate.load(Ordering::SeqCst) {
                        continue;
                    }
                    if let Err(e) = self.sync.handle_settings_changed(&change) {
                        tracing::warn!(error = %e, "settings change handling failed");
                    }
                }
                HostEvent::StyleFile(event) => {
                    // Per-kind gating already happened at the watch.
                    if let Err(e) = self.sync.handle_style_file_event(event) {
                        tracing::warn!(error = %e, "style file event handling failed");
                    }
                }
                HostEvent::Shutdown => {
                    tracing::debug!("shutdown event received");
                    break;
                }
            }
        }

        self.sync.dispose();
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
