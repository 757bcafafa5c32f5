mod bootstrap;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use ruler_runtime::coordinator::{remove_managed_ruler, RulerSync};
use ruler_runtime::events::{HostEvent, Subscription};
use ruler_runtime::orchestrator::RulerHost;
use ruler_runtime::watch::{watch_settings_file, NotifyWatchFactory, NullWatchFactory};
use ruler_settings::JsonSettingsStore;
use settings::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(&settings.log_level, settings.debug)?;
    tracing::info!("clang-ruler v{} starting", env!("CARGO_PKG_VERSION"));

    let workspace = bootstrap::resolve_workspace(&settings.workspace)?;
    let settings_path =
        bootstrap::settings_file_path(&workspace, settings.settings_file.as_deref());
    tracing::info!(
        workspace = %workspace.display(),
        settings = %settings_path.display(),
        "tracking workspace"
    );

    let store = Arc::new(JsonSettingsStore::new(&settings_path));

    if settings.once {
        run_once(store, workspace)?;
        return Ok(());
    }

    // The workspace folder itself stands in for the active document at
    // startup; it resolves to that folder like any document inside it.
    let host = RulerHost::new(
        Arc::clone(&store) as Arc<dyn ruler_settings::SettingsStore>,
        Box::new(NotifyWatchFactory),
        vec![workspace.clone()],
        Some(workspace),
    );

    let _settings_watch = watch_settings_file(&settings_path, host.sender())?;

    let shutdown_tx = host.sender();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Ctrl+C received; shutting down");
            let _ = shutdown_tx.send(HostEvent::Shutdown);
        }
    });

    host.run().await?;

    // Best-effort final cleanup, independent of coordinator instance state.
    if let Err(e) = remove_managed_ruler(store.as_ref()) {
        tracing::warn!(error = %e, "final ruler cleanup failed");
    }

    Ok(())
}

/// Single-shot mode: one reconciliation pass, no watches, and the entry is
/// left in place for the editor to pick up.
fn run_once(store: Arc<JsonSettingsStore>, workspace: PathBuf) -> Result<()> {
    let (events_tx, _events_rx) = tokio::sync::mpsc::unbounded_channel();
    let mut sync = RulerSync::new(
        store,
        Box::new(NullWatchFactory),
        vec![workspace.clone()],
        events_tx,
        Subscription::inert(),
        Subscription::inert(),
    );
    sync.handle_document_activated(Some(&workspace))?;
    tracing::info!("single reconciliation pass complete");
    Ok(())
}
