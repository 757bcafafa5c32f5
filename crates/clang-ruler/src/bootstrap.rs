use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive;
/// `debug` forces the `debug` level regardless. Falls back to `"info"` if
/// the level string is not recognised.
pub fn setup_logging(log_level: &str, debug: bool) -> anyhow::Result<()> {
    let level = if debug { "debug" } else { log_level };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Path resolution ────────────────────────────────────────────────────────────

/// Resolve the workspace folder argument to an existing, canonical directory.
///
/// Canonicalization matters because document paths are resolved against the
/// folder by prefix; a relative `.` would never contain an absolute
/// document path.
pub fn resolve_workspace(path: &Path) -> anyhow::Result<PathBuf> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("workspace folder {} does not exist", path.display()))?;
    if !canonical.is_dir() {
        anyhow::bail!("workspace folder {} is not a directory", canonical.display());
    }
    Ok(canonical)
}

/// The settings file to reconcile: an explicit override, or the workspace's
/// `.vscode/settings.json`.
pub fn settings_file_path(workspace: &Path, explicit: Option<&Path>) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => workspace.join(".vscode").join("settings.json"),
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
