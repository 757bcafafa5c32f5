use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Keep the editor's column ruler in sync with a workspace's .clang-format
#[derive(Parser, Debug, Clone)]
#[command(
    name = "clang-ruler",
    about = "Sync the editor's column-ruler guide with .clang-format",
    version
)]
pub struct Settings {
    /// Workspace folder to track
    #[arg(default_value = ".")]
    pub workspace: PathBuf,

    /// Settings file to reconcile (default: <workspace>/.vscode/settings.json)
    #[arg(long)]
    pub settings_file: Option<PathBuf>,

    /// Reconcile once and exit instead of watching
    #[arg(long)]
    pub once: bool,

    /// Logging level
    #[arg(long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

// ── Tests ──────────────────────────────────────────────────────────────────────
