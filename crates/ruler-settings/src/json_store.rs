//! File-backed settings store over a `.vscode/settings.json`-shaped file.
//!
//! The file is a single JSON object with flat dotted keys
//! (`"editor.rulers"`, `"clangRuler.color"`, ...). Reads tolerate a missing
//! file; writes re-read the object, replace only the ruler key, and rename a
//! temp file into place so unrelated keys and concurrent readers never see a
//! torn document.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use ruler_core::ruler::RulerItem;
use ruler_core::{Result, RulerError};

use crate::store::{SettingsStore, COLOR_KEY, RULERS_KEY};

// ── JsonSettingsStore ─────────────────────────────────────────────────────────

/// [`SettingsStore`] persisted as a flat-keyed JSON object file.
pub struct JsonSettingsStore {
    path: PathBuf,
}

impl JsonSettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the underlying settings file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole settings object; a missing file is an empty object.
    pub fn snapshot(&self) -> Result<Map<String, Value>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(source) => {
                return Err(RulerError::FileRead {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value: Value = serde_json::from_str(&text)?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(RulerError::InvalidSetting {
                key: self.path.display().to_string(),
                reason: "settings root must be a JSON object".to_string(),
            }),
        }
    }

    fn write_snapshot(&self, map: &Map<String, Value>) -> Result<()> {
        let json = serde_json::to_string_pretty(map)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| RulerError::SettingsWrite {
                path: self.path.clone(),
                source,
            })?;
        }

        // Write to a temp file then rename for atomicity.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &json).map_err(|source| RulerError::SettingsWrite {
            path: self.path.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| RulerError::SettingsWrite {
            path: self.path.clone(),
            source,
        })?;

        Ok(())
    }
}

impl SettingsStore for JsonSettingsStore {
    fn rulers(&self) -> Result<Vec<RulerItem>> {
        let map = self.snapshot()?;
        match map.get(RULERS_KEY) {
            Some(value) => Ok(serde_json::from_value(value.clone())?),
            None => Ok(Vec::new()),
        }
    }

    fn set_rulers(&self, rulers: &[RulerItem]) -> Result<()> {
        let mut map = self.snapshot()?;
        map.insert(RULERS_KEY.to_string(), serde_json::to_value(rulers)?);
        self.write_snapshot(&map)?;
        tracing::debug!(count = rulers.len(), "ruler list persisted");
        Ok(())
    }

    fn ruler_color(&self) -> Result<Option<String>> {
        let map = self.snapshot()?;
        Ok(map
            .get(COLOR_KEY)
            .and_then(Value::as_str)
            .map(str::to_string))
    }
}

// ── Snapshot diffing ──────────────────────────────────────────────────────────

/// Top-level keys whose values differ between two settings snapshots.
///
/// Keys present in only one snapshot count as changed. Order follows the
/// new snapshot, with removed keys appended.
pub fn changed_keys(old: &Map<String, Value>, new: &Map<String, Value>) -> Vec<String> {
    let mut keys: Vec<String> = new
        .iter()
        .filter(|(key, value)| old.get(key.as_str()) != Some(value))
        .map(|(key, _)| key.clone())
        .collect();

    keys.extend(
        old.keys()
            .filter(|key| !new.contains_key(*key))
            .cloned(),
    );

    keys
}

// ── Tests ─────────────────────────────────────────────────────────────────────
