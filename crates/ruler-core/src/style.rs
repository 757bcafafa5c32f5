//! Line-oriented scan of a `.clang-format` file.
//!
//! Only two keys matter for the ruler: `BasedOnStyle:` and `ColumnLimit:`.
//! The scan is a literal prefix match over trimmed lines with no YAML
//! structure awareness; nested or list-valued config is not interpreted.

use std::fs;
use std::path::Path;

use crate::error::{Result, RulerError};

// ── Constants ─────────────────────────────────────────────────────────────────

/// File name of the style config inside a workspace folder.
pub const STYLE_FILE_NAME: &str = ".clang-format";

/// Column limit applied when neither an explicit limit nor a recognised base
/// style is present.
pub const DEFAULT_COLUMN_LIMIT: u32 = 80;

const BASED_ON_STYLE_KEY: &str = "BasedOnStyle:";
const COLUMN_LIMIT_KEY: &str = "ColumnLimit:";

// ── StyleConfig ───────────────────────────────────────────────────────────────

/// The two ruler-relevant fields of a `.clang-format` file.
///
/// Parsed fresh on every reconciliation, never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleConfig {
    /// Named base style, e.g. `"Google"`.
    pub based_on_style: Option<String>,
    /// Explicit column limit, when present and numeric.
    pub column_limit: Option<u32>,
}

impl StyleConfig {
    /// Scan `text` line by line for the two recognised keys.
    ///
    /// Lines are trimmed before matching; the remainder after a key is
    /// trimmed as well. When a key appears more than once the last
    /// occurrence wins — there is no early exit. A `ColumnLimit` remainder
    /// that does not parse as an integer clears any earlier value, so the
    /// base-style fallback applies.
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        for line in text.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix(BASED_ON_STYLE_KEY) {
                config.based_on_style = Some(rest.trim().to_string());
            } else if let Some(rest) = line.strip_prefix(COLUMN_LIMIT_KEY) {
                config.column_limit = rest.trim().parse().ok();
            }
        }
        config
    }

    /// Read `path` as UTF-8 text and parse it.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| RulerError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::parse(&text))
    }

    /// The column limit the ruler should sit at.
    ///
    /// An explicit `ColumnLimit` wins verbatim. Otherwise the named base
    /// style decides: `"Google"` → 100, `"Microsoft"` → 120, anything else
    /// (including no base style at all) → [`DEFAULT_COLUMN_LIMIT`].
    pub fn effective_column_limit(&self) -> u32 {
        if let Some(limit) = self.column_limit {
            return limit;
        }

        match self.based_on_style.as_deref() {
            Some("Google") => 100,
            Some("Microsoft") => 120,
            _ => DEFAULT_COLUMN_LIMIT,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_both_keys() {
        let config = StyleConfig::parse("BasedOnStyle: Google\nColumnLimit: 90\n");
        assert_eq!(config.based_on_style.as_deref(), Some("Google"));
        assert_eq!(config.column_limit, Some(90));
    }

    #[test]
    fn test_parse_trims_indentation_and_padding() {
        let config = StyleConfig::parse("   BasedOnStyle:   LLVM   \n\t ColumnLimit: 72 \n");
        assert_eq!(config.based_on_style.as_deref(), Some("LLVM"));
        assert_eq!(config.column_limit, Some(72));
    }

    #[test]
    fn test_parse_ignores_unrelated_lines() {
        let text = "Language: Cpp\nIndentWidth: 4\n# ColumnLimit: 999 in a comment\n";
        let config = StyleConfig::parse(text);
        assert!(config.based_on_style.is_none());
        assert!(config.column_limit.is_none());
    }

    #[test]
    fn test_parse_last_occurrence_wins() {
        let config = StyleConfig::parse("ColumnLimit: 90\nBasedOnStyle: LLVM\nColumnLimit: 110\n");
        assert_eq!(config.column_limit, Some(110));

        let config = StyleConfig::parse("BasedOnStyle: Google\nBasedOnStyle: Microsoft\n");
        assert_eq!(config.based_on_style.as_deref(), Some("Microsoft"));
    }

    #[test]
    fn test_parse_malformed_limit_clears_earlier_value() {
        // A later non-numeric value overwrites (clears) an earlier valid one,
        // matching the last-occurrence-wins rule.
        let config = StyleConfig::parse("ColumnLimit: 90\nColumnLimit: wide\n");
        assert!(config.column_limit.is_none());
        assert_eq!(config.effective_column_limit(), DEFAULT_COLUMN_LIMIT);
    }

    #[test]
    fn test_parse_empty_text() {
        assert_eq!(StyleConfig::parse(""), StyleConfig::default());
    }

    // ── load ──────────────────────────────────────────────────────────────

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let path = dir.path().join(STYLE_FILE_NAME);
        std::fs::write(&path, "BasedOnStyle: Microsoft\n").expect("write style file");

        let config = StyleConfig::load(&path).expect("load");
        assert_eq!(config.based_on_style.as_deref(), Some("Microsoft"));
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::TempDir::new().expect("tempdir");
        let err = StyleConfig::load(&dir.path().join(STYLE_FILE_NAME)).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    // ── effective_column_limit ────────────────────────────────────────────

    #[test]
    fn test_limit_explicit_wins_over_base_style() {
        let config = StyleConfig::parse("BasedOnStyle: Google\nColumnLimit: 42\n");
        assert_eq!(config.effective_column_limit(), 42);
    }

    #[test]
    fn test_limit_google() {
        let config = StyleConfig::parse("BasedOnStyle: Google\n");
        assert_eq!(config.effective_column_limit(), 100);
    }

    #[test]
    fn test_limit_microsoft() {
        let config = StyleConfig::parse("BasedOnStyle: Microsoft\n");
        assert_eq!(config.effective_column_limit(), 120);
    }

    #[test]
    fn test_limit_unknown_style_falls_back() {
        let config = StyleConfig::parse("BasedOnStyle: WebKit\n");
        assert_eq!(config.effective_column_limit(), DEFAULT_COLUMN_LIMIT);
    }

    #[test]
    fn test_limit_default_for_empty_config() {
        assert_eq!(
            StyleConfig::default().effective_column_limit(),
            DEFAULT_COLUMN_LIMIT
        );
    }
}
