use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the ruler synchronizer.
#[derive(Error, Debug)]
pub enum RulerError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file could not be written back.
    #[error("Failed to write settings file {path}: {source}")]
    SettingsWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed or serialized.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A settings value does not have the expected shape.
    #[error("Invalid settings value for {key}: {reason}")]
    InvalidSetting { key: String, reason: String },

    /// A filesystem watch could not be registered or torn down.
    #[error("File watch error: {0}")]
    Watch(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the ruler crates.
pub type Result<T> = std::result::Result<T, RulerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_file_read() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = RulerError::FileRead {
            path: PathBuf::from("/proj/.clang-format"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to read file"));
        assert!(msg.contains("/proj/.clang-format"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_error_display_settings_write() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = RulerError::SettingsWrite {
            path: PathBuf::from("/proj/.vscode/settings.json"),
            source: io_err,
        };
        let msg = err.to_string();
        assert!(msg.contains("Failed to write settings file"));
        assert!(msg.contains("settings.json"));
    }

    #[test]
    fn test_error_display_invalid_setting() {
        let err = RulerError::InvalidSetting {
            key: "editor.rulers".to_string(),
            reason: "expected an array".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid settings value for editor.rulers: expected an array"
        );
    }

    #[test]
    fn test_error_display_watch() {
        let err = RulerError::Watch("inotify limit reached".to_string());
        assert_eq!(err.to_string(), "File watch error: inotify limit reached");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: RulerError = io_err.into();
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{invalid}").unwrap_err();
        let err: RulerError = json_err.into();
        assert!(err.to_string().contains("Failed to parse JSON"));
    }
}
