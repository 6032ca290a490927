use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SnapError};

/// Name of the optional config file inside the store.
pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Message written to the record when `save` gets none.
    pub default_message: String,
    /// Record messages are cut to this many bytes.
    pub max_message_len: usize,
    /// Program invoked as `<program> -r -x .snap <snapshot> .`.
    pub diff_program: String,
    /// Maximum number of diff lines printed.
    pub diff_max_lines: usize,
    /// Hold `.snap/.lock` for the duration of save and restore.
    pub lock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_message: "no message".to_string(),
            max_message_len: 255,
            diff_program: "diff".to_string(),
            diff_max_lines: 20,
            lock: false,
        }
    }
}

impl Config {
    /// Reads `<store>/config.toml`. A missing file (or missing store) yields defaults.
    pub fn load(store_dir: &Path) -> Result<Self> {
        let path = store_dir.join(CONFIG_FILE);
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(e) => return Err(e.into()),
        };

        toml::from_str(&content).map_err(|e| SnapError::Config {
            path,
            reason: e.message().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(&dir.path().join(".snap")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "diff_max_lines = 5\nlock = true\n").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.diff_max_lines, 5);
        assert!(config.lock);
        assert_eq!(config.default_message, "no message");
        assert_eq!(config.max_message_len, 255);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "colour = \"blue\"\n").unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(matches!(err, SnapError::Config { .. }));
    }
}
