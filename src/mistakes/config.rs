use crate::error::{Result, TrackerError};
use crate::validate::DEFAULT_MAX_INPUT_LEN;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_MAX_BACKUPS: usize = 20;
const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration for the tracker, stored as `config.json` beside the data file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Number of timestamped backups kept in the backup directory
    #[serde(default = "default_max_backups")]
    pub max_backups: usize,

    /// Maximum length of a single input field, in characters
    #[serde(default = "default_max_input_len")]
    pub max_input_len: usize,

    /// Records shown per page in the view screen
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Whether new records get an identifier, and whether old ones are backfilled
    #[serde(default = "default_assign_ids")]
    pub assign_ids: bool,
}

fn default_max_backups() -> usize {
    DEFAULT_MAX_BACKUPS
}

fn default_max_input_len() -> usize {
    DEFAULT_MAX_INPUT_LEN
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_assign_ids() -> bool {
    true
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_backups: DEFAULT_MAX_BACKUPS,
            max_input_len: DEFAULT_MAX_INPUT_LEN,
            page_size: DEFAULT_PAGE_SIZE,
            assign_ids: true,
        }
    }
}

impl TrackerConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TrackerError::Io)?;
        let config: TrackerConfig =
            serde_json::from_str(&content).map_err(TrackerError::Serialization)?;
        Ok(config.sanitized())
    }

    // A zero page size or input bound would make the shell unusable.
    fn sanitized(mut self) -> Self {
        if self.page_size == 0 {
            self.page_size = DEFAULT_PAGE_SIZE;
        }
        if self.max_input_len == 0 {
            self.max_input_len = DEFAULT_MAX_INPUT_LEN;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = TrackerConfig::default();
        assert_eq!(config.max_backups, 20);
        assert_eq!(config.max_input_len, 300);
        assert_eq!(config.page_size, 10);
        assert!(config.assign_ids);
    }

    #[test]
    fn test_load_missing_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = TrackerConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, TrackerConfig::default());
    }

    #[test]
    fn test_written_config_is_loaded() {
        let temp_dir = TempDir::new().unwrap();

        let config = TrackerConfig {
            max_backups: 5,
            ..TrackerConfig::default()
        };
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            serde_json::to_string_pretty(&config).unwrap(),
        )
        .unwrap();

        let loaded = TrackerConfig::load(temp_dir.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join(CONFIG_FILENAME),
            r#"{"assign_ids": false, "page_size": 0}"#,
        )
        .unwrap();

        let loaded = TrackerConfig::load(temp_dir.path()).unwrap();
        assert!(!loaded.assign_ids);
        assert_eq!(loaded.page_size, 10);
        assert_eq!(loaded.max_backups, 20);
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILENAME), "{ nope").unwrap();

        assert!(matches!(
            TrackerConfig::load(temp_dir.path()),
            Err(TrackerError::Serialization(_))
        ));
    }
}
