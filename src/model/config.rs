use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

/// What to do when the task file cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptPolicy {
    /// Set the unreadable file aside and start with an empty list
    #[default]
    Reset,
    /// Refuse to start
    Fail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Task file, relative to the data directory unless absolute
    #[serde(default = "default_file")]
    pub file: PathBuf,
    #[serde(default)]
    pub on_corrupt: CorruptPolicy,
    /// Drop done tasks when the session quits
    #[serde(default)]
    pub purge_done_on_exit: bool,
    /// Save after every mutating key or command
    #[serde(default = "default_true")]
    pub autosave: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            file: default_file(),
            on_corrupt: CorruptPolicy::Reset,
            purge_done_on_exit: false,
            autosave: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Blink period of the command/edit cursor, in milliseconds
    #[serde(default = "default_blink_ms")]
    pub blink_ms: u64,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Theme overrides: slot name -> "#RRGGBB"
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            blink_ms: default_blink_ms(),
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

fn default_file() -> PathBuf {
    PathBuf::from("tasks.json")
}

fn default_true() -> bool {
    true
}

fn default_blink_ms() -> u64 {
    500
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.storage.file, PathBuf::from("tasks.json"));
        assert!(config.storage.autosave);
        assert_eq!(config.ui.blink_ms, 500);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: Config = toml::from_str(
            r#"
[storage]
on_corrupt = "fail"
purge_done_on_exit = true
"#,
        )
        .unwrap();
        assert_eq!(config.storage.on_corrupt, CorruptPolicy::Fail);
        assert!(config.storage.purge_done_on_exit);
        assert_eq!(config.storage.file, PathBuf::from("tasks.json"));
        assert!(config.ui.show_key_hints);
    }

    #[test]
    fn color_overrides_parse() {
        let config: Config =
            toml::from_str("[ui]\nblink_ms = 300\n\n[ui.colors]\nhighlight = \"#112233\"\n")
                .unwrap();
        assert_eq!(config.ui.blink_ms, 300);
        assert_eq!(
            config.ui.colors.get("highlight").map(String::as_str),
            Some("#112233")
        );
    }

    #[test]
    fn unknown_policy_is_rejected() {
        let result: Result<Config, _> = toml::from_str("[storage]\non_corrupt = \"panic\"\n");
        assert!(result.is_err());
    }
}
