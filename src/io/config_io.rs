use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::model::config::Config;

/// Name of the config file inside the data directory
pub const CONFIG_FILE: &str = "config.toml";

/// Error type for config reading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Read `config.toml` from the data directory. A missing file yields the
/// defaults.
pub fn read_config(data_dir: &Path) -> Result<Config, ConfigError> {
    let path = data_dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::ReadError { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}

/// Like [`read_config`], but a broken config only costs a warning.
pub fn load_config(data_dir: &Path) -> Config {
    read_config(data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "ignoring config, using defaults");
        Config::default()
    })
}
