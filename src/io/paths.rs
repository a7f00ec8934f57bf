use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Subdirectory of the platform data directory owned by this tool
pub const APP_DIR: &str = "taskline";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "TASKLINE_DATA_DIR";

/// Error type for data-directory resolution
#[derive(Debug, thiserror::Error)]
pub enum PathError {
    #[error("could not determine a data directory; pass --data-dir or set {DATA_DIR_ENV}")]
    NoDataDir,
    #[error("could not create {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Resolve the data directory and create it if absent.
///
/// Precedence: explicit override > `$TASKLINE_DATA_DIR` > platform data dir
/// (`$XDG_DATA_HOME` on Linux) > `~/.local/share`.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf, PathError> {
    let dir = pick_data_dir(
        override_dir,
        std::env::var_os(DATA_DIR_ENV),
        dirs::data_dir(),
        dirs::home_dir(),
    )
    .ok_or(PathError::NoDataDir)?;
    fs::create_dir_all(&dir).map_err(|e| PathError::CreateError {
        path: dir.clone(),
        source: e,
    })?;
    Ok(dir)
}

fn pick_data_dir(
    override_dir: Option<&Path>,
    env_dir: Option<OsString>,
    platform_data: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Option<PathBuf> {
    if let Some(dir) = override_dir {
        return Some(dir.to_path_buf());
    }
    if let Some(dir) = env_dir.filter(|d| !d.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    if let Some(base) = platform_data {
        return Some(base.join(APP_DIR));
    }
    home.map(|h| h.join(".local").join("share").join(APP_DIR))
}

/// Path of the task file: CLI override, else the configured file resolved
/// against the data directory.
pub fn task_file_path(data_dir: &Path, config: &Config, override_file: Option<&Path>) -> PathBuf {
    let file = override_file.unwrap_or(&config.storage.file);
    if file.is_absolute() {
        file.to_path_buf()
    } else {
        data_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn override_wins() {
        let dir = pick_data_dir(
            Some(Path::new("/tmp/explicit")),
            Some(OsString::from("/tmp/env")),
            Some(PathBuf::from("/data")),
            None,
        );
        assert_eq!(dir, Some(PathBuf::from("/tmp/explicit")));
    }

    #[test]
    fn env_before_platform_dir() {
        let dir = pick_data_dir(
            None,
            Some(OsString::from("/tmp/env")),
            Some(PathBuf::from("/data")),
            None,
        );
        assert_eq!(dir, Some(PathBuf::from("/tmp/env")));
    }

    #[test]
    fn empty_env_is_ignored() {
        let dir = pick_data_dir(None, Some(OsString::new()), Some(PathBuf::from("/data")), None);
        assert_eq!(dir, Some(PathBuf::from("/data/taskline")));
    }

    #[test]
    fn home_fallback() {
        let dir = pick_data_dir(None, None, None, Some(PathBuf::from("/home/u")));
        assert_eq!(dir, Some(PathBuf::from("/home/u/.local/share/taskline")));
        assert_eq!(pick_data_dir(None, None, None, None), None);
    }

    #[test]
    fn resolve_creates_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("nested").join("taskline");
        let dir = resolve_data_dir(Some(&target)).unwrap();
        assert_eq!(dir, target);
        assert!(target.is_dir());
    }

    #[test]
    fn task_file_relative_and_absolute() {
        let config = Config::default();
        let data = Path::new("/data/taskline");
        assert_eq!(
            task_file_path(data, &config, None),
            PathBuf::from("/data/taskline/tasks.json")
        );
        assert_eq!(
            task_file_path(data, &config, Some(Path::new("/elsewhere/t.json"))),
            PathBuf::from("/elsewhere/t.json")
        );
    }
}
