use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, Utc};
use serde::Deserialize;
use serde::de;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::io::lock::{FileLock, LockError};
use crate::model::config::CorruptPolicy;
use crate::model::task::{DEFAULT_PRIORITY, Task, TaskStatus};

/// Error type for task file operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: io::Error,
    },
    #[error("corrupt task file {path}: {source}")]
    CorruptData {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("could not serialize tasks: {0}")]
    SerializeError(#[source] serde_json::Error),
    #[error(transparent)]
    Lock(#[from] LockError),
}

/// The durable home of the task list: one JSON file.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
    on_corrupt: CorruptPolicy,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>, on_corrupt: CorruptPolicy) -> Self {
        TaskStore {
            path: path.into(),
            on_corrupt,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the persisted tasks.
    ///
    /// A missing file is an empty list. An unparsable file either fails with
    /// [`StoreError::CorruptData`] or, under [`CorruptPolicy::Reset`], is
    /// copied to `<file>.corrupt` and replaced by an empty list.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no task file yet");
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(StoreError::ReadError {
                    path: self.path.clone(),
                    source: e,
                });
            }
        };

        match parse_tasks(&content, Utc::now()) {
            Ok(tasks) => {
                debug!(count = tasks.len(), path = %self.path.display(), "loaded tasks");
                Ok(tasks)
            }
            Err(source) => match self.on_corrupt {
                CorruptPolicy::Fail => Err(StoreError::CorruptData {
                    path: self.path.clone(),
                    source,
                }),
                CorruptPolicy::Reset => {
                    warn!(path = %self.path.display(), error = %source, "task file is corrupt, starting empty");
                    self.set_aside(&content);
                    Ok(Vec::new())
                }
            },
        }
    }

    /// Replace the task file with `tasks` (temp file + rename, under the
    /// directory lock).
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let dir = self.dir();
        fs::create_dir_all(dir).map_err(|e| StoreError::WriteError {
            path: dir.to_path_buf(),
            source: e,
        })?;
        let _lock = FileLock::acquire_default(dir)?;

        let mut content = serde_json::to_string_pretty(tasks).map_err(StoreError::SerializeError)?;
        content.push('\n');
        atomic_write(&self.path, content.as_bytes()).map_err(|e| StoreError::WriteError {
            path: self.path.clone(),
            source: e,
        })?;
        debug!(count = tasks.len(), path = %self.path.display(), "saved tasks");
        Ok(())
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        }
    }

    /// Keep a copy of unreadable content next to the task file so the next
    /// save does not destroy it.
    fn set_aside(&self, content: &str) {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".corrupt");
        let backup = PathBuf::from(name);
        match atomic_write(&backup, content.as_bytes()) {
            Ok(()) => info!(backup = %backup.display(), "kept a copy of the corrupt task file"),
            Err(e) => warn!(backup = %backup.display(), error = %e, "could not back up corrupt task file"),
        }
    }
}

/// Next free id: one past the largest id in the list, or 1 when empty.
/// `None` once the largest id is `u64::MAX`.
///
/// Always computed from the list itself; there is no separate counter.
pub fn next_id(tasks: &[Task]) -> Option<u64> {
    match tasks.iter().map(|t| t.id).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing and migration
// ---------------------------------------------------------------------------

/// On-disk shape, lenient enough to read files written by older versions.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTask {
    #[serde(default)]
    id: Option<u64>,
    #[serde(default, alias = "text")]
    name: String,
    #[serde(default)]
    priority: Option<String>,
    #[serde(default)]
    status: Option<String>,
    /// Legacy completion flag, only consulted when `status` is absent
    #[serde(default)]
    done: Option<bool>,
    #[serde(default, alias = "created_at")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "completed_at")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "deleted_at")]
    deleted_at: Option<DateTime<Utc>>,
}

/// Parse task file content, filling in anything older files lack.
///
/// `now` stands in for missing timestamps.
pub fn parse_tasks(content: &str, now: DateTime<Utc>) -> Result<Vec<Task>, serde_json::Error> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let stored: Vec<StoredTask> = serde_json::from_str(content)?;

    // Ids: keep the first holder of each id, then hand out fresh ids in file
    // order to records without one (or with a duplicate).
    let mut seen = HashSet::new();
    let mut max_id = stored.iter().filter_map(|s| s.id).max().unwrap_or(0);
    let mut tasks = Vec::with_capacity(stored.len());
    for s in stored {
        let id = match s.id {
            Some(id) if id > 0 && seen.insert(id) => id,
            other => {
                max_id = max_id
                    .checked_add(1)
                    .ok_or_else(|| {
                        <serde_json::Error as de::Error>::custom("no free id for a task without one")
                    })?;
                seen.insert(max_id);
                if let Some(old) = other {
                    warn!(old, new = max_id, "reassigned duplicate or zero task id");
                }
                max_id
            }
        };
        tasks.push(migrate(id, s, now));
    }
    Ok(tasks)
}

fn migrate(id: u64, s: StoredTask, now: DateTime<Utc>) -> Task {
    let status = s
        .status
        .as_deref()
        .and_then(TaskStatus::parse_status)
        .unwrap_or(if s.done.unwrap_or(false) {
            TaskStatus::Done
        } else {
            TaskStatus::Active
        });

    let priority = match s.priority {
        Some(p) if !p.trim().is_empty() => p,
        _ => DEFAULT_PRIORITY.to_string(),
    };

    // Zero timestamps from older writers count as missing
    let created_at = s.created_at.filter(|t| t.year() > 1).unwrap_or(now);

    let (completed_at, deleted_at) = match status {
        TaskStatus::Active => (None, None),
        TaskStatus::Done => (Some(s.completed_at.unwrap_or(now)), None),
        TaskStatus::Deleted => (None, Some(s.deleted_at.unwrap_or(now))),
    };

    Task {
        id,
        name: s.name,
        priority,
        status,
        created_at,
        completed_at,
        deleted_at,
    }
}
