use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{debug, warn};

/// Advisory lock held while the task file is being replaced.
///
/// Uses flock (Unix) on `<dir>/.lock` so two `tl` processes pointed at the
/// same data directory never interleave their saves.
pub struct FileLock {
    _file: File,
}

/// Error type for lock operations
#[derive(Debug, thiserror::Error)]
pub enum LockError {
    #[error("could not create lock file at {path}: {source}")]
    CreateError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not acquire lock on {path}: another tl process may be saving")]
    Timeout { path: PathBuf },
}

impl FileLock {
    /// Acquire the lock for `dir`, waiting up to `timeout`.
    pub fn acquire(dir: &Path, timeout: Duration) -> Result<Self, LockError> {
        let lock_path = dir.join(".lock");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| LockError::CreateError {
                path: lock_path.clone(),
                source: e,
            })?;

        let start = Instant::now();
        let mut contended = false;
        loop {
            match try_lock(&file) {
                Ok(()) => {
                    if contended {
                        debug!(waited = ?start.elapsed(), "save lock acquired");
                    }
                    return Ok(FileLock { _file: file });
                }
                Err(_) if start.elapsed() < timeout => {
                    if !contended {
                        debug!(path = %lock_path.display(), "waiting for save lock");
                        contended = true;
                    }
                    std::thread::sleep(Duration::from_millis(10));
                }
                Err(e) => {
                    warn!(path = %lock_path.display(), error = %e, "gave up waiting for save lock");
                    return Err(LockError::Timeout { path: lock_path });
                }
            }
        }
    }

    /// Acquire with the default timeout (5 seconds)
    pub fn acquire_default(dir: &Path) -> Result<Self, LockError> {
        Self::acquire(dir, Duration::from_secs(5))
    }
}

#[cfg(unix)]
fn try_lock(file: &File) -> Result<(), std::io::Error> {
    use std::os::unix::io::AsRawFd;
    let fd = file.as_raw_fd();
    let result = unsafe { libc::flock(fd, libc::LOCK_EX | libc::LOCK_NB) };
    if result == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn try_lock(_file: &File) -> Result<(), std::io::Error> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn lock_is_released_on_drop() {
        let tmp = TempDir::new().unwrap();
        let lock = FileLock::acquire_default(tmp.path()).unwrap();
        drop(lock);
        assert!(FileLock::acquire(tmp.path(), Duration::from_millis(50)).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn second_lock_times_out() {
        let tmp = TempDir::new().unwrap();
        let _held = FileLock::acquire_default(tmp.path()).unwrap();
        let second = FileLock::acquire(tmp.path(), Duration::from_millis(50));
        assert!(matches!(second, Err(LockError::Timeout { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn waiter_gets_lock_once_holder_drops() {
        let tmp = TempDir::new().unwrap();
        let held = FileLock::acquire_default(tmp.path()).unwrap();
        let releaser = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(50));
            drop(held);
        });
        let waited = FileLock::acquire(tmp.path(), Duration::from_secs(5));
        releaser.join().unwrap();
        assert!(waited.is_ok());
    }
}
