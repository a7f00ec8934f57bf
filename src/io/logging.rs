use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `debug`, `taskline=trace`)
pub const LOG_ENV: &str = "TASKLINE_LOG";

/// Log file name inside the data directory
pub const LOG_FILE: &str = "taskline.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// Log to `<data_dir>/taskline.log`. The TUI owns the terminal, so nothing
/// may be written to stdout/stderr while it runs. Falls back to stderr when
/// the file cannot be opened.
pub fn init_file_logging(data_dir: &Path) {
    let path = data_dir.join(LOG_FILE);
    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            // Already initialized (tests, repeated calls) is fine
            let _ = tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .try_init();
        }
        Err(e) => {
            init_stderr_logging();
            tracing::warn!(path = %path.display(), error = %e, "could not open log file");
        }
    }
}

/// Log to stderr (used before the data directory is known)
pub fn init_stderr_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}
