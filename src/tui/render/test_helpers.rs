use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::io::store::TaskStore;
use crate::model::config::{Config, CorruptPolicy};
use crate::ops::task_ops;
use crate::tui::app::App;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Render the whole session screen
pub fn render_app(app: &App, w: u16, h: u16) -> String {
    render_to_string(w, h, |frame, _| super::render(frame, app))
}

/// A session over freshly added tasks, saving into a temp data dir.
/// Keep the `TempDir` alive for as long as the app is used.
pub fn app_with_tasks(names: &[&str]) -> (TempDir, App) {
    let tmp = TempDir::new().unwrap();
    let store = TaskStore::new(tmp.path().join("tasks.json"), CorruptPolicy::Reset);
    let mut tasks = Vec::new();
    for name in names {
        task_ops::add_task(&mut tasks, name);
    }
    (tmp, App::new(tasks, store, Config::default()))
}
