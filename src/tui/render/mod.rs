pub mod status_row;
pub mod task_list;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::util::unicode::{display_width, truncate_to_width};

use super::app::{App, Mode};

/// Key hints shown in Navigate mode
pub const KEY_HINTS: &str =
    "↑/↓ move | x done | d delete | u undo | a add | e edit | p priority | f filter | q quit";

/// Main render function: header, task sections, status row, key hints
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    let hint_rows = if app.config.ui.show_key_hints && app.mode == Mode::Navigate {
        1
    } else {
        0
    };

    // Layout: header (1 row) | task list | status row (1 row) | hints
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
            Constraint::Length(hint_rows),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    task_list::render_task_list(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);
    if hint_rows > 0 {
        render_hints(frame, app, chunks[3]);
    }
}

/// Title on the left, active filter on the right
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let title = "TODOs";
    let mut spans = vec![Span::styled(
        title,
        Style::default()
            .fg(app.theme.highlight)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(filter) = app.filter().filter(|f| !f.is_empty()) {
        let label = format!("filter: {}", filter);
        let used = display_width(title) + display_width(&label);
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
            spans.push(Span::styled(label, Style::default().fg(app.theme.accent).bg(bg)));
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Style::default().bg(bg)),
        area,
    );
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let text = truncate_to_width(KEY_HINTS, area.width as usize);
    let style = Style::default().fg(app.theme.dim).bg(app.theme.background);
    frame.render_widget(Paragraph::new(Span::styled(text, style)), area);
}

#[cfg(test)]
mod tests {
    use super::test_helpers::*;
    use super::*;
    use crate::ops::task_ops;

    #[test]
    fn full_screen_sections() {
        let (_tmp, mut app) = app_with_tasks(&["buy milk", "call mom", "old idea"]);
        app.config.ui.show_key_hints = false;
        task_ops::mark_done(&mut app.tasks[1]);
        task_ops::mark_deleted(&mut app.tasks[2]);
        app.status_message = "Added task.".into();

        let out = render_app(&app, 44, 10);
        insta::assert_snapshot!(out, @r"
        TODOs
        === ACTIVE ===
        > [ ] 1. buy milk (low) [just now]

        === DONE ===
          [✓] 2. call mom (low) [just now]

        === DELETED ===
          [DELETED] 3. old idea (low) [just now]
        Added task.
        ");
    }

    #[test]
    fn header_shows_filter() {
        let (_tmp, mut app) = app_with_tasks(&["a", "b"]);
        app.tasks[1].priority = "high".into();
        app.filter = Some("high".into());
        app.clamp_cursor();

        let out = render_app(&app, 30, 6);
        let first = out.lines().next().unwrap();
        assert!(first.starts_with("TODOs"));
        assert!(first.ends_with("filter: high"));
        assert!(out.contains("> [ ] 2. b (high)"));
        assert!(!out.contains("1. a"));
    }

    #[test]
    fn key_hints_only_in_navigate() {
        let (_tmp, mut app) = app_with_tasks(&["a"]);
        let out = render_app(&app, 120, 6);
        assert!(out.ends_with(KEY_HINTS));

        app.mode = Mode::CommandEntry {
            buffer: "add ".into(),
        };
        let out = render_app(&app, 120, 6);
        assert!(!out.contains("x done"));
    }

    #[test]
    fn hints_truncate_to_width() {
        let (_tmp, app) = app_with_tasks(&[]);
        let out = render_app(&app, 20, 4);
        let last = out.lines().last().unwrap();
        assert_eq!(display_width(last), 20);
        assert!(last.ends_with('…'));
    }
}
