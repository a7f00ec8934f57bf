use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, tail_to_width};

/// Render the status row: the command line while typing, otherwise the
/// last status message
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let line = match &app.mode {
        Mode::CommandEntry { buffer } => {
            // Command prompt: > buffer|
            let blink = if app.cursor_visible { "|" } else { " " };
            let visible = tail_to_width(buffer, width.saturating_sub(3));
            let mut spans = vec![
                Span::styled("> ", Style::default().fg(app.theme.accent).bg(bg)),
                Span::styled(visible.to_string(), Style::default().fg(app.theme.text).bg(bg)),
                Span::styled(blink, Style::default().fg(app.theme.highlight).bg(bg)),
            ];
            push_hint(&mut spans, app, "Enter run  Esc cancel", width);
            Line::from(spans)
        }
        Mode::InlineEdit { .. } => {
            let mut spans = Vec::new();
            push_hint(&mut spans, app, "Enter save  Esc cancel", width);
            Line::from(spans)
        }
        Mode::Navigate => {
            let color = if app.save_failed {
                app.theme.error
            } else {
                app.theme.accent
            };
            Line::from(Span::styled(
                app.status_message.clone(),
                Style::default().fg(color).bg(bg),
            ))
        }
    };

    let paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// Right-align a dim hint after `spans` when it fits
fn push_hint(spans: &mut Vec<Span<'static>>, app: &App, hint: &'static str, width: usize) {
    let bg = app.theme.background;
    let content_width: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let hint_width = display_width(hint);
    if content_width + hint_width < width {
        let padding = width - content_width - hint_width;
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, Style::default().fg(app.theme.dim).bg(bg)));
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_helpers::*;
    use crate::tui::app::Mode;

    fn status_line(out: &str) -> &str {
        out.lines().last().unwrap_or("")
    }

    #[test]
    fn command_line_with_blinking_cursor() {
        let (_tmp, mut app) = app_with_tasks(&["a"]);
        app.mode = Mode::CommandEntry {
            buffer: "add milk".into(),
        };
        app.cursor_visible = true;
        let out = render_app(&app, 40, 4);
        assert_eq!(
            status_line(&out),
            format!("> add milk|{}Enter run  Esc cancel", " ".repeat(8))
        );

        app.cursor_visible = false;
        let out = render_app(&app, 40, 4);
        assert!(status_line(&out).starts_with("> add milk "));
    }

    #[test]
    fn long_command_shows_its_tail() {
        let (_tmp, mut app) = app_with_tasks(&[]);
        app.mode = Mode::CommandEntry {
            buffer: format!("add {}end", "x".repeat(50)),
        };
        app.cursor_visible = true;
        let out = render_app(&app, 20, 4);
        assert_eq!(status_line(&out), format!("> {}end|", "x".repeat(14)));
    }

    #[test]
    fn navigate_shows_status_message() {
        let (_tmp, mut app) = app_with_tasks(&["a"]);
        app.config.ui.show_key_hints = false;
        app.status_message = "Unknown command.".into();
        let out = render_app(&app, 40, 4);
        assert_eq!(status_line(&out), "Unknown command.");
    }

    #[test]
    fn inline_edit_shows_hint() {
        let (_tmp, mut app) = app_with_tasks(&["a"]);
        app.mode = Mode::InlineEdit {
            index: 0,
            buffer: "a".into(),
        };
        let out = render_app(&app, 40, 4);
        assert!(status_line(&out).ends_with("Enter save  Esc cancel"));
    }
}
