use chrono::Utc;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::task::TaskStatus;
use crate::ops::visibility;
use crate::tui::app::{App, Mode};
use crate::util::age::format_age;

/// Render the visible tasks grouped into ACTIVE / DONE / DELETED sections
pub fn render_task_list(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let sections = visibility::sections(&app.tasks, app.filter());

    if sections.is_empty() {
        let text = if app.tasks.is_empty() {
            "No tasks. Press a to add one."
        } else {
            "No tasks match the filter."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(text, Style::default().fg(app.theme.dim).bg(bg))),
            area,
        );
        return;
    }

    let now = Utc::now();
    let cursor = app.cursor_index();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0;

    for (group, (status, indices)) in sections.groups().into_iter().enumerate() {
        if group > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            format!("=== {} ===", status.as_str().to_uppercase()),
            Style::default()
                .fg(app.theme.status_color(status))
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        )));
        for &i in indices {
            if cursor == Some(i) {
                cursor_line = lines.len();
            }
            lines.push(task_line(app, i, status, cursor == Some(i), now));
        }
    }

    // Keep the cursor row on screen
    let height = area.height as usize;
    let offset = if height > 0 && cursor_line >= height {
        cursor_line + 1 - height
    } else {
        0
    };

    let paragraph = Paragraph::new(lines)
        .style(Style::default().bg(bg))
        .scroll((offset as u16, 0));
    frame.render_widget(paragraph, area);
}

fn task_line(
    app: &App,
    index: usize,
    status: TaskStatus,
    selected: bool,
    now: chrono::DateTime<Utc>,
) -> Line<'static> {
    let theme = &app.theme;
    let task = &app.tasks[index];
    let base = if selected {
        Style::default().fg(theme.highlight).bg(theme.background)
    } else {
        Style::default().fg(theme.text).bg(theme.background)
    };

    let mut spans = vec![
        Span::styled(if selected { "> " } else { "  " }, base),
        Span::styled(
            format!("{} ", status.marker()),
            Style::default()
                .fg(theme.status_color(status))
                .bg(theme.background),
        ),
        Span::styled(format!("{}. ", index + 1), base),
    ];

    match &app.mode {
        Mode::InlineEdit {
            index: editing,
            buffer,
        } if *editing == index => {
            spans.push(Span::styled(
                buffer.clone(),
                base.add_modifier(Modifier::UNDERLINED),
            ));
            let blink = if app.cursor_visible { "|" } else { " " };
            spans.push(Span::styled(blink, Style::default().fg(theme.accent).bg(theme.background)));
        }
        _ => spans.push(Span::styled(task.name.clone(), base)),
    }

    let dim = Style::default().fg(theme.dim).bg(theme.background);
    spans.push(Span::styled(format!(" ({})", task.priority), dim));
    spans.push(Span::styled(
        format!(" [{}]", format_age(task.created_at, now)),
        dim,
    ));
    Line::from(spans)
}
