use crossterm::event::{KeyCode, KeyEvent};
use tracing::info;

use crate::ops::{command, visibility};
use crate::tui::app::{App, Mode};
use crate::util::unicode::{grapheme_count, pop_grapheme};

use super::*;

pub(super) fn handle_command_entry(app: &mut App, key: KeyEvent) -> Effect {
    let Mode::CommandEntry { buffer } = &mut app.mode else {
        return Effect::None;
    };

    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            let line = std::mem::take(buffer);
            app.mode = Mode::Navigate;
            if !line.is_empty() {
                submit(app, &line);
            }
        }
        KeyCode::Backspace => {
            // Backspace on an empty buffer cancels
            if !pop_grapheme(buffer) {
                app.mode = Mode::Navigate;
            }
        }
        _ => {
            if let Some(c) = typed_char(&key) {
                if grapheme_count(buffer) < MAX_INPUT {
                    buffer.push(c);
                }
            }
        }
    }
    Effect::None
}

/// Run the command line and adopt its results
fn submit(app: &mut App, line: &str) {
    let outcome = command::execute(&mut app.tasks, &mut app.filter, line);
    info!(line, message = %outcome.message, "command submitted");
    app.status_message = outcome.message;

    if let Some(added) = outcome.added {
        if visibility::is_visible(&app.tasks[added], app.filter.as_deref()) {
            app.cursor = added;
        }
    }
    app.clamp_cursor();

    if outcome.changed {
        app.autosave();
    }
}
