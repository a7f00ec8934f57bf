use crossterm::event::{KeyCode, KeyEvent};
use tracing::debug;

use crate::ops::task_ops;
use crate::tui::app::{App, Mode};
use crate::util::unicode::{grapheme_count, pop_grapheme};

use super::*;

pub(super) fn handle_inline_edit(app: &mut App, key: KeyEvent) -> Effect {
    let Mode::InlineEdit { index, buffer } = &mut app.mode else {
        return Effect::None;
    };

    match key.code {
        KeyCode::Esc => {
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => {
            let index = *index;
            let name = std::mem::take(buffer);
            app.mode = Mode::Navigate;
            commit(app, index, &name);
        }
        KeyCode::Backspace => {
            pop_grapheme(buffer);
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

/// Store the edited name. A blank buffer keeps the old name; the list is
/// saved either way.
fn commit(app: &mut App, index: usize, name: &str) {
    if let Some(task) = app.tasks.get_mut(index) {
        if task_ops::rename(task, name) {
            debug!(id = task.id, "task renamed");
        }
    }
    app.clamp_cursor();
    app.persist();
}
