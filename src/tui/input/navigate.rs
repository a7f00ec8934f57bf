use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::task::TaskStatus;
use crate::ops::{task_ops, visibility};
use crate::tui::app::{App, Mode};

use super::*;

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) -> Effect {
    // Clear any transient status message on keypress
    app.status_message.clear();

    if key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return Effect::None;
    }

    match key.code {
        KeyCode::Char('q') => quit(app),

        // Movement through the visible tasks
        KeyCode::Char('j') | KeyCode::Down => {
            app.cursor = visibility::next(&app.tasks, app.filter.as_deref(), app.cursor);
            Effect::None
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.cursor = visibility::previous(&app.tasks, app.filter.as_deref(), app.cursor);
            Effect::None
        }

        // Command line with the verb (and arguments) preset
        KeyCode::Char('a') => begin_command(app, "add ".to_string()),
        KeyCode::Char('f') => begin_command(app, "filter ".to_string()),
        KeyCode::Char('p') => match app.cursor_index() {
            Some(i) => begin_command(app, format!("priority {} ", i + 1)),
            None => Effect::None,
        },

        KeyCode::Char('e') => begin_edit(app),

        // Direct lifecycle changes on the cursor task
        KeyCode::Char('x') => toggle_cursor_task(app),
        KeyCode::Char('d') => delete_cursor_task(app),
        KeyCode::Char('u') => restore_cursor_task(app),

        _ => Effect::None,
    }
}

fn begin_command(app: &mut App, preset: String) -> Effect {
    enter_input_mode(app, Mode::CommandEntry { buffer: preset })
}

fn begin_edit(app: &mut App) -> Effect {
    match app.cursor_index() {
        Some(index) => {
            let buffer = app.tasks[index].name.clone();
            enter_input_mode(app, Mode::InlineEdit { index, buffer })
        }
        None => Effect::None,
    }
}

/// Active ↔ done. Completing a task moves the cursor on to the nearest
/// active one.
fn toggle_cursor_task(app: &mut App) -> Effect {
    let Some(i) = app.cursor_index() else {
        return Effect::None;
    };
    let was_active = app.tasks[i].status == TaskStatus::Active;
    if !task_ops::toggle_done(&mut app.tasks[i]) {
        return Effect::None;
    }
    if was_active {
        relocate_to_active(app, i);
    }
    after_mutation(app);
    Effect::None
}

fn delete_cursor_task(app: &mut App) -> Effect {
    let Some(i) = app.cursor_index() else {
        return Effect::None;
    };
    if !task_ops::mark_deleted(&mut app.tasks[i]) {
        return Effect::None;
    }
    relocate_to_active(app, i);
    after_mutation(app);
    Effect::None
}

fn restore_cursor_task(app: &mut App) -> Effect {
    let Some(i) = app.cursor_index() else {
        return Effect::None;
    };
    if task_ops::restore(&mut app.tasks[i]) {
        after_mutation(app);
    }
    Effect::None
}

/// Move the cursor to the nearest visible active task (forward, then
/// backward). Stays put when there is none.
fn relocate_to_active(app: &mut App, from: usize) {
    if let Some(i) = visibility::nearest_active(&app.tasks, app.filter.as_deref(), from) {
        app.cursor = i;
    }
}

fn after_mutation(app: &mut App) {
    app.clamp_cursor();
    app.autosave();
}
