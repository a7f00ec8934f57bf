//! Event dispatch: one event in, session state updated, at most one
//! follow-up scheduled.

mod command;
mod edit;
mod navigate;

use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::app::{App, Mode};

use command::handle_command_entry;
use edit::handle_inline_edit;
use navigate::handle_navigate;

/// Maximum length of the command and edit buffers, in graphemes
pub const MAX_INPUT: usize = 200;

/// An external event delivered to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    /// Cursor-blink timer fired
    Tick,
}

/// What the run loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Deliver a [`AppEvent::Tick`] after this delay
    ScheduleTick(Duration),
    /// The session is over (tasks already saved)
    Quit,
}

/// Handle one event to completion
pub fn handle_event(app: &mut App, event: AppEvent) -> Effect {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Tick => handle_tick(app),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) -> Effect {
    // Ignore bare modifier key presses (Shift, Ctrl, Alt, etc.)
    if matches!(key.code, KeyCode::Modifier(_)) {
        return Effect::None;
    }

    // Ctrl+C quits from any mode
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return quit(app);
    }

    match &app.mode {
        Mode::Navigate => handle_navigate(app, key),
        Mode::CommandEntry { .. } => handle_command_entry(app, key),
        Mode::InlineEdit { .. } => handle_inline_edit(app, key),
    }
}

/// Arm the blink timer for a fresh session
pub fn start(app: &App) -> Effect {
    Effect::ScheduleTick(app.blink_interval())
}

/// Blink while a buffer is being typed. The timer always re-arms, so entering
/// an input mode never has to start it.
fn handle_tick(app: &mut App) -> Effect {
    if app.mode.is_input() {
        app.cursor_visible = !app.cursor_visible;
    }
    Effect::ScheduleTick(app.blink_interval())
}

pub(super) fn enter_input_mode(app: &mut App, mode: Mode) -> Effect {
    debug!(mode = mode.label(), "entering input mode");
    app.mode = mode;
    app.cursor_visible = true;
    Effect::None
}

pub(super) fn quit(app: &mut App) -> Effect {
    app.mode = Mode::Navigate;
    app.finish();
    Effect::Quit
}

/// Printable character typed into a buffer (no Ctrl/Alt chords)
pub(super) fn typed_char(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(c)
        }
        _ => None,
    }
}
