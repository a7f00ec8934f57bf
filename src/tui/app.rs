use std::io;
use std::time::{Duration, Instant};

use chrono::Utc;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::cli::output::{StatusFilter, format_listing};
use crate::io::store::TaskStore;
use crate::model::config::Config;
use crate::model::task::Task;
use crate::ops::{task_ops, visibility};

use super::input::{self, AppEvent, Effect};
use super::render;
use super::theme::Theme;

/// How long the loop waits for input when no tick is pending
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Current interaction mode. Each variant carries only what that mode uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a command line
    CommandEntry { buffer: String },
    /// Renaming the task at `index` in place
    InlineEdit { index: usize, buffer: String },
}

impl Mode {
    /// Whether the mode has a text buffer with a blinking cursor
    pub fn is_input(&self) -> bool {
        !matches!(self, Mode::Navigate)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Navigate => "NAVIGATE",
            Mode::CommandEntry { .. } => "COMMAND",
            Mode::InlineEdit { .. } => "EDIT",
        }
    }
}

/// Session state: the task list plus everything about the interaction.
/// Created once per run and never persisted (only `tasks` is saved).
pub struct App {
    pub tasks: Vec<Task>,
    /// Index into `tasks` (not into the filtered view)
    pub cursor: usize,
    /// Active priority filter
    pub filter: Option<String>,
    pub mode: Mode,
    /// Result of the last command or save
    pub status_message: String,
    /// Blink phase of the input cursor
    pub cursor_visible: bool,
    pub should_quit: bool,
    /// The most recent save failed
    pub save_failed: bool,
    pub theme: Theme,
    pub config: Config,
    store: TaskStore,
}

impl App {
    pub fn new(tasks: Vec<Task>, store: TaskStore, config: Config) -> Self {
        let cursor = visibility::clamp_cursor(&tasks, None, 0);
        App {
            tasks,
            cursor,
            filter: None,
            mode: Mode::Navigate,
            status_message: String::new(),
            cursor_visible: false,
            should_quit: false,
            save_failed: false,
            theme: Theme::from_config(&config.ui),
            config,
            store,
        }
    }

    pub fn filter(&self) -> Option<&str> {
        self.filter.as_deref()
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    /// Indices of tasks passing the current filter
    pub fn visible(&self) -> Vec<usize> {
        visibility::visible_indices(&self.tasks, self.filter())
    }

    /// The cursor index, if it points at a visible task
    pub fn cursor_index(&self) -> Option<usize> {
        self.tasks
            .get(self.cursor)
            .filter(|t| visibility::is_visible(t, self.filter()))
            .map(|_| self.cursor)
    }

    pub fn cursor_task(&self) -> Option<&Task> {
        self.cursor_index().map(|i| &self.tasks[i])
    }

    /// Re-derive the cursor through the visibility filter
    pub fn clamp_cursor(&mut self) {
        self.cursor = visibility::clamp_cursor(&self.tasks, self.filter.as_deref(), self.cursor);
    }

    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.config.ui.blink_ms.max(1))
    }

    /// Write the task list to disk. Failures land in the status line.
    pub fn persist(&mut self) -> bool {
        match self.store.save(&self.tasks) {
            Ok(()) => {
                self.save_failed = false;
                true
            }
            Err(e) => {
                warn!(error = %e, "save failed");
                self.status_message = format!("Error saving tasks: {}", e);
                self.save_failed = true;
                false
            }
        }
    }

    /// Save if the config asks for saving after every change
    pub fn autosave(&mut self) {
        if self.config.storage.autosave {
            self.persist();
        }
    }

    /// Final bookkeeping on quit: optional purge, then save.
    pub fn finish(&mut self) {
        if self.config.storage.purge_done_on_exit {
            let purged = task_ops::purge_done(&mut self.tasks);
            if purged > 0 {
                info!(purged, "purged done tasks on exit");
            }
            self.clamp_cursor();
        }
        self.persist();
        self.should_quit = true;
    }
}

/// Run the interactive session against `store` until the user quits.
pub fn run(store: TaskStore, config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let tasks = store.load()?;
    info!(count = tasks.len(), path = %store.path().display(), "starting session");
    let mut app = App::new(tasks, store, config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Restore the terminal if anything panics
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;

    print!(
        "{}",
        format_listing(&app.tasks, None, StatusFilter::All, Utc::now())
    );

    if app.save_failed {
        return Err(app.status_message.clone().into());
    }
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    // The only timer: the pending blink tick, if any
    let mut next_tick = match input::start(app) {
        Effect::ScheduleTick(after) => Some(Instant::now() + after),
        _ => None,
    };
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        let effect = match next_tick {
            Some(at) if Instant::now() >= at => {
                next_tick = None;
                input::handle_event(app, AppEvent::Tick)
            }
            _ => {
                let timeout = next_tick
                    .map_or(IDLE_POLL, |at| at.saturating_duration_since(Instant::now()));
                if event::poll(timeout)? {
                    match event::read()? {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            input::handle_event(app, AppEvent::Key(key))
                        }
                        _ => Effect::None,
                    }
                } else {
                    Effect::None
                }
            }
        };

        match effect {
            Effect::ScheduleTick(after) => next_tick = Some(Instant::now() + after),
            Effect::Quit => break,
            Effect::None => {}
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
