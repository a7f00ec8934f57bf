//! The typed command line: `add`, `remove`, `priority`, `filter`, `edit`.
//!
//! Parsing never fails loudly. Anything that is not a well-formed command
//! leaves tasks and filter untouched and reports [`UNKNOWN_COMMAND`].

use tracing::debug;

use crate::model::task::Task;
use crate::ops::task_ops;

/// Message for unrecognized or malformed input
pub const UNKNOWN_COMMAND: &str = "Unknown command.";

/// Message when the largest task id leaves no room for another
pub const IDS_EXHAUSTED: &str = "No task ids left.";

/// A parsed command line. Indices are 0-based offsets into the task list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Remove(usize),
    Priority { index: usize, value: String },
    /// `None` clears the filter
    Filter(Option<String>),
    Edit { index: usize, name: String },
}

/// Result of running one command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    /// Whether the task list was modified
    pub changed: bool,
    /// Index of a task created by `add`
    pub added: Option<usize>,
}

impl Outcome {
    fn changed(message: &str) -> Self {
        Outcome {
            message: message.to_string(),
            changed: true,
            added: None,
        }
    }

    fn unchanged(message: &str) -> Self {
        Outcome {
            message: message.to_string(),
            changed: false,
            added: None,
        }
    }
}

/// Convert a 1-based index argument to a 0-based offset
pub fn parse_index(s: &str) -> Option<usize> {
    let n: i64 = s.parse().ok()?;
    if n < 1 {
        return None;
    }
    usize::try_from(n - 1).ok()
}

/// Parse a non-empty command line. `None` means unrecognized.
pub fn parse_command(line: &str) -> Option<Command> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (verb, args) = parts.split_first()?;
    match (*verb, args) {
        ("add", [_, ..]) => Some(Command::Add(args.join(" "))),
        ("remove", [n, ..]) => parse_index(n).map(Command::Remove),
        ("priority", [n, value, ..]) => parse_index(n).map(|index| Command::Priority {
            index,
            value: value.to_string(),
        }),
        ("filter", []) => Some(Command::Filter(None)),
        ("filter", [value, ..]) => Some(Command::Filter(Some(value.to_string()))),
        ("edit", [n, rest @ ..]) if !rest.is_empty() => {
            parse_index(n).map(|index| Command::Edit {
                index,
                name: rest.join(" "),
            })
        }
        _ => None,
    }
}

/// Apply a command to the task list and filter.
pub fn apply(tasks: &mut Vec<Task>, filter: &mut Option<String>, command: Command) -> Outcome {
    match command {
        Command::Add(name) => match task_ops::add_task(tasks, &name) {
            Some(_) => Outcome {
                added: Some(tasks.len() - 1),
                ..Outcome::changed("Added task.")
            },
            None => Outcome::unchanged(IDS_EXHAUSTED),
        },
        Command::Remove(index) => match tasks.get_mut(index) {
            Some(task) => {
                if task_ops::mark_deleted(task) {
                    Outcome::changed("Removed task.")
                } else {
                    Outcome::unchanged("Removed task.")
                }
            }
            None => Outcome::unchanged(UNKNOWN_COMMAND),
        },
        Command::Priority { index, value } => match tasks.get_mut(index) {
            Some(task) => {
                task_ops::set_priority(task, &value);
                Outcome::changed("Changed priority.")
            }
            None => Outcome::unchanged(UNKNOWN_COMMAND),
        },
        Command::Filter(Some(value)) => {
            *filter = Some(value);
            Outcome::unchanged("Filter applied.")
        }
        Command::Filter(None) => {
            *filter = None;
            Outcome::unchanged("Filter cleared.")
        }
        Command::Edit { index, name } => match tasks.get_mut(index) {
            Some(task) => {
                if task_ops::rename(task, &name) {
                    Outcome::changed("Task edited.")
                } else {
                    Outcome::unchanged(UNKNOWN_COMMAND)
                }
            }
            None => Outcome::unchanged(UNKNOWN_COMMAND),
        },
    }
}

/// Run one command line. Total over all inputs: an empty line is a silent
/// no-op, anything unrecognized yields [`UNKNOWN_COMMAND`].
pub fn execute(tasks: &mut Vec<Task>, filter: &mut Option<String>, line: &str) -> Outcome {
    if line.trim().is_empty() {
        return Outcome::unchanged("");
    }
    match parse_command(line) {
        Some(command) => {
            debug!(?command, "executing command");
            apply(tasks, filter, command)
        }
        None => {
            debug!(line, "unrecognized command");
            Outcome::unchanged(UNKNOWN_COMMAND)
        }
    }
}
