//! Which tasks the priority filter lets through, and cursor movement over
//! them. The cursor is always an index into the full task list; these
//! helpers translate it through the visible subset.

use crate::model::task::{Task, TaskStatus};

/// Whether a task passes the filter. `None` and `""` both mean "no filter".
pub fn is_visible(task: &Task, filter: Option<&str>) -> bool {
    match filter {
        None | Some("") => true,
        Some(f) => task.priority == f,
    }
}

/// Indices of all tasks passing the filter, ascending.
pub fn visible_indices(tasks: &[Task], filter: Option<&str>) -> Vec<usize> {
    tasks
        .iter()
        .enumerate()
        .filter(|(_, t)| is_visible(t, filter))
        .map(|(i, _)| i)
        .collect()
}

/// Next visible index after `current`, wrapping to the first.
///
/// A `current` that is not itself visible resets to the first visible index.
/// With nothing visible, `current` is returned unchanged.
pub fn next(tasks: &[Task], filter: Option<&str>, current: usize) -> usize {
    let visible = visible_indices(tasks, filter);
    match visible.iter().position(|&i| i == current) {
        Some(pos) => visible[(pos + 1) % visible.len()],
        None => visible.first().copied().unwrap_or(current),
    }
}

/// Previous visible index before `current`, wrapping to the last.
pub fn previous(tasks: &[Task], filter: Option<&str>, current: usize) -> usize {
    let visible = visible_indices(tasks, filter);
    match visible.iter().position(|&i| i == current) {
        Some(0) => visible[visible.len() - 1],
        Some(pos) => visible[pos - 1],
        None => visible.first().copied().unwrap_or(current),
    }
}

/// Keep `current` if it is visible, else the first visible index, else 0.
pub fn clamp_cursor(tasks: &[Task], filter: Option<&str>, current: usize) -> usize {
    if current < tasks.len() && is_visible(&tasks[current], filter) {
        return current;
    }
    tasks
        .iter()
        .position(|t| is_visible(t, filter))
        .unwrap_or(0)
}

/// Nearest visible active task, searching forward from `from` and then
/// backward. `None` when no visible task is active.
pub fn nearest_active(tasks: &[Task], filter: Option<&str>, from: usize) -> Option<usize> {
    let candidate = |i: &usize| tasks[*i].is_active() && is_visible(&tasks[*i], filter);
    let len = tasks.len();
    (from.saturating_add(1)..len)
        .find(candidate)
        .or_else(|| (0..from.min(len)).rev().find(candidate))
}

/// Visible task indices grouped for display. Grouping does not reorder
/// indices within a group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sections {
    pub active: Vec<usize>,
    pub done: Vec<usize>,
    pub deleted: Vec<usize>,
}

impl Sections {
    pub fn is_empty(&self) -> bool {
        self.active.is_empty() && self.done.is_empty() && self.deleted.is_empty()
    }

    /// Non-empty groups in display order
    pub fn groups(&self) -> Vec<(TaskStatus, &[usize])> {
        [
            (TaskStatus::Active, self.active.as_slice()),
            (TaskStatus::Done, self.done.as_slice()),
            (TaskStatus::Deleted, self.deleted.as_slice()),
        ]
        .into_iter()
        .filter(|(_, idx)| !idx.is_empty())
        .collect()
    }
}

pub fn sections(tasks: &[Task], filter: Option<&str>) -> Sections {
    let mut out = Sections::default();
    for i in visible_indices(tasks, filter) {
        match tasks[i].status {
            TaskStatus::Active => out.active.push(i),
            TaskStatus::Done => out.done.push(i),
            TaskStatus::Deleted => out.deleted.push(i),
        }
    }
    out
}
