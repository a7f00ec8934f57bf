use chrono::Utc;

use crate::io::store::next_id;
use crate::model::task::{Task, TaskStatus};

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

/// Active → done, stamping `completed_at`. Returns whether anything changed.
pub fn mark_done(task: &mut Task) -> bool {
    if task.status != TaskStatus::Active {
        return false;
    }
    task.status = TaskStatus::Done;
    task.completed_at = Some(Utc::now());
    task.deleted_at = None;
    true
}

/// Active or done → deleted, stamping `deleted_at`.
pub fn mark_deleted(task: &mut Task) -> bool {
    if task.status == TaskStatus::Deleted {
        return false;
    }
    task.status = TaskStatus::Deleted;
    task.deleted_at = Some(Utc::now());
    task.completed_at = None;
    true
}

/// Done or deleted → active, clearing both stamps.
pub fn restore(task: &mut Task) -> bool {
    if task.status == TaskStatus::Active {
        return false;
    }
    task.status = TaskStatus::Active;
    task.completed_at = None;
    task.deleted_at = None;
    true
}

/// Flip between active and done. Deleted tasks are left alone.
pub fn toggle_done(task: &mut Task) -> bool {
    match task.status {
        TaskStatus::Active => mark_done(task),
        TaskStatus::Done => restore(task),
        TaskStatus::Deleted => false,
    }
}

// ---------------------------------------------------------------------------
// Creation and field edits
// ---------------------------------------------------------------------------

/// Append a new active task and return its id. `None` when no id is left.
pub fn add_task(tasks: &mut Vec<Task>, name: &str) -> Option<u64> {
    let id = next_id(tasks)?;
    tasks.push(Task::new(id, name.trim(), Utc::now()));
    Some(id)
}

pub fn set_priority(task: &mut Task, priority: &str) {
    task.priority = priority.to_string();
}

/// Rename a task. Blank names are refused.
pub fn rename(task: &mut Task, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        return false;
    }
    task.name = name.to_string();
    true
}

/// Physically drop done tasks. Returns how many were removed.
pub fn purge_done(tasks: &mut Vec<Task>) -> usize {
    let before = tasks.len();
    tasks.retain(|t| t.status != TaskStatus::Done);
    before - tasks.len()
}

/// Count tasks per status: (active, done, deleted)
pub fn status_counts(tasks: &[Task]) -> (usize, usize, usize) {
    tasks
        .iter()
        .fold((0, 0, 0), |(a, d, x), t| match t.status {
            TaskStatus::Active => (a + 1, d, x),
            TaskStatus::Done => (a, d + 1, x),
            TaskStatus::Deleted => (a, d, x + 1),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> Vec<Task> {
        let mut tasks = Vec::new();
        add_task(&mut tasks, "one");
        add_task(&mut tasks, "two");
        add_task(&mut tasks, "three");
        tasks
    }

    #[test]
    fn add_assigns_increasing_ids() {
        let mut tasks = three();
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        mark_deleted(&mut tasks[2]);
        let id = add_task(&mut tasks, "four");
        assert_eq!(id, Some(4));
    }

    #[test]
    fn add_leaves_list_alone_at_max_id() {
        let mut tasks = three();
        tasks[0].id = u64::MAX;
        assert_eq!(add_task(&mut tasks, "four"), None);
        assert_eq!(tasks.len(), 3);
    }

    #[test]
    fn add_trims_name() {
        let mut tasks = Vec::new();
        add_task(&mut tasks, "  buy milk ");
        assert_eq!(tasks[0].name, "buy milk");
    }

    #[test]
    fn done_stamps_and_restore_clears() {
        let mut tasks = three();
        let task = &mut tasks[0];
        assert!(mark_done(task));
        assert_eq!(task.status, TaskStatus::Done);
        assert!(task.completed_at.is_some());
        assert!(!mark_done(task));

        assert!(restore(task));
        assert_eq!(task.status, TaskStatus::Active);
        assert!(task.completed_at.is_none());
        assert!(!restore(task));
    }

    #[test]
    fn delete_done_task_swaps_stamps() {
        let mut tasks = three();
        let task = &mut tasks[1];
        mark_done(task);
        assert!(mark_deleted(task));
        assert!(task.completed_at.is_none());
        assert!(task.deleted_at.is_some());
        assert!(task.stamps_consistent());
        assert!(!mark_deleted(task));
    }

    #[test]
    fn toggle_flips_active_and_done_only() {
        let mut tasks = three();
        assert!(toggle_done(&mut tasks[0]));
        assert_eq!(tasks[0].status, TaskStatus::Done);
        assert!(toggle_done(&mut tasks[0]));
        assert_eq!(tasks[0].status, TaskStatus::Active);

        mark_deleted(&mut tasks[1]);
        assert!(!toggle_done(&mut tasks[1]));
        assert_eq!(tasks[1].status, TaskStatus::Deleted);
    }

    #[test]
    fn any_transition_sequence_keeps_stamps_consistent() {
        let mut tasks = three();
        let ops: [fn(&mut Task) -> bool; 4] = [toggle_done, mark_deleted, restore, mark_done];
        for round in 0..24 {
            let task = &mut tasks[round % 3];
            ops[(round * 7 + round / 3) % 4](task);
            assert!(tasks.iter().all(Task::stamps_consistent));
        }
    }

    #[test]
    fn rename_refuses_blank() {
        let mut tasks = three();
        assert!(!rename(&mut tasks[0], "   "));
        assert_eq!(tasks[0].name, "one");
        assert!(rename(&mut tasks[0], " uno "));
        assert_eq!(tasks[0].name, "uno");
    }

    #[test]
    fn purge_keeps_active_and_deleted() {
        let mut tasks = three();
        mark_done(&mut tasks[0]);
        mark_deleted(&mut tasks[1]);
        assert_eq!(purge_done(&mut tasks), 1);
        assert_eq!(tasks.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(status_counts(&tasks), (1, 0, 1));
    }
}
