use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::task::{Task, TaskStatus};
use crate::ops::{task_ops, visibility};
use crate::util::age::format_age;

/// Message printed when a listing selects nothing
pub const NO_TASKS: &str = "No tasks found.";

/// Which statuses a listing includes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    Active,
    Done,
    Deleted,
    All,
}

impl StatusFilter {
    pub fn parse(s: &str) -> Result<StatusFilter, String> {
        match s {
            "all" => Ok(StatusFilter::All),
            other => TaskStatus::parse_status(other)
                .map(StatusFilter::from)
                .ok_or_else(|| {
                    format!(
                        "invalid status: '{}' (expected active, done, deleted or all)",
                        s
                    )
                }),
        }
    }

    pub fn includes(self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == TaskStatus::Active,
            StatusFilter::Done => status == TaskStatus::Done,
            StatusFilter::Deleted => status == TaskStatus::Deleted,
        }
    }
}

impl From<TaskStatus> for StatusFilter {
    fn from(status: TaskStatus) -> Self {
        match status {
            TaskStatus::Active => StatusFilter::Active,
            TaskStatus::Done => StatusFilter::Done,
            TaskStatus::Deleted => StatusFilter::Deleted,
        }
    }
}

/// Tasks passing both filters, in file order
pub fn select<'a>(tasks: &'a [Task], priority: Option<&str>, status: StatusFilter) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|t| visibility::is_visible(t, priority) && status.includes(t.status))
        .collect()
}

// ---------------------------------------------------------------------------
// Text output
// ---------------------------------------------------------------------------

/// One listing line: `[ ] 3. buy milk (low) [2h]`
pub fn format_task_line(task: &Task, now: DateTime<Utc>) -> String {
    format!(
        "{} {}. {} ({}) [{}]",
        task.status.marker(),
        task.id,
        task.name,
        task.priority,
        format_age(task.created_at, now)
    )
}

/// Sectioned listing (ACTIVE, DONE, DELETED), or [`NO_TASKS`]
pub fn format_listing(
    tasks: &[Task],
    priority: Option<&str>,
    status: StatusFilter,
    now: DateTime<Utc>,
) -> String {
    let selected = select(tasks, priority, status);
    if selected.is_empty() {
        return format!("{}\n", NO_TASKS);
    }

    let mut out = String::new();
    for section in [TaskStatus::Active, TaskStatus::Done, TaskStatus::Deleted] {
        let rows: Vec<&&Task> = selected.iter().filter(|t| t.status == section).collect();
        if rows.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str(&format!("=== {} ===\n", section.as_str().to_uppercase()));
        for task in rows {
            out.push_str(&format_task_line(task, now));
            out.push('\n');
        }
    }
    out
}

// ---------------------------------------------------------------------------
// JSON output
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct StatsJson {
    pub active: usize,
    pub done: usize,
    pub deleted: usize,
    pub total: usize,
}

pub fn stats_json(tasks: &[Task]) -> StatsJson {
    let (active, done, deleted) = task_ops::status_counts(tasks);
    StatsJson {
        active,
        done,
        deleted,
        total: tasks.len(),
    }
}

pub fn format_stats(tasks: &[Task]) -> String {
    let s = stats_json(tasks);
    format!(
        "active:  {}\ndone:    {}\ndeleted: {}\ntotal:   {}\n",
        s.active, s.done, s.deleted, s.total
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    fn sample(now: DateTime<Utc>) -> Vec<Task> {
        let mut tasks = vec![
            Task::new(1, "buy milk", now - Duration::hours(2)),
            Task::new(2, "call mom", now - Duration::days(3)),
            Task::new(3, "old idea", now),
            Task::new(4, "ship it", now - Duration::minutes(5)),
        ];
        tasks[1].priority = "high".into();
        task_ops::mark_done(&mut tasks[1]);
        task_ops::mark_deleted(&mut tasks[2]);
        tasks
    }

    #[test]
    fn parse_status_filter() {
        assert_eq!(StatusFilter::parse("all"), Ok(StatusFilter::All));
        assert_eq!(StatusFilter::parse("done"), Ok(StatusFilter::Done));
        assert!(StatusFilter::parse("finished").is_err());
        assert!(StatusFilter::parse("").is_err());
    }

    #[test]
    fn listing_groups_by_status() {
        let now = Utc::now();
        let out = format_listing(&sample(now), None, StatusFilter::All, now);
        assert_eq!(
            out,
            "=== ACTIVE ===\n\
             [ ] 1. buy milk (low) [2h]\n\
             [ ] 4. ship it (low) [5m]\n\
             \n\
             === DONE ===\n\
             [✓] 2. call mom (high) [3d]\n\
             \n\
             === DELETED ===\n\
             [DELETED] 3. old idea (low) [just now]\n"
        );
    }

    #[test]
    fn listing_filters_compose() {
        let now = Utc::now();
        let tasks = sample(now);
        assert_eq!(
            format_listing(&tasks, Some("high"), StatusFilter::All, now),
            "=== DONE ===\n[✓] 2. call mom (high) [3d]\n"
        );
        assert_eq!(
            format_listing(&tasks, Some("high"), StatusFilter::Active, now),
            "No tasks found.\n"
        );
        assert_eq!(format_listing(&[], None, StatusFilter::All, now), "No tasks found.\n");
    }

    #[test]
    fn select_keeps_file_order() {
        let now = Utc::now();
        let tasks = sample(now);
        let ids: Vec<u64> = select(&tasks, Some("low"), StatusFilter::All)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn stats_count_each_status() {
        let now = Utc::now();
        assert_eq!(
            format_stats(&sample(now)),
            "active:  2\ndone:    1\ndeleted: 1\ntotal:   4\n"
        );
    }
}
