//! Aggregate statistics over one user's tasks.
//!
//! All counts come from a single pass; the pending count and completion
//! rate are derived afterwards. A user with no tasks gets the shaped
//! zero record, never a not-found.

use serde::Serialize;

use crate::task::{Priority, Task};

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    pub total_todos: u64,
    pub completed_todos: u64,
    pub high_priority: u64,
    pub medium_priority: u64,
    pub low_priority: u64,
    pub pending_todos: u64,
    /// Percentage rounded to two decimals; 0 when there are no tasks
    pub completion_rate: f64,
}

impl TaskStats {
    pub fn collect<'a>(tasks: impl Iterator<Item = &'a Task>) -> Self {
        let mut stats = TaskStats::default();
        for task in tasks {
            stats.total_todos += 1;
            if task.completed {
                stats.completed_todos += 1;
            }
            match task.priority {
                Priority::High => stats.high_priority += 1,
                Priority::Medium => stats.medium_priority += 1,
                Priority::Low => stats.low_priority += 1,
            }
        }
        stats.pending_todos = stats.total_todos - stats.completed_todos;
        stats.completion_rate = completion_rate(stats.completed_todos, stats.total_todos);
        stats
    }
}

fn completion_rate(completed: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = (completed as f64 / total as f64) * 100.0;
    (rate * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::CreateTask;

    fn task(priority: &str, completed: bool) -> Task {
        let command = CreateTask {
            title: "t".to_string(),
            priority: Some(priority.to_string()),
            ..Default::default()
        };
        let mut task = Task::create("owner", &command, vec![]);
        task.completed = completed;
        task
    }

    #[test]
    fn zero_tasks_yields_shaped_zero_record() {
        let stats = TaskStats::collect(std::iter::empty());
        assert_eq!(stats, TaskStats::default());
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn one_of_four_completed_is_twenty_five_percent() {
        let tasks = vec![
            task("high", true),
            task("high", false),
            task("medium", false),
            task("low", false),
        ];
        let stats = TaskStats::collect(tasks.iter());
        assert_eq!(stats.total_todos, 4);
        assert_eq!(stats.completed_todos, 1);
        assert_eq!(stats.pending_todos, 3);
        assert_eq!(stats.high_priority, 2);
        assert_eq!(stats.medium_priority, 1);
        assert_eq!(stats.low_priority, 1);
        assert_eq!(stats.completion_rate, 25.0);
    }

    #[test]
    fn completion_rate_rounds_to_two_decimals() {
        let tasks = vec![task("low", true), task("low", false), task("low", false)];
        let stats = TaskStats::collect(tasks.iter());
        assert_eq!(stats.completion_rate, 33.33);
    }
}
