//! Task list filtering and the derived dashboard values.

use std::collections::HashSet;

use crate::models::{Task, TaskFilters, TaskStats, TaskStatus};

fn set_match<T: PartialEq>(selected: &Option<Vec<T>>, value: &T) -> bool {
    match selected {
        None => true,
        Some(set) => set.contains(value),
    }
}

/// Whether a task satisfies every criterion in `filters`.
///
/// Criteria combine with AND. An unset criterion (or an empty search or
/// month string) constrains nothing; an empty selection list matches no
/// task at all.
pub fn task_matches(task: &Task, filters: &TaskFilters) -> bool {
    let search_match = match filters.search.as_deref() {
        None | Some("") => true,
        Some(needle) => {
            let needle = needle.to_lowercase();
            task.name.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
                || task.project.to_lowercase().contains(&needle)
        }
    };

    let month_match = match filters.month.as_deref() {
        None | Some("") => true,
        Some(month) => task
            .due_date
            .map(|due| due.to_string().starts_with(month))
            .unwrap_or(false),
    };

    search_match
        && set_match(&filters.status, &task.status)
        && set_match(&filters.responsible, &task.responsible)
        && set_match(&filters.priority, &task.priority)
        && set_match(&filters.project, &task.project)
        && set_match(&filters.privacy, &task.privacy)
        && month_match
}

/// Keep the tasks matching `filters`, preserving order.
pub fn filter_tasks<'a, I>(tasks: I, filters: &TaskFilters) -> Vec<&'a Task>
where
    I: IntoIterator<Item = &'a Task>,
{
    tasks
        .into_iter()
        .filter(|task| task_matches(task, filters))
        .collect()
}

/// Distinct non-empty project names in first-seen order.
pub fn project_names<'a, I>(tasks: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut seen = HashSet::new();
    let mut names = Vec::new();
    for task in tasks {
        if task.project.is_empty() {
            continue;
        }
        if seen.insert(task.project.clone()) {
            names.push(task.project.clone());
        }
    }
    names
}

/// Dashboard counters. Tasks in review count toward the total only.
pub fn task_stats<'a, I>(tasks: I) -> TaskStats
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut stats = TaskStats::default();
    for task in tasks {
        stats.total += 1;
        match task.status {
            TaskStatus::Pending => stats.pending += 1,
            TaskStatus::InProgress => stats.in_progress += 1,
            TaskStatus::Completed => stats.completed += 1,
            TaskStatus::Review => {}
        }
    }
    stats
}
