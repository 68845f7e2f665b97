//! Who is allowed to see which task.

use crate::models::{Task, TaskPrivacy};

/// Whether `username` may see `task`.
///
/// General tasks are visible to everyone, signed in or not. Private tasks
/// are visible only to the responsible user, the creator, and the users
/// the task is shared with; an absent or empty username sees none of them.
pub fn can_user_see_task(task: &Task, username: Option<&str>) -> bool {
    if task.privacy == TaskPrivacy::General {
        return true;
    }
    let username = match username {
        Some(name) if !name.is_empty() => name,
        _ => return false,
    };
    task.responsible == username
        || task.created_by == username
        || task.shared_with.iter().any(|shared| shared == username)
}

/// The users a private task is addressed to: the responsible user followed
/// by the shared list, in order. General tasks have no restricted audience
/// and return an empty list.
pub fn task_audience(task: &Task) -> Vec<String> {
    if task.privacy == TaskPrivacy::General {
        return Vec::new();
    }
    let mut audience = Vec::with_capacity(1 + task.shared_with.len());
    audience.push(task.responsible.clone());
    audience.extend(task.shared_with.iter().cloned());
    audience
}

/// Keep only the tasks `username` may see, preserving order.
pub fn visible_tasks<'a>(tasks: &'a [Task], username: Option<&str>) -> Vec<&'a Task> {
    tasks
        .iter()
        .filter(|task| can_user_see_task(task, username))
        .collect()
}
