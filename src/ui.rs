//! Plain text rendering for the terminal.

use crate::models::{Task, TaskStats, User};
use crate::visibility::task_audience;

/// Leading characters of a backend id, enough to address a task from the
/// command line.
pub fn short_id(id: &str) -> String {
    id.chars().take(8).collect()
}

/// Truncate a string to a maximum width, adding an ellipsis if needed.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out = String::new();
        for (i, ch) in s.chars().enumerate() {
            if i + 1 >= width {
                out.push('…');
                break;
            }
            out.push(ch);
        }
        out
    }
}

fn format_due(task: &Task) -> String {
    match task.due_date {
        Some(due) => due.to_string(),
        None => "-".to_string(),
    }
}

/// Print tasks in a formatted table, one row per task.
pub fn print_task_table(tasks: &[&Task]) {
    if tasks.is_empty() {
        println!("No tasks to show");
        return;
    }
    println!(
        "{:<9} {:<12} {:<7} {:<11} {:<13} {:<14} {:<8} {}",
        "ID", "Status", "Pri", "Due", "Responsible", "Project", "Privacy", "Name"
    );
    for task in tasks {
        let comments = if task.comments.is_empty() {
            String::new()
        } else {
            format!(" [{} comments]", task.comments.len())
        };
        println!(
            "{:<9} {:<12} {:<7} {:<11} {:<13} {:<14} {:<8} {}{}",
            short_id(&task.id),
            task.status.as_str(),
            task.priority.as_str(),
            format_due(task),
            truncate(&task.responsible, 13),
            truncate(&task.project, 14),
            task.privacy.as_str(),
            task.name,
            comments
        );
    }
}

/// Print one task in full, comments included.
pub fn print_task_detail(task: &Task) {
    println!("{}", task.name);
    println!("{:<14} {}", "Id", task.id);
    println!("{:<14} {}", "Status", task.status);
    println!("{:<14} {}", "Priority", task.priority);
    println!("{:<14} {}", "Responsible", display_or_dash(&task.responsible));
    println!("{:<14} {}", "Due", format_due(task));
    println!("{:<14} {}", "Project", display_or_dash(&task.project));
    println!("{:<14} {}", "Privacy", task.privacy);
    let audience = task_audience(task);
    if !audience.is_empty() {
        println!("{:<14} {}", "Audience", audience.join(", "));
    }
    println!("{:<14} {}", "Created by", display_or_dash(&task.created_by));
    println!(
        "{:<14} {}",
        "Created",
        task.created_at.format("%Y-%m-%d %H:%M")
    );
    println!(
        "{:<14} {}",
        "Updated",
        task.updated_at.format("%Y-%m-%d %H:%M")
    );
    println!("{:<14} {}", "Description", display_or_dash(&task.description));

    if !task.comments.is_empty() {
        println!();
        println!("Comments");
        for comment in &task.comments {
            println!("  {}  {}  {}", comment.date, comment.id, comment.text);
        }
    }
}

fn display_or_dash(value: &str) -> &str {
    if value.is_empty() {
        "-"
    } else {
        value
    }
}

pub fn print_stats(stats: &TaskStats) {
    println!("{:<12} {}", "Total", stats.total);
    println!("{:<12} {}", "Pending", stats.pending);
    println!("{:<12} {}", "In progress", stats.in_progress);
    println!("{:<12} {}", "Completed", stats.completed);
}

pub fn print_users(users: &[User]) {
    if users.is_empty() {
        println!("No users to show");
        return;
    }
    println!("{:<16} {}", "Username", "Email");
    for user in users {
        println!("{:<16} {}", truncate(&user.username, 16), user.email);
    }
}

pub fn print_projects(projects: &[String]) {
    if projects.is_empty() {
        println!("No projects to show");
        return;
    }
    for project in projects {
        println!("{project}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_adds_an_ellipsis_past_the_width() {
        assert_eq!(truncate("finance", 14), "finance");
        assert_eq!(truncate("a very long project name", 10), "a very lo…");
        assert_eq!(truncate("ábcdéf", 4), "ábc…");
    }

    #[test]
    fn short_ids_are_a_stable_prefix() {
        assert_eq!(short_id("3f2b8a10-77aa-4d4e-9f94-000000000000"), "3f2b8a10");
        assert_eq!(short_id("t1"), "t1");
    }
}
