//! Domain types for the task board and the raw rows the backend returns.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Workflow state of a task.
///
/// The advance action walks a fixed cycle:
/// pending -> in-progress -> review -> completed -> pending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Review,
    Completed,
}

impl TaskStatus {
    /// The next status in the workflow cycle.
    pub fn next(self) -> TaskStatus {
        match self {
            TaskStatus::Pending => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Review,
            TaskStatus::Review => TaskStatus::Completed,
            TaskStatus::Completed => TaskStatus::Pending,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Review => "review",
            TaskStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" => Ok(TaskStatus::InProgress),
            "review" => Ok(TaskStatus::Review),
            "completed" => Ok(TaskStatus::Completed),
            other => Err(format!("unknown status '{other}'")),
        }
    }
}

/// Importance of a task.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPriority::High => "high",
            TaskPriority::Medium => "medium",
            TaskPriority::Low => "low",
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(TaskPriority::High),
            "medium" => Ok(TaskPriority::Medium),
            "low" => Ok(TaskPriority::Low),
            other => Err(format!("unknown priority '{other}'")),
        }
    }
}

/// Who may see a task. General tasks are visible to every user; private
/// tasks only to the responsible user, the creator and the shared set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaskPrivacy {
    Private,
    General,
}

impl TaskPrivacy {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskPrivacy::Private => "private",
            TaskPrivacy::General => "general",
        }
    }
}

impl fmt::Display for TaskPrivacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskPrivacy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(TaskPrivacy::Private),
            "general" => Ok(TaskPrivacy::General),
            other => Err(format!("unknown privacy '{other}'")),
        }
    }
}

/// One entry in a task's comment thread. Ids are assigned by the backend;
/// `date` is a display string stamped by the client at creation time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    pub id: String,
    pub text: String,
    pub date: String,
}

/// A task as the application works with it, comments joined in.
#[derive(Clone, Debug)]
pub struct Task {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub responsible: String,
    pub due_date: Option<NaiveDate>,
    pub project: String,
    pub privacy: TaskPrivacy,
    pub shared_with: Vec<String>,
    pub created_by: String,
    pub comments: Vec<TaskComment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of the `users` table.
#[derive(Clone, Debug, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Filter criteria combined with logical AND. `None` means no constraint
/// on that dimension.
#[derive(Clone, Debug, Default)]
pub struct TaskFilters {
    pub search: Option<String>,
    pub status: Option<Vec<TaskStatus>>,
    pub responsible: Option<Vec<String>>,
    pub priority: Option<Vec<TaskPriority>>,
    pub project: Option<Vec<String>>,
    pub privacy: Option<Vec<TaskPrivacy>>,
    pub month: Option<String>,
}

/// Dashboard counters over a task list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskStats {
    pub total: usize,
    pub pending: usize,
    pub in_progress: usize,
    pub completed: usize,
}

/// Everything a caller supplies when creating or editing a task. Ids and
/// server timestamps never travel in a draft.
#[derive(Clone, Debug)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub responsible: String,
    pub due_date: Option<NaiveDate>,
    pub project: String,
    pub privacy: TaskPrivacy,
    pub shared_with: Vec<String>,
}

impl Default for TaskDraft {
    fn default() -> TaskDraft {
        TaskDraft {
            name: String::new(),
            description: String::new(),
            status: TaskStatus::Pending,
            priority: TaskPriority::Medium,
            responsible: String::new(),
            due_date: None,
            project: String::new(),
            privacy: TaskPrivacy::General,
            shared_with: Vec::new(),
        }
    }
}

impl TaskDraft {
    /// Column set for a POST on the `tasks` table.
    pub fn to_insert(&self, created_by: String) -> TaskInsert {
        TaskInsert {
            name: self.name.clone(),
            status: self.status,
            description: self.description.clone(),
            responsible: self.responsible.clone(),
            priority: self.priority,
            due_date: self.due_date,
            project: self.project.clone(),
            privacy: self.privacy,
            shared_with: self.shared_with.clone(),
            created_by,
        }
    }

    /// Column set for a PATCH on the `tasks` table. The creator column is
    /// written once at insert time and never updated.
    pub fn to_update(&self) -> TaskUpdate {
        TaskUpdate {
            name: self.name.clone(),
            status: self.status,
            description: self.description.clone(),
            responsible: self.responsible.clone(),
            priority: self.priority,
            due_date: self.due_date,
            project: self.project.clone(),
            privacy: self.privacy,
            shared_with: self.shared_with.clone(),
        }
    }

    /// Carry an existing task into a draft for editing.
    pub fn from_task(task: &Task) -> TaskDraft {
        TaskDraft {
            name: task.name.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            responsible: task.responsible.clone(),
            due_date: task.due_date,
            project: task.project.clone(),
            privacy: task.privacy,
            shared_with: task.shared_with.clone(),
        }
    }
}

/// Raw `tasks` row as PostgREST returns it. Nullable columns are widened
/// here and tightened in [`TaskRow::into_task`].
#[derive(Clone, Debug, Deserialize)]
pub struct TaskRow {
    pub id: String,
    pub name: String,
    pub status: TaskStatus,
    pub description: Option<String>,
    pub responsible: String,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub project: String,
    #[serde(default)]
    pub privacy: Option<TaskPrivacy>,
    #[serde(default)]
    pub shared_with: Option<serde_json::Value>,
    #[serde(default)]
    pub created_by: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TaskRow {
    /// Join a raw row with its comments into the domain shape.
    pub fn into_task(self, comments: Vec<TaskComment>) -> Task {
        let shared_with = shared_with_list(self.shared_with.as_ref());
        Task {
            id: self.id,
            name: self.name,
            status: self.status,
            description: self.description.unwrap_or_default(),
            responsible: self.responsible,
            priority: self.priority,
            due_date: self.due_date,
            project: self.project,
            privacy: self.privacy.unwrap_or(TaskPrivacy::General),
            shared_with,
            created_by: self.created_by.unwrap_or_default(),
            comments,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// `shared_with` is a JSON column; anything other than an array is read as
/// an empty share list, and non-string entries are skipped.
fn shared_with_list(value: Option<&serde_json::Value>) -> Vec<String> {
    match value {
        Some(serde_json::Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.as_str().map(str::to_owned))
            .collect(),
        _ => Vec::new(),
    }
}

/// Raw `task_comments` row.
#[derive(Clone, Debug, Deserialize)]
pub struct CommentRow {
    pub id: String,
    pub task_id: String,
    pub text: String,
    pub date: String,
}

/// Join task rows with the flat comment list. Task order and per-task
/// comment order are both preserved; comments pointing at unknown tasks
/// are dropped.
pub fn assemble_tasks(rows: Vec<TaskRow>, comments: Vec<CommentRow>) -> Vec<Task> {
    let mut by_task: HashMap<String, Vec<TaskComment>> = HashMap::new();
    for comment in comments {
        by_task
            .entry(comment.task_id)
            .or_default()
            .push(TaskComment {
                id: comment.id,
                text: comment.text,
                date: comment.date,
            });
    }
    rows.into_iter()
        .map(|row| {
            let comments = by_task.remove(&row.id).unwrap_or_default();
            row.into_task(comments)
        })
        .collect()
}

/// Column set sent when creating a task.
#[derive(Clone, Debug, Serialize)]
pub struct TaskInsert {
    pub name: String,
    pub status: TaskStatus,
    pub description: String,
    pub responsible: String,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub project: String,
    pub privacy: TaskPrivacy,
    pub shared_with: Vec<String>,
    pub created_by: String,
}

/// Column set sent when updating a task.
#[derive(Clone, Debug, Serialize)]
pub struct TaskUpdate {
    pub name: String,
    pub status: TaskStatus,
    pub description: String,
    pub responsible: String,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub project: String,
    pub privacy: TaskPrivacy,
    pub shared_with: Vec<String>,
}

/// Column set sent when creating a comment.
#[derive(Clone, Debug, Serialize)]
pub struct CommentInsert {
    pub task_id: String,
    pub text: String,
    pub date: String,
}

#[cfg(test)]
pub(crate) fn task_fixture(name: &str) -> Task {
    let now = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
        .unwrap()
        .with_timezone(&Utc);
    Task {
        id: format!("id-{name}"),
        name: name.to_string(),
        description: String::new(),
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        responsible: String::new(),
        due_date: None,
        project: String::new(),
        privacy: TaskPrivacy::General,
        shared_with: Vec::new(),
        created_by: String::new(),
        comments: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}
