//! Command line surface.

use clap::{Parser, Subcommand};

use tareas::models::{TaskPriority, TaskPrivacy, TaskStatus};

/// Shared task boards from the terminal.
#[derive(Parser)]
#[command(
    name = "tareas",
    version,
    about = "A command line client for Supabase-backed shared task boards"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account.
    Signup {
        /// Email address to register.
        email: String,
        /// Password. Read from TAREAS_PASSWORD when omitted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign in and store the session for later commands.
    Login {
        /// Email address of the account.
        email: String,
        /// Password. Read from TAREAS_PASSWORD when omitted.
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and discard the stored session.
    Logout,

    /// List the tasks you can see, with optional filters.
    List {
        /// Match against name, description, and project.
        #[arg(long)]
        search: Option<String>,
        /// Statuses, comma separated: pending | in-progress | review | completed.
        #[arg(long)]
        status: Option<String>,
        /// Responsible usernames, comma separated.
        #[arg(long)]
        responsible: Option<String>,
        /// Priorities, comma separated: high | medium | low.
        #[arg(long)]
        priority: Option<String>,
        /// Projects, comma separated.
        #[arg(long)]
        project: Option<String>,
        /// Privacy levels, comma separated: private | general.
        #[arg(long)]
        privacy: Option<String>,
        /// Due month, YYYY-MM.
        #[arg(long)]
        month: Option<String>,
    },

    /// View a single task by id, unique id prefix, or name.
    Show {
        /// Task id, id prefix, or name.
        task: String,
    },

    /// Add a task.
    Add {
        /// Short name for the task.
        name: String,
        /// Longer description.
        #[arg(long)]
        description: String,
        /// Responsible username. Defaults to the signed-in user.
        #[arg(long)]
        responsible: Option<String>,
        /// Priority level.
        #[arg(long, value_enum, default_value_t = TaskPriority::Medium)]
        priority: TaskPriority,
        /// Starting status.
        #[arg(long, value_enum, default_value_t = TaskStatus::Pending)]
        status: TaskStatus,
        /// Due date, YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
        /// Project name.
        #[arg(long)]
        project: Option<String>,
        /// Privacy level.
        #[arg(long, value_enum, default_value_t = TaskPrivacy::General)]
        privacy: TaskPrivacy,
        /// Usernames to share a private task with, comma separated.
        #[arg(long)]
        share: Option<String>,
    },

    /// Edit a task. Flags left unset keep their current value.
    Edit {
        /// Task id, id prefix, or name.
        task: String,
        /// New name.
        #[arg(long)]
        name: Option<String>,
        /// New description.
        #[arg(long)]
        description: Option<String>,
        /// New responsible username.
        #[arg(long)]
        responsible: Option<String>,
        /// New priority level.
        #[arg(long, value_enum)]
        priority: Option<TaskPriority>,
        /// New status.
        #[arg(long, value_enum)]
        status: Option<TaskStatus>,
        /// New due date, YYYY-MM-DD.
        #[arg(long)]
        due: Option<String>,
        /// Remove the due date.
        #[arg(long, conflicts_with = "due")]
        clear_due: bool,
        /// New project name.
        #[arg(long)]
        project: Option<String>,
        /// New privacy level.
        #[arg(long, value_enum)]
        privacy: Option<TaskPrivacy>,
        /// Replacement share list, comma separated.
        #[arg(long)]
        share: Option<String>,
    },

    /// Advance a task to the next workflow status.
    Advance {
        /// Task id, id prefix, or name.
        task: String,
    },

    /// Delete a task and its comments.
    Rm {
        /// Task id, id prefix, or name.
        task: String,
    },

    /// Comment on a task.
    Comment {
        /// Task id, id prefix, or name.
        task: String,
        /// Comment text.
        text: String,
    },

    /// Delete a comment from a task.
    Uncomment {
        /// Task id, id prefix, or name.
        task: String,
        /// Id of the comment to delete, as shown by `show`.
        comment_id: String,
    },

    /// Show board counters for the tasks you can see.
    Stats,

    /// List registered users.
    Users,

    /// List project names in use.
    Projects,
}
