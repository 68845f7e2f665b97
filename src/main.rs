mod cli;

use clap::Parser;
use tracing::debug;

use tareas::api::Api;
use tareas::app::App;
use tareas::auth;
use tareas::config::Config;
use tareas::errors::AppError;
use tareas::models::{TaskDraft, TaskFilters};
use tareas::parser;
use tareas::ui;

use crate::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(err) = run(cli).await {
        err.log();
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::load()?;
    let mut app = App::new(Api::new(&config));

    let session_path = auth::session_path();
    let mut restored = false;
    if let Some(path) = &session_path {
        if let Some(session) = auth::load(path) {
            debug!(email = %session.email, "restoring stored session");
            app.restore(session).await;
            restored = true;
        }
    }

    match cli.command {
        Commands::Signup { email, password } => {
            let password = resolve_password(password)?;
            app.sign_up(&email, &password)
                .await
                .map_err(signup_feedback)?;
            println!(
                "Account created for {email}. Confirm the email if your backend requires it, then sign in with `tareas login`."
            );
        }
        Commands::Login { email, password } => {
            let password = resolve_password(password)?;
            let session = app.sign_in(&email, &password).await?;
            if let Some(path) = &session_path {
                auth::store(path, &session)?;
            }
            match app.username() {
                Some(name) => println!("Signed in as {name}."),
                None => println!("Signed in as {email}."),
            }
        }
        Commands::Logout => {
            if let Some(path) = &session_path {
                auth::clear(path)?;
            }
            if restored {
                app.sign_out().await?;
            }
            println!("Signed out.");
        }
        Commands::List {
            search,
            status,
            responsible,
            priority,
            project,
            privacy,
            month,
        } => {
            let filters = TaskFilters {
                search,
                status: status.as_deref().map(parser::parse_status_list).transpose()?,
                responsible: responsible.as_deref().map(parser::parse_list),
                priority: priority
                    .as_deref()
                    .map(parser::parse_priority_list)
                    .transpose()?,
                project: project.as_deref().map(parser::parse_list),
                privacy: privacy
                    .as_deref()
                    .map(parser::parse_privacy_list)
                    .transpose()?,
                month: month.as_deref().map(parser::parse_month).transpose()?,
            };
            app.refresh_tasks().await?;
            let visible = app.visible_tasks().len();
            let hits = app.filtered_tasks(&filters);
            ui::print_task_table(&hits);
            println!("Showing {} of {} tasks", hits.len(), visible);
        }
        Commands::Show { task } => {
            app.refresh_tasks().await?;
            let id = app.resolve_task_id(&task)?;
            match app.task(&id) {
                Some(task) => ui::print_task_detail(task),
                None => return Err(AppError::Validation(format!("No task with id {id}"))),
            }
        }
        Commands::Add {
            name,
            description,
            responsible,
            priority,
            status,
            due,
            project,
            privacy,
            share,
        } => {
            let draft = TaskDraft {
                name,
                description,
                responsible: responsible
                    .or_else(|| app.username().map(str::to_string))
                    .unwrap_or_default(),
                priority,
                status,
                due_date: due.as_deref().map(parser::parse_due).transpose()?,
                project: project.unwrap_or_default(),
                privacy,
                shared_with: share.as_deref().map(parser::parse_list).unwrap_or_default(),
            };
            let created = app.create_task(&draft).await?;
            println!("Added '{}' as {}.", created.name, ui::short_id(&created.id));
        }
        Commands::Edit {
            task,
            name,
            description,
            responsible,
            priority,
            status,
            due,
            clear_due,
            project,
            privacy,
            share,
        } => {
            app.refresh_tasks().await?;
            let id = app.resolve_task_id(&task)?;
            let mut draft = match app.task(&id) {
                Some(current) => TaskDraft::from_task(current),
                None => return Err(AppError::Validation(format!("No task with id {id}"))),
            };
            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(responsible) = responsible {
                draft.responsible = responsible;
            }
            if let Some(priority) = priority {
                draft.priority = priority;
            }
            if let Some(status) = status {
                draft.status = status;
            }
            if let Some(due) = due.as_deref() {
                draft.due_date = Some(parser::parse_due(due)?);
            }
            if clear_due {
                draft.due_date = None;
            }
            if let Some(project) = project {
                draft.project = project;
            }
            if let Some(privacy) = privacy {
                draft.privacy = privacy;
            }
            if let Some(share) = share.as_deref() {
                draft.shared_with = parser::parse_list(share);
            }
            app.update_task(&id, &draft).await?;
            println!("Updated {}.", ui::short_id(&id));
        }
        Commands::Advance { task } => {
            app.refresh_tasks().await?;
            let id = app.resolve_task_id(&task)?;
            let landed = app.advance_status(&id).await?;
            println!("{} moved to {landed}.", ui::short_id(&id));
        }
        Commands::Rm { task } => {
            app.refresh_tasks().await?;
            let id = app.resolve_task_id(&task)?;
            app.delete_task(&id).await?;
            println!("Deleted {}.", ui::short_id(&id));
        }
        Commands::Comment { task, text } => {
            app.refresh_tasks().await?;
            let id = app.resolve_task_id(&task)?;
            app.add_comment(&id, &text).await?;
            println!("Comment added to {}.", ui::short_id(&id));
        }
        Commands::Uncomment { task, comment_id } => {
            app.refresh_tasks().await?;
            let id = app.resolve_task_id(&task)?;
            app.remove_comment(&id, &comment_id).await?;
            println!("Comment removed from {}.", ui::short_id(&id));
        }
        Commands::Stats => {
            app.refresh_tasks().await?;
            ui::print_stats(&app.stats());
        }
        Commands::Users => {
            app.fetch_users().await?;
            ui::print_users(&app.users);
        }
        Commands::Projects => {
            app.refresh_tasks().await?;
            ui::print_projects(&app.project_names());
        }
    }

    Ok(())
}

fn resolve_password(flag: Option<String>) -> Result<String, AppError> {
    if let Some(password) = flag {
        return Ok(password);
    }
    match std::env::var("TAREAS_PASSWORD") {
        Ok(password) if !password.is_empty() => Ok(password),
        _ => Err(AppError::Validation(
            "Provide a password with --password or the TAREAS_PASSWORD variable".to_string(),
        )),
    }
}

/// Friendlier wording for the raw messages GoTrue returns on signup.
fn signup_feedback(err: AppError) -> AppError {
    let raw = match &err {
        AppError::Unknown(raw) => raw,
        _ => return err,
    };
    if raw.contains("User already registered") {
        AppError::Validation("An account with this email already exists".to_string())
    } else if raw.contains("Password should be at least 6 characters") {
        AppError::Validation("Passwords need at least 6 characters".to_string())
    } else if raw.contains("Invalid email") {
        AppError::Validation("That email address does not look valid".to_string())
    } else {
        err
    }
}
