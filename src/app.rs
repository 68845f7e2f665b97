//! Application state: the signed-in user, the loaded board, and the
//! operations the commands perform against it.
//!
//! Every mutation follows the same shape: call the backend, invalidate
//! the task cache keys, refetch the full list. The board a caller sees is
//! therefore always the backend's view, never a locally patched one.

use std::time::Duration;

use chrono::Local;
use tracing::warn;

use crate::api::Api;
use crate::auth::AuthSession;
use crate::cache::{self, with_cache, Cache};
use crate::errors::AppError;
use crate::filter;
use crate::models::{
    assemble_tasks, CommentInsert, Task, TaskDraft, TaskFilters, TaskStats, TaskStatus, User,
};
use crate::visibility;

/// Users change rarely; their cache entry outlives the task TTL.
pub const USERS_TTL: Duration = Duration::from_secs(10 * 60);

/// The authenticated identity plus the username the board knows them by.
/// The username stays empty when the users table has no matching row.
#[derive(Clone, Debug)]
pub struct SessionUser {
    pub id: String,
    pub email: String,
    pub username: String,
}

pub struct App {
    pub api: Api,
    pub cache: Cache,
    pub tasks: Vec<Task>,
    pub users: Vec<User>,
    pub current_user: Option<SessionUser>,
}

impl App {
    pub fn new(api: Api) -> App {
        App {
            api,
            cache: Cache::new(),
            tasks: Vec::new(),
            users: Vec::new(),
            current_user: None,
        }
    }

    /// Username the visibility predicate runs under. An empty username
    /// reads as signed out.
    pub fn username(&self) -> Option<&str> {
        self.current_user
            .as_ref()
            .map(|user| user.username.as_str())
            .filter(|name| !name.is_empty())
    }

    async fn resolve_username(&mut self, user_id: &str, email: &str) -> String {
        let key = cache::keys::user_profile(user_id);
        let api = &self.api;
        let resolved = with_cache(&mut self.cache, &key, None, || api.fetch_username(email)).await;
        match resolved {
            Ok(Some(username)) => username,
            Ok(None) => {
                warn!("no users row for {email}; private tasks will stay hidden");
                String::new()
            }
            Err(err) => {
                warn!("could not resolve a username for {email}: {err}");
                String::new()
            }
        }
    }

    /// Adopt a previously stored session.
    pub async fn restore(&mut self, session: AuthSession) {
        self.api.set_access_token(Some(session.access_token.clone()));
        let username = self.resolve_username(&session.user_id, &session.email).await;
        self.current_user = Some(SessionUser {
            id: session.user_id,
            email: session.email,
            username,
        });
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), AppError> {
        self.api.sign_up(email, password).await
    }

    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let session = self.api.sign_in(email, password).await?;
        let username = self.resolve_username(&session.user_id, &session.email).await;
        self.current_user = Some(SessionUser {
            id: session.user_id.clone(),
            email: session.email.clone(),
            username,
        });
        Ok(session)
    }

    /// Sign out and forget everything user-scoped, even when the backend
    /// rejects the call.
    pub async fn sign_out(&mut self) -> Result<(), AppError> {
        let result = self.api.sign_out().await;
        self.current_user = None;
        self.cache.clear();
        result
    }

    /// Load the board: task rows newest first, comments joined in. Reads
    /// through the cache, so a fresh fetch only happens after expiry or
    /// invalidation.
    pub async fn refresh_tasks(&mut self) -> Result<(), AppError> {
        self.cache.cleanup();
        let api = &self.api;
        self.tasks = with_cache(&mut self.cache, cache::keys::TASKS, None, || async {
            let rows = api.fetch_task_rows().await?;
            let comments = api.fetch_comment_rows().await?;
            Ok(assemble_tasks(rows, comments))
        })
        .await?;
        Ok(())
    }

    fn validate_draft(draft: &TaskDraft) -> Result<(), AppError> {
        if draft.name.trim().is_empty() {
            return Err(AppError::Validation("A task needs a name".to_string()));
        }
        if draft.description.trim().is_empty() {
            return Err(AppError::Validation("A task needs a description".to_string()));
        }
        Ok(())
    }

    /// Create a task. The creator column records the signed-in username.
    pub async fn create_task(&mut self, draft: &TaskDraft) -> Result<Task, AppError> {
        Self::validate_draft(draft)?;
        let created_by = self.username().unwrap_or_default().to_string();
        let row = self.api.insert_task(&draft.to_insert(created_by)).await?;
        let task = row.into_task(Vec::new());
        self.cache.invalidate_tasks(Some(&task.id));
        self.refresh_tasks().await?;
        Ok(task)
    }

    /// Overwrite a task with the draft and rewrite its comment rows. The
    /// comments are deleted and reinserted as one replace step.
    pub async fn update_task(&mut self, task_id: &str, draft: &TaskDraft) -> Result<(), AppError> {
        Self::validate_draft(draft)?;
        let reinsert: Vec<CommentInsert> = {
            let existing = self.task(task_id).ok_or_else(|| unknown_task(task_id))?;
            existing
                .comments
                .iter()
                .map(|comment| CommentInsert {
                    task_id: task_id.to_string(),
                    text: comment.text.clone(),
                    date: comment.date.clone(),
                })
                .collect()
        };
        self.api.update_task(task_id, &draft.to_update()).await?;
        self.api.delete_task_comments(task_id).await?;
        self.api.insert_comments(&reinsert).await?;
        self.cache.invalidate_tasks(Some(task_id));
        self.refresh_tasks().await
    }

    pub async fn delete_task(&mut self, task_id: &str) -> Result<(), AppError> {
        self.api.delete_task(task_id).await?;
        self.cache.invalidate_tasks(Some(task_id));
        self.refresh_tasks().await
    }

    pub async fn set_status(&mut self, task_id: &str, status: TaskStatus) -> Result<(), AppError> {
        self.api.update_task_status(task_id, status).await?;
        self.cache.invalidate_tasks(Some(task_id));
        self.refresh_tasks().await
    }

    /// Step a task to the next workflow status and return the status it
    /// landed on.
    pub async fn advance_status(&mut self, task_id: &str) -> Result<TaskStatus, AppError> {
        let current = self
            .task(task_id)
            .map(|task| task.status)
            .ok_or_else(|| unknown_task(task_id))?;
        let next = current.next();
        self.set_status(task_id, next).await?;
        Ok(next)
    }

    pub async fn add_comment(&mut self, task_id: &str, text: &str) -> Result<(), AppError> {
        if text.trim().is_empty() {
            return Err(AppError::Validation("A comment needs some text".to_string()));
        }
        if self.task(task_id).is_none() {
            return Err(unknown_task(task_id));
        }
        let comment = CommentInsert {
            task_id: task_id.to_string(),
            text: text.to_string(),
            date: Local::now().date_naive().to_string(),
        };
        self.api.insert_comments(&[comment]).await?;
        self.cache.invalidate_tasks(Some(task_id));
        self.refresh_tasks().await
    }

    pub async fn remove_comment(
        &mut self,
        task_id: &str,
        comment_id: &str,
    ) -> Result<(), AppError> {
        let owns = self
            .task(task_id)
            .map(|task| task.comments.iter().any(|c| c.id == comment_id))
            .ok_or_else(|| unknown_task(task_id))?;
        if !owns {
            return Err(AppError::Validation(format!(
                "Task {task_id} has no comment {comment_id}"
            )));
        }
        self.api.delete_comment(comment_id).await?;
        self.cache.invalidate_tasks(Some(task_id));
        self.refresh_tasks().await
    }

    pub async fn fetch_users(&mut self) -> Result<(), AppError> {
        let api = &self.api;
        self.users = with_cache(&mut self.cache, cache::keys::USERS, Some(USERS_TTL), || {
            api.fetch_users()
        })
        .await?;
        Ok(())
    }

    pub async fn refetch_users(&mut self) -> Result<(), AppError> {
        self.cache.invalidate(cache::keys::USERS);
        self.fetch_users().await
    }

    /// The loaded tasks the signed-in user may see.
    pub fn visible_tasks(&self) -> Vec<&Task> {
        visibility::visible_tasks(&self.tasks, self.username())
    }

    /// Visibility first, then the filter pipeline.
    pub fn filtered_tasks(&self, filters: &TaskFilters) -> Vec<&Task> {
        filter::filter_tasks(self.visible_tasks(), filters)
    }

    pub fn stats(&self) -> TaskStats {
        filter::task_stats(self.visible_tasks())
    }

    pub fn project_names(&self) -> Vec<String> {
        filter::project_names(self.visible_tasks())
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == task_id)
    }

    /// Resolve a user-supplied identifier against the visible tasks: an
    /// exact id, a unique id prefix, or an exact name.
    pub fn resolve_task_id(&self, needle: &str) -> Result<String, AppError> {
        if needle.is_empty() {
            return Err(AppError::Validation("No task matches ''".to_string()));
        }
        let visible = self.visible_tasks();
        if let Some(task) = visible.iter().find(|task| task.id == needle) {
            return Ok(task.id.clone());
        }

        let by_prefix: Vec<&&Task> = visible
            .iter()
            .filter(|task| task.id.starts_with(needle))
            .collect();
        match by_prefix.len() {
            1 => return Ok(by_prefix[0].id.clone()),
            n if n > 1 => {
                return Err(AppError::Validation(format!(
                    "'{needle}' matches more than one task id"
                )))
            }
            _ => {}
        }

        let by_name: Vec<&&Task> = visible
            .iter()
            .filter(|task| task.name == needle)
            .collect();
        match by_name.len() {
            1 => Ok(by_name[0].id.clone()),
            0 => Err(AppError::Validation(format!("No task matches '{needle}'"))),
            _ => Err(AppError::Validation(format!(
                "'{needle}' names more than one task; use the id"
            ))),
        }
    }
}

fn unknown_task(task_id: &str) -> AppError {
    AppError::Validation(format!("No task with id {task_id}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::{task_fixture, TaskPrivacy};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(server: &MockServer) -> App {
        App::new(Api::new(&Config {
            supabase_url: server.uri(),
            supabase_anon_key: "anon-key".to_string(),
        }))
    }

    fn signed_in(app: &mut App, username: &str) {
        app.current_user = Some(SessionUser {
            id: "user-1".to_string(),
            email: format!("{username}@example.com"),
            username: username.to_string(),
        });
    }

    fn task_row_json(id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "name": format!("task {id}"),
            "status": status,
            "description": "desc",
            "responsible": "mirella",
            "priority": "medium",
            "due_date": null,
            "project": "board",
            "privacy": "general",
            "shared_with": [],
            "created_by": "ivo",
            "created_at": "2024-05-01T10:00:00Z",
            "updated_at": "2024-05-01T10:00:00Z"
        })
    }

    #[tokio::test]
    async fn refresh_joins_comments_and_serves_repeats_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tasks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([task_row_json("t1", "pending")])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/task_comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "c1", "task_id": "t1", "text": "first", "date": "2024-05-01" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.refresh_tasks().await.unwrap();
        app.refresh_tasks().await.unwrap();

        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.tasks[0].comments.len(), 1);
        assert_eq!(app.tasks[0].comments[0].text, "first");
    }

    #[tokio::test]
    async fn create_task_requires_name_and_description() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);

        let unnamed = TaskDraft {
            description: "desc".to_string(),
            ..TaskDraft::default()
        };
        let err = app.create_task(&unnamed).await.unwrap_err();
        assert_eq!(err, AppError::Validation("A task needs a name".to_string()));

        let undescribed = TaskDraft {
            name: "report".to_string(),
            description: "   ".to_string(),
            ..TaskDraft::default()
        };
        let err = app.create_task(&undescribed).await.unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("A task needs a description".to_string())
        );
    }

    #[tokio::test]
    async fn create_task_records_the_creator_and_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/tasks"))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!([task_row_json("t9", "pending")])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tasks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([task_row_json("t9", "pending")])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/task_comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        signed_in(&mut app, "ivo");
        let draft = TaskDraft {
            name: "write report".to_string(),
            description: "numbers".to_string(),
            ..TaskDraft::default()
        };
        let created = app.create_task(&draft).await.unwrap();
        assert_eq!(created.id, "t9");
        assert_eq!(app.tasks.len(), 1);
    }

    #[tokio::test]
    async fn advance_steps_along_the_cycle_and_patches_the_next_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tasks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([task_row_json("t1", "review")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/task_comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/tasks"))
            .and(query_param("id", "eq.t1"))
            .and(body_json(json!({ "status": "completed" })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.refresh_tasks().await.unwrap();
        let landed = app.advance_status("t1").await.unwrap();
        assert_eq!(landed, TaskStatus::Completed);
    }

    #[tokio::test]
    async fn advance_rejects_unknown_ids_before_touching_the_backend() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);
        let err = app.advance_status("nope").await.unwrap_err();
        assert_eq!(err, AppError::Validation("No task with id nope".to_string()));
    }

    #[tokio::test]
    async fn remove_comment_checks_ownership_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tasks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([task_row_json("t1", "pending")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/task_comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "c1", "task_id": "t1", "text": "first", "date": "2024-05-01" }
            ])))
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.refresh_tasks().await.unwrap();
        let err = app.remove_comment("t1", "c999").await.unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("Task t1 has no comment c999".to_string())
        );
    }

    #[tokio::test]
    async fn update_rewrites_the_comment_thread_and_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tasks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([task_row_json("t1", "pending")])),
            )
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/task_comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "c1", "task_id": "t1", "text": "first", "date": "2024-05-01" },
                { "id": "c2", "task_id": "t1", "text": "second", "date": "2024-05-02" }
            ])))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/tasks"))
            .and(query_param("id", "eq.t1"))
            .and(body_json(json!({
                "name": "task t1",
                "status": "pending",
                "description": "new numbers",
                "responsible": "mirella",
                "priority": "medium",
                "due_date": null,
                "project": "board",
                "privacy": "general",
                "shared_with": []
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/task_comments"))
            .and(query_param("task_id", "eq.t1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        // The thread is reinserted as one array body, ids left to the backend.
        Mock::given(method("POST"))
            .and(path("/rest/v1/task_comments"))
            .and(body_json(json!([
                { "task_id": "t1", "text": "first", "date": "2024-05-01" },
                { "task_id": "t1", "text": "second", "date": "2024-05-02" }
            ])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.refresh_tasks().await.unwrap();
        let mut draft = TaskDraft::from_task(app.task("t1").unwrap());
        draft.description = "new numbers".to_string();
        app.update_task("t1", &draft).await.unwrap();
    }

    #[tokio::test]
    async fn update_of_an_uncommented_task_skips_the_reinsert() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tasks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([task_row_json("t2", "pending")])),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/task_comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/tasks"))
            .and(query_param("id", "eq.t2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/task_comments"))
            .and(query_param("task_id", "eq.t2"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/task_comments"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.refresh_tasks().await.unwrap();
        let draft = TaskDraft::from_task(app.task("t2").unwrap());
        app.update_task("t2", &draft).await.unwrap();
    }

    #[tokio::test]
    async fn add_comment_inserts_one_row_and_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tasks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([task_row_json("t1", "pending")])),
            )
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/task_comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(2)
            .mount(&server)
            .await;
        let today = Local::now().date_naive().to_string();
        Mock::given(method("POST"))
            .and(path("/rest/v1/task_comments"))
            .and(body_json(json!([
                { "task_id": "t1", "text": "waiting on the figures", "date": today }
            ])))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.refresh_tasks().await.unwrap();
        app.add_comment("t1", "waiting on the figures").await.unwrap();
    }

    #[tokio::test]
    async fn add_comment_rejects_blank_text_before_touching_the_backend() {
        let server = MockServer::start().await;
        let mut app = app_for(&server);
        let err = app.add_comment("t1", "   ").await.unwrap_err();
        assert_eq!(
            err,
            AppError::Validation("A comment needs some text".to_string())
        );
    }

    #[tokio::test]
    async fn remove_comment_deletes_the_row_and_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/tasks"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!([task_row_json("t1", "pending")])),
            )
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/task_comments"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": "c1", "task_id": "t1", "text": "first", "date": "2024-05-01" }
            ])))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/task_comments"))
            .and(query_param("id", "eq.c1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.refresh_tasks().await.unwrap();
        app.remove_comment("t1", "c1").await.unwrap();
    }

    #[tokio::test]
    async fn sign_out_forgets_the_user_even_when_the_backend_refuses() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(
                ResponseTemplate::new(401).set_body_json(json!({ "msg": "JWT expired" })),
            )
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        signed_in(&mut app, "ivo");
        app.cache.set("tasks", 1u8, None);

        assert!(app.sign_out().await.is_err());
        assert!(app.current_user.is_none());
        assert!(app.cache.is_empty());
    }

    #[tokio::test]
    async fn users_are_cached_until_explicitly_refetched() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "id": "u1",
                "email": "ivo@example.com",
                "username": "Ivo",
                "created_at": "2024-05-01T10:00:00Z",
                "updated_at": "2024-05-01T10:00:00Z"
            }])))
            .expect(2)
            .mount(&server)
            .await;

        let mut app = app_for(&server);
        app.fetch_users().await.unwrap();
        app.fetch_users().await.unwrap();
        app.refetch_users().await.unwrap();
        assert_eq!(app.users.len(), 1);
        assert_eq!(app.users[0].username, "Ivo");
    }

    #[test]
    fn derived_views_run_over_the_visible_subset() {
        let mut app = App::new(Api::new(&Config {
            supabase_url: "http://localhost".to_string(),
            supabase_anon_key: "anon-key".to_string(),
        }));
        signed_in(&mut app, "lucas");

        let open = task_fixture("open");
        let mut secret = task_fixture("secret");
        secret.privacy = TaskPrivacy::Private;
        secret.responsible = "mirella".to_string();
        secret.created_by = "ivo".to_string();
        let mut mine = task_fixture("mine");
        mine.privacy = TaskPrivacy::Private;
        mine.shared_with = vec!["lucas".to_string()];
        app.tasks = vec![open, secret, mine];

        assert_eq!(app.visible_tasks().len(), 2);
        assert_eq!(app.stats().total, 2);

        let filters = TaskFilters {
            search: Some("mine".to_string()),
            ..TaskFilters::default()
        };
        let hits = app.filtered_tasks(&filters);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "mine");
    }

    #[test]
    fn identifiers_resolve_by_id_prefix_or_name() {
        let mut app = App::new(Api::new(&Config {
            supabase_url: "http://localhost".to_string(),
            supabase_anon_key: "anon-key".to_string(),
        }));
        app.tasks = vec![task_fixture("alpha"), task_fixture("beta")];
        // Fixture ids look like id-alpha / id-beta.

        assert_eq!(app.resolve_task_id("id-alpha").unwrap(), "id-alpha");
        assert_eq!(app.resolve_task_id("id-b").unwrap(), "id-beta");
        assert_eq!(app.resolve_task_id("beta").unwrap(), "id-beta");
        assert!(app.resolve_task_id("id-").is_err());
        assert!(app.resolve_task_id("gamma").is_err());
        assert!(app.resolve_task_id("").is_err());
    }
}
