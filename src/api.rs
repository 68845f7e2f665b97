//! HTTP client for the Supabase backend.
//!
//! Tables are reached through the PostgREST surface under `/rest/v1`, auth
//! through GoTrue under `/auth/v1`. Every request carries the project
//! `apikey` header; the bearer token is the signed-in access token when
//! there is one and the anon key otherwise.

use chrono::{Duration, Utc};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::auth::AuthSession;
use crate::config::Config;
use crate::errors::AppError;
use crate::models::{CommentInsert, CommentRow, TaskInsert, TaskRow, TaskStatus, TaskUpdate, User};

pub struct Api {
    client: Client,
    base_url: String,
    anon_key: String,
    access_token: Option<String>,
}

#[derive(Deserialize)]
struct SignInResponse {
    access_token: String,
    expires_in: i64,
    user: AuthUser,
}

#[derive(Deserialize)]
struct AuthUser {
    id: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct UsernameRow {
    username: String,
}

impl Api {
    pub fn new(config: &Config) -> Api {
        Api {
            client: Client::new(),
            base_url: config.supabase_url.clone(),
            anon_key: config.supabase_anon_key.clone(),
            access_token: None,
        }
    }

    pub fn set_access_token(&mut self, token: Option<String>) {
        self.access_token = token;
    }

    fn bearer(&self) -> &str {
        self.access_token.as_deref().unwrap_or(&self.anon_key)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, url)
            .header("apikey", &self.anon_key)
            .header("Authorization", format!("Bearer {}", self.bearer()))
    }

    async fn check(res: Response) -> Result<Response, AppError> {
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.unwrap_or_default();
        let raw = error_message(status, &body);
        debug!(status = status.as_u16(), "backend error: {raw}");
        Err(AppError::classify(&raw))
    }

    pub async fn fetch_task_rows(&self) -> Result<Vec<TaskRow>, AppError> {
        let res = self
            .request(Method::GET, "/rest/v1/tasks")
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        Ok(Self::check(res).await?.json().await?)
    }

    pub async fn fetch_comment_rows(&self) -> Result<Vec<CommentRow>, AppError> {
        let res = self
            .request(Method::GET, "/rest/v1/task_comments")
            .query(&[("select", "*")])
            .send()
            .await?;
        Ok(Self::check(res).await?.json().await?)
    }

    /// Insert a task and return the stored row, ids and timestamps filled
    /// in by the backend.
    pub async fn insert_task(&self, insert: &TaskInsert) -> Result<TaskRow, AppError> {
        let res = self
            .request(Method::POST, "/rest/v1/tasks")
            .header("Prefer", "return=representation")
            .json(insert)
            .send()
            .await?;
        let mut rows: Vec<TaskRow> = Self::check(res).await?.json().await?;
        rows.pop()
            .ok_or_else(|| AppError::Database("The backend returned no row for the created task".to_string()))
    }

    pub async fn update_task(&self, task_id: &str, update: &TaskUpdate) -> Result<(), AppError> {
        let res = self
            .request(Method::PATCH, "/rest/v1/tasks")
            .query(&[("id", &format!("eq.{task_id}"))])
            .json(update)
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    /// PATCH only the status column.
    pub async fn update_task_status(
        &self,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<(), AppError> {
        let res = self
            .request(Method::PATCH, "/rest/v1/tasks")
            .query(&[("id", &format!("eq.{task_id}"))])
            .json(&json!({ "status": status }))
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    pub async fn delete_task(&self, task_id: &str) -> Result<(), AppError> {
        let res = self
            .request(Method::DELETE, "/rest/v1/tasks")
            .query(&[("id", &format!("eq.{task_id}"))])
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    pub async fn delete_task_comments(&self, task_id: &str) -> Result<(), AppError> {
        let res = self
            .request(Method::DELETE, "/rest/v1/task_comments")
            .query(&[("task_id", &format!("eq.{task_id}"))])
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    pub async fn insert_comments(&self, inserts: &[CommentInsert]) -> Result<(), AppError> {
        if inserts.is_empty() {
            return Ok(());
        }
        let res = self
            .request(Method::POST, "/rest/v1/task_comments")
            .json(inserts)
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<(), AppError> {
        let res = self
            .request(Method::DELETE, "/rest/v1/task_comments")
            .query(&[("id", &format!("eq.{comment_id}"))])
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    pub async fn fetch_users(&self) -> Result<Vec<User>, AppError> {
        let res = self
            .request(Method::GET, "/rest/v1/users")
            .query(&[("select", "*"), ("order", "username")])
            .send()
            .await?;
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            let raw = error_message(status, &body);
            return Err(AppError::Database(format!("Could not load users: {raw}")));
        }
        Ok(res.json().await?)
    }

    /// Resolve the username registered for an email address.
    pub async fn fetch_username(&self, email: &str) -> Result<Option<String>, AppError> {
        let email_filter = format!("eq.{email}");
        let res = self
            .request(Method::GET, "/rest/v1/users")
            .query(&[("select", "username"), ("email", email_filter.as_str())])
            .send()
            .await?;
        let rows: Vec<UsernameRow> = Self::check(res).await?.json().await?;
        Ok(rows.into_iter().next().map(|row| row.username))
    }

    pub async fn sign_up(&self, email: &str, password: &str) -> Result<(), AppError> {
        let res = self
            .request(Method::POST, "/auth/v1/signup")
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Self::check(res).await?;
        Ok(())
    }

    /// Exchange credentials for an access token. The token is kept on the
    /// client for subsequent requests and returned as a storable session.
    pub async fn sign_in(&mut self, email: &str, password: &str) -> Result<AuthSession, AppError> {
        let res = self
            .request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        let grant: SignInResponse = Self::check(res).await?.json().await?;

        let session = AuthSession {
            access_token: grant.access_token,
            user_id: grant.user.id,
            email: grant.user.email.unwrap_or_else(|| email.to_string()),
            expires_at: Utc::now() + Duration::seconds(grant.expires_in),
        };
        self.access_token = Some(session.access_token.clone());
        Ok(session)
    }

    /// Revoke the access token. The local token is dropped even when the
    /// backend rejects the call.
    pub async fn sign_out(&mut self) -> Result<(), AppError> {
        let res = self.request(Method::POST, "/auth/v1/logout").send().await;
        self.access_token = None;
        Self::check(res?).await?;
        Ok(())
    }
}

/// Pull the human-readable message out of a backend error body. GoTrue and
/// PostgREST disagree on the field name, so try the known ones in turn.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for field in ["message", "error_description", "msg", "error"] {
            if let Some(text) = value.get(field).and_then(|v| v.as_str()) {
                return text.to_string();
            }
        }
    }
    if body.trim().is_empty() {
        format!("HTTP {status}")
    } else {
        body.trim().to_string()
    }
}
