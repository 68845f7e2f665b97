//! Stored sign-in session.
//!
//! A successful sign-in is kept as a small JSON file so later invocations
//! reuse the access token until it expires. There is no refresh flow: an
//! expired or unreadable session file is discarded and the user signs in
//! again.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::app_config_dir;
use crate::errors::AppError;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    pub user_id: String,
    pub email: String,
    pub expires_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

/// Where the session file lives for this user.
pub fn session_path() -> Option<PathBuf> {
    app_config_dir().map(|dir| dir.join("session.json"))
}

/// Read a stored session. Missing, unreadable, or expired files all read
/// as "not signed in"; the stale file is removed on the way out.
pub fn load(path: &Path) -> Option<AuthSession> {
    let contents = fs::read_to_string(path).ok()?;
    let session: AuthSession = match serde_json::from_str(&contents) {
        Ok(session) => session,
        Err(err) => {
            debug!("discarding unreadable session file: {err}");
            let _ = fs::remove_file(path);
            return None;
        }
    };
    if session.is_expired() {
        debug!("discarding expired session for {}", session.email);
        let _ = fs::remove_file(path);
        return None;
    }
    Some(session)
}

pub fn store(path: &Path, session: &AuthSession) -> Result<(), AppError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let contents = serde_json::to_string(session)
        .map_err(|err| AppError::Unknown(err.to_string()))?;
    fs::write(path, contents)?;
    Ok(())
}

pub fn clear(path: &Path) -> Result<(), AppError> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}
