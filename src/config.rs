//! Backend connection settings.
//!
//! Settings come from the environment first (`SUPABASE_URL` and
//! `SUPABASE_ANON_KEY`, a `.env` file counts) and otherwise from
//! `config.toml` in the application config directory.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::AppError;

const URL_VAR: &str = "SUPABASE_URL";
const ANON_KEY_VAR: &str = "SUPABASE_ANON_KEY";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

/// Directory holding `config.toml` and the session file.
pub fn app_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("tareas"))
}

impl Config {
    /// Resolve settings from the environment, falling back to the config
    /// file.
    pub fn load() -> Result<Config, AppError> {
        let url = env::var(URL_VAR).ok().filter(|v| !v.is_empty());
        let anon_key = env::var(ANON_KEY_VAR).ok().filter(|v| !v.is_empty());
        if let (Some(supabase_url), Some(supabase_anon_key)) = (url, anon_key) {
            return Ok(Config {
                supabase_url,
                supabase_anon_key,
            }
            .normalized());
        }

        let path = app_config_dir()
            .map(|dir| dir.join("config.toml"))
            .filter(|path| path.exists())
            .ok_or_else(|| {
                AppError::Validation(format!(
                    "No backend configured. Set {URL_VAR} and {ANON_KEY_VAR}, \
                     or create config.toml in the tareas config directory"
                ))
            })?;
        Config::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Config, AppError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)
            .map_err(|err| AppError::Validation(format!("Invalid config file: {err}")))?;
        Ok(config.normalized())
    }

    /// URLs are joined with path fragments later; a trailing slash would
    /// produce `//` paths.
    fn normalized(mut self) -> Config {
        while self.supabase_url.ends_with('/') {
            self.supabase_url.pop();
        }
        self
    }
}
