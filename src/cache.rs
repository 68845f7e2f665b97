//! In-memory TTL cache for backend reads.
//!
//! Values are stored type-erased under string keys and expire lazily: an
//! entry past its TTL is removed the next time it is looked up, and
//! [`Cache::cleanup`] sweeps the rest. Invalidation works on exact keys or
//! on regex patterns over the key space.

use std::any::Any;
use std::collections::HashMap;
use std::future::Future;
use std::time::{Duration, Instant};

use regex::Regex;

use crate::errors::AppError;

/// TTL applied when `set` is not given one.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Well-known cache keys shared by the application layer.
pub mod keys {
    pub const USERS: &str = "users";
    pub const TASKS: &str = "tasks";

    pub fn user_tasks(user_id: &str) -> String {
        format!("user_{user_id}_tasks")
    }

    pub fn user_profile(user_id: &str) -> String {
        format!("user_{user_id}_profile")
    }

    pub fn task_comments(task_id: &str) -> String {
        format!("task_{task_id}_comments")
    }
}

struct CacheEntry {
    data: Box<dyn Any + Send + Sync>,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn expired(&self) -> bool {
        self.stored_at.elapsed() > self.ttl
    }
}

#[derive(Default)]
pub struct Cache {
    entries: HashMap<String, CacheEntry>,
}

impl Cache {
    pub fn new() -> Cache {
        Cache::default()
    }

    pub fn set<T>(&mut self, key: &str, data: T, ttl: Option<Duration>)
    where
        T: Any + Send + Sync,
    {
        let entry = CacheEntry {
            data: Box::new(data),
            stored_at: Instant::now(),
            ttl: ttl.unwrap_or(DEFAULT_TTL),
        };
        self.entries.insert(key.to_string(), entry);
    }

    /// Look up a live entry. An expired entry is removed and reads as a
    /// miss, as does a hit stored under a different type.
    pub fn get<T>(&mut self, key: &str) -> Option<T>
    where
        T: Any + Clone,
    {
        let expired = match self.entries.get(key) {
            Some(entry) => entry.expired(),
            None => return None,
        };
        if expired {
            self.entries.remove(key);
            return None;
        }
        self.entries
            .get(key)
            .and_then(|entry| entry.data.downcast_ref::<T>())
            .cloned()
    }

    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }

    /// Remove every key the regex matches. An invalid pattern removes
    /// nothing.
    pub fn invalidate_pattern(&mut self, pattern: &str) {
        let re = match Regex::new(pattern) {
            Ok(re) => re,
            Err(_) => return,
        };
        self.entries.retain(|key, _| !re.is_match(key));
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Sweep expired entries.
    pub fn cleanup(&mut self) {
        self.entries.retain(|_, entry| !entry.expired());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Drop everything cached for one user: their profile key and every
    /// key in their namespace.
    pub fn invalidate_user(&mut self, user_id: &str) {
        self.invalidate(&keys::user_profile(user_id));
        self.invalidate_pattern(&format!("user_{user_id}_"));
    }

    /// Drop the shared task list, the given task's comments, and every
    /// per-user task list.
    pub fn invalidate_tasks(&mut self, task_id: Option<&str>) {
        self.invalidate(keys::TASKS);
        if let Some(task_id) = task_id {
            self.invalidate(&keys::task_comments(task_id));
        }
        self.invalidate_pattern("user_.*_tasks");
    }
}

/// Serve `key` from the cache, or run `fetch` and store its result.
/// Failed fetches are returned as-is and never cached.
pub async fn with_cache<T, F, Fut>(
    cache: &mut Cache,
    key: &str,
    ttl: Option<Duration>,
    fetch: F,
) -> Result<T, AppError>
where
    T: Any + Clone + Send + Sync,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    if let Some(hit) = cache.get::<T>(key) {
        return Ok(hit);
    }
    let value = fetch().await?;
    cache.set(key, value.clone(), ttl);
    Ok(value)
}
