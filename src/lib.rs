//! Client library for a Supabase-backed shared task board.
//!
//! The backend is a plain backend-as-a-service: PostgREST table endpoints
//! for `tasks`, `task_comments` and `users`, and GoTrue auth endpoints for
//! sign up, sign in and sign out. Everything here is a thin client over
//! those two surfaces plus the in-memory state an application needs: a
//! TTL cache for remote reads, the task visibility rules, and a pure
//! filter pipeline.

pub mod api;
pub mod app;
pub mod auth;
pub mod cache;
pub mod config;
pub mod errors;
pub mod filter;
pub mod models;
pub mod parser;
pub mod ui;
pub mod visibility;
