//! Eduplan - a local study planner library.
//!
//! This library provides the core functionality for the `ep` CLI tool:
//! account registration and login, per-account task lists, productivity
//! statistics, and a countdown focus timer.

pub mod action_log;
pub mod cli;
pub mod commands;
pub mod models;
pub mod stats;
pub mod storage;
pub mod timer;


/// Library-level error type for eduplan operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Not logged in: run `ep login` or `ep register` first")]
    NotLoggedIn,

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for eduplan operations.
pub type Result<T> = std::result::Result<T, Error>;
