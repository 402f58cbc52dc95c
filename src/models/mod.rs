//! Data models for eduplan entities.
//!
//! This module defines the core data structures:
//! - `Account` - A registered user with credentials and preferences
//! - `Task` - Work items with subject, deadline, priority, and status
//! - `StudySession` - A logged interval of focused study time
//! - `AccountView` - An account as shown to the user (no password)

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task status in the workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    Progress,
    Review,
    Done,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Progress => "progress",
            TaskStatus::Review => "review",
            TaskStatus::Done => "done",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "todo" => Ok(TaskStatus::Todo),
            "progress" | "in_progress" | "in-progress" => Ok(TaskStatus::Progress),
            "review" => Ok(TaskStatus::Review),
            "done" => Ok(TaskStatus::Done),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Color theme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

/// Per-account preference settings, created with defaults at registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    /// Color theme
    #[serde(default)]
    pub theme: Theme,

    /// Whether to show notifications
    #[serde(default = "default_notifications")]
    pub notifications: bool,
}

fn default_notifications() -> bool {
    true
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            notifications: true,
        }
    }
}

/// A registered user account.
///
/// The password is stored and compared in plaintext. This matches the
/// single-user local store this tool targets and is not a security
/// boundary; it must never be printed or logged (see `AccountView`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier (e.g., "epu-a1b2c3d4")
    pub id: String,

    /// Unique username
    pub username: String,

    /// Unique email address
    pub email: String,

    /// Plaintext password
    pub password: String,

    /// Registration timestamp
    pub joined_at: DateTime<Utc>,

    /// Preference settings
    #[serde(default)]
    pub preferences: Preferences,
}

impl Account {
    /// Create a new account with default preferences.
    pub fn new(id: String, username: String, email: String, password: String) -> Self {
        Self {
            id,
            username,
            email,
            password,
            joined_at: Utc::now(),
            preferences: Preferences::default(),
        }
    }
}

/// An account as rendered to the user: everything except the password.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountView {
    pub id: String,
    pub username: String,
    pub email: String,
    pub joined_at: DateTime<Utc>,
    pub preferences: Preferences,
}

impl From<Account> for AccountView {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            username: account.username,
            email: account.email,
            joined_at: account.joined_at,
            preferences: account.preferences,
        }
    }
}

/// A study task owned by one account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (e.g., "ep-a1b2c3d4")
    pub id: String,

    /// Owning account id
    pub user_id: String,

    /// Task title
    pub title: String,

    /// Subject or course the task belongs to
    pub subject: String,

    /// Due date
    pub deadline: NaiveDate,

    /// Priority level
    #[serde(default)]
    pub priority: TaskPriority,

    /// Free-text description
    #[serde(default)]
    pub description: String,

    /// Current workflow status
    #[serde(default)]
    pub status: TaskStatus,

    /// Completion flag. Updated independently of `status`; the `task done`
    /// command is the path that keeps the two coherent.
    #[serde(default)]
    pub completed: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Completion timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a new task in the initial `todo` state.
    pub fn new(
        id: String,
        user_id: String,
        title: String,
        subject: String,
        deadline: NaiveDate,
        priority: TaskPriority,
        description: String,
    ) -> Self {
        Self {
            id,
            user_id,
            title,
            subject,
            deadline,
            priority,
            description,
            status: TaskStatus::default(),
            completed: false,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// A logged interval of focused study time.
///
/// `duration_secs` fixes the unit at the interface boundary: durations are
/// always seconds in the store, and only the statistics layer converts to
/// minutes for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudySession {
    /// Unique identifier (UUID v4)
    pub id: String,

    /// Owning account id
    pub user_id: String,

    /// Duration in seconds
    pub duration_secs: u64,

    /// When the session started
    pub started_at: DateTime<Utc>,
}

impl StudySession {
    /// Create a new study session record.
    pub fn new(user_id: String, duration_secs: u64, started_at: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            duration_secs,
            started_at,
        }
    }
}
