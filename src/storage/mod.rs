//! Storage layer for eduplan data.
//!
//! All records live in a key-value backend as JSON-serialized collections:
//!
//! - `users` - every registered account
//! - `currentUser` - the active session account, absent when logged out
//! - `tasks_<accountId>` - the task list for one account
//! - `sessions_<accountId>` - the study-session log for one account
//!
//! Every mutation reads the whole collection, updates it in memory, and
//! writes the whole collection back. There is no partial update and no
//! concurrent-writer protection; one process owns the store at a time.

pub mod backend;
pub mod file;
pub mod memory;

pub use backend::StoreBackend;
pub use file::FileBackend;
pub use memory::MemoryBackend;

use crate::models::{Account, StudySession, Task, TaskPriority, TaskStatus};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Key holding the account collection.
const USERS_KEY: &str = "users";

/// Key holding the current-session account.
const CURRENT_USER_KEY: &str = "currentUser";

fn tasks_key(account_id: &str) -> String {
    format!("tasks_{}", account_id)
}

fn sessions_key(account_id: &str) -> String {
    format!("sessions_{}", account_id)
}

/// Store for all eduplan data, generic over the persistence backend.
pub struct Store {
    backend: Box<dyn StoreBackend>,
}

impl Store {
    /// Open a file-backed store rooted at the given data directory,
    /// creating the directory if needed.
    pub fn open(data_dir: &Path) -> Result<Self> {
        let backend = FileBackend::create(data_dir)?;
        Ok(Self::with_backend(Box::new(backend)))
    }

    /// Wrap an injected backend. Tests use this with `MemoryBackend`.
    pub fn with_backend(backend: Box<dyn StoreBackend>) -> Self {
        Self { backend }
    }

    /// Where this store keeps its data (for display purposes).
    pub fn location(&self) -> String {
        self.backend.location()
    }

    /// The backend type name (for display purposes).
    pub fn backend_type(&self) -> &'static str {
        self.backend.backend_type()
    }

    /// Number of registered accounts.
    pub fn account_count(&self) -> Result<usize> {
        let accounts: Vec<Account> = self.read_collection(USERS_KEY)?;
        Ok(accounts.len())
    }

    // === Accounts ===

    /// Register a new account and append it to the account collection.
    ///
    /// Username uniqueness is checked before email uniqueness, so a value
    /// that collides on both reports the username error.
    pub fn register(&mut self, username: &str, email: &str, password: &str) -> Result<Account> {
        if username.trim().is_empty() {
            return Err(Error::InvalidInput("username must not be empty".into()));
        }
        if email.trim().is_empty() {
            return Err(Error::InvalidInput("email must not be empty".into()));
        }
        if password.is_empty() {
            return Err(Error::InvalidInput("password must not be empty".into()));
        }

        let mut accounts: Vec<Account> = self.read_collection(USERS_KEY)?;

        if accounts.iter().any(|a| a.username == username) {
            return Err(Error::DuplicateUsername(username.to_string()));
        }
        if accounts.iter().any(|a| a.email == email) {
            return Err(Error::DuplicateEmail(email.to_string()));
        }

        let account = Account::new(
            generate_id("epu", username),
            username.to_string(),
            email.to_string(),
            password.to_string(),
        );
        accounts.push(account.clone());
        self.write_collection(USERS_KEY, &accounts)?;

        Ok(account)
    }

    /// Authenticate by username or email plus exact password match.
    pub fn authenticate(&self, identifier: &str, password: &str) -> Result<Account> {
        let accounts: Vec<Account> = self.read_collection(USERS_KEY)?;
        accounts
            .into_iter()
            .find(|a| (a.username == identifier || a.email == identifier) && a.password == password)
            .ok_or(Error::InvalidCredentials)
    }

    // === Session state ===

    /// Read the remembered session, if any.
    pub fn current_session(&self) -> Result<Option<Account>> {
        match self.backend.get(CURRENT_USER_KEY)? {
            Some(value) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    /// Persist the given account as the active session.
    pub fn establish_session(&mut self, account: &Account) -> Result<()> {
        let value = serde_json::to_string(account)?;
        self.backend.set(CURRENT_USER_KEY, &value)
    }

    /// Remove the remembered session. A no-op when logged out.
    pub fn clear_session(&mut self) -> Result<()> {
        self.backend.remove(CURRENT_USER_KEY)
    }

    // === Tasks ===

    /// All tasks for one account, in append order.
    pub fn tasks_for(&self, account_id: &str) -> Result<Vec<Task>> {
        self.read_collection(&tasks_key(account_id))
    }

    /// Create a task and append it to the account's collection.
    pub fn add_task(
        &mut self,
        account_id: &str,
        title: &str,
        subject: &str,
        deadline: NaiveDate,
        priority: TaskPriority,
        description: &str,
    ) -> Result<Task> {
        if title.trim().is_empty() {
            return Err(Error::InvalidInput("title must not be empty".into()));
        }
        if subject.trim().is_empty() {
            return Err(Error::InvalidInput("subject must not be empty".into()));
        }

        let key = tasks_key(account_id);
        let mut tasks: Vec<Task> = self.read_collection(&key)?;

        let task = Task::new(
            generate_id("ep", title),
            account_id.to_string(),
            title.to_string(),
            subject.to_string(),
            deadline,
            priority,
            description.to_string(),
        );
        tasks.push(task.clone());
        self.write_collection(&key, &tasks)?;

        Ok(task)
    }

    /// Edit status and/or priority of an existing task.
    ///
    /// The `completed` flag is intentionally untouched here; see
    /// [`Store::complete_task`] for the coherent completion path.
    pub fn update_task(
        &mut self,
        account_id: &str,
        task_id: &str,
        status: Option<TaskStatus>,
        priority: Option<TaskPriority>,
    ) -> Result<Task> {
        self.modify_task(account_id, task_id, |task| {
            if let Some(status) = status {
                task.status = status;
            }
            if let Some(priority) = priority {
                task.priority = priority;
            }
        })
    }

    /// Mark a task done: sets the completion flag, the `done` status, and
    /// the completion timestamp together.
    pub fn complete_task(&mut self, account_id: &str, task_id: &str) -> Result<Task> {
        let now = Utc::now();
        self.modify_task(account_id, task_id, |task| {
            task.completed = true;
            task.status = TaskStatus::Done;
            task.completed_at = Some(now);
        })
    }

    fn modify_task<F>(&mut self, account_id: &str, task_id: &str, apply: F) -> Result<Task>
    where
        F: FnOnce(&mut Task),
    {
        let key = tasks_key(account_id);
        let mut tasks: Vec<Task> = self.read_collection(&key)?;

        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| Error::NotFound(task_id.to_string()))?;
        apply(task);
        let updated = task.clone();

        self.write_collection(&key, &tasks)?;
        Ok(updated)
    }

    // === Study sessions ===

    /// All study sessions for one account, in append order.
    pub fn study_sessions_for(&self, account_id: &str) -> Result<Vec<StudySession>> {
        self.read_collection(&sessions_key(account_id))
    }

    /// Append a completed study session to the account's log.
    pub fn log_study_session(
        &mut self,
        account_id: &str,
        duration_secs: u64,
        started_at: DateTime<Utc>,
    ) -> Result<StudySession> {
        let key = sessions_key(account_id);
        let mut sessions: Vec<StudySession> = self.read_collection(&key)?;

        let session = StudySession::new(account_id.to_string(), duration_secs, started_at);
        sessions.push(session.clone());
        self.write_collection(&key, &sessions)?;

        Ok(session)
    }

    // === Collection plumbing ===

    /// Read a whole collection; an absent key is an empty collection.
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.backend.get(key)? {
            Some(value) => Ok(serde_json::from_str(&value)?),
            None => Ok(Vec::new()),
        }
    }

    /// Overwrite a whole collection.
    fn write_collection<T: Serialize>(&mut self, key: &str, items: &[T]) -> Result<()> {
        let value = serde_json::to_string(items)?;
        self.backend.set(key, &value)
    }
}

/// Get the default data directory: `<platform data dir>/eduplan`.
///
/// Callers pass an explicit directory (flag or `EP_DATA_DIR`) to override.
pub fn default_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir()
        .ok_or_else(|| Error::Other("Could not determine data directory".to_string()))?;
    Ok(data_dir.join("eduplan"))
}

/// Generate a unique ID for a stored entity.
///
/// Format: `<prefix>-<8 hex chars>`
/// - Account prefix: "epu"
/// - Task prefix: "ep"
pub fn generate_id(prefix: &str, seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(
        chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or(0)
            .to_le_bytes(),
    );
    let hash = hasher.finalize();
    let hash_hex = format!("{:x}", hash);
    format!("{}-{}", prefix, &hash_hex[..8])
}
