//! Command implementations for the eduplan CLI.
//!
//! Each function here is the business logic behind one CLI command. It
//! takes a `Store` plus parsed arguments and returns a result struct that
//! renders as JSON (default) or human-readable text via the `Output`
//! trait; `main` only dispatches and prints.

use crate::models::{Account, AccountView, StudySession, Task, TaskPriority, TaskStatus};
use crate::stats::DashboardStats;
use crate::storage::Store;
use crate::timer::Timer;
use crate::{Error, Result};
use chrono::{Datelike, Local, NaiveDate, Timelike, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output {
    /// Serialize to a JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

fn json_string<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| String::from("{}"))
}

/// Study quotes rotated on the dashboard, one per day.
const QUOTES: [&str; 5] = [
    "Education is the most powerful weapon which you can use to change the world. - Nelson Mandela",
    "The beautiful thing about learning is that no one can take it away from you. - B.B. King",
    "Education is the passport to the future, for tomorrow belongs to those who prepare for it today. - Malcolm X",
    "The expert in anything was once a beginner. - Helen Hayes",
    "Don't let what you cannot do interfere with what you can do. - John Wooden",
];

/// Fetch the active session account or fail.
fn require_session(store: &Store) -> Result<Account> {
    store.current_session()?.ok_or(Error::NotLoggedIn)
}

fn parse_due(due: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(due, "%Y-%m-%d")
        .map_err(|_| Error::InvalidInput(format!("due date must be YYYY-MM-DD, got: {}", due)))
}

fn parse_status(s: &str) -> Result<TaskStatus> {
    s.parse().map_err(Error::InvalidInput)
}

fn parse_priority(s: &str) -> Result<TaskPriority> {
    s.parse().map_err(Error::InvalidInput)
}

// === Accounts and sessions ===

#[derive(Debug, Serialize)]
pub struct RegisterResult {
    pub account: AccountView,
}

impl Output for RegisterResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Account created. Welcome, {}! You are now logged in.",
            self.account.username
        )
    }
}

/// Register a new account and establish the session for it.
pub fn register(
    store: &mut Store,
    username: &str,
    email: &str,
    password: &str,
) -> Result<RegisterResult> {
    let account = store.register(username, email, password)?;
    store.establish_session(&account)?;
    Ok(RegisterResult {
        account: account.into(),
    })
}

#[derive(Debug, Serialize)]
pub struct LoginResult {
    pub account: AccountView,
}

impl Output for LoginResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!("Welcome back, {}!", self.account.username)
    }
}

/// Authenticate and establish the session.
pub fn login(store: &mut Store, identifier: &str, password: &str) -> Result<LoginResult> {
    let account = store.authenticate(identifier, password)?;
    store.establish_session(&account)?;
    Ok(LoginResult {
        account: account.into(),
    })
}

#[derive(Debug, Serialize)]
pub struct LogoutResult {
    pub was_logged_in: bool,
}

impl Output for LogoutResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        if self.was_logged_in {
            "Logged out successfully.".to_string()
        } else {
            "Not logged in.".to_string()
        }
    }
}

/// Clear the remembered session.
pub fn logout(store: &mut Store) -> Result<LogoutResult> {
    let was_logged_in = store.current_session()?.is_some();
    store.clear_session()?;
    Ok(LogoutResult { was_logged_in })
}

#[derive(Debug, Serialize)]
pub struct WhoamiResult {
    pub account: Option<AccountView>,
}

impl Output for WhoamiResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        match &self.account {
            Some(account) => format!(
                "Logged in as {} ({}), joined {}",
                account.username,
                account.email,
                account.joined_at.format("%Y-%m-%d")
            ),
            None => "Not logged in.".to_string(),
        }
    }
}

/// Show the current session account, if any.
pub fn whoami(store: &Store) -> Result<WhoamiResult> {
    Ok(WhoamiResult {
        account: store.current_session()?.map(AccountView::from),
    })
}

// === Tasks ===

#[derive(Debug, Serialize)]
pub struct TaskAddResult {
    pub task: Task,
}

impl Output for TaskAddResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Added task {}: \"{}\" ({}, due {}, {} priority)",
            self.task.id, self.task.title, self.task.subject, self.task.deadline, self.task.priority
        )
    }
}

/// Add a task for the logged-in account.
pub fn task_add(
    store: &mut Store,
    title: &str,
    subject: &str,
    due: &str,
    priority: &str,
    description: &str,
) -> Result<TaskAddResult> {
    let account = require_session(store)?;
    let deadline = parse_due(due)?;
    let priority = parse_priority(priority)?;
    let task = store.add_task(&account.id, title, subject, deadline, priority, description)?;
    Ok(TaskAddResult { task })
}

#[derive(Debug, Serialize)]
pub struct TaskListResult {
    pub count: usize,
    pub tasks: Vec<Task>,
}

impl Output for TaskListResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        if self.tasks.is_empty() {
            return "No tasks.".to_string();
        }
        let mut lines = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            let done = if task.completed { "x" } else { " " };
            lines.push(format!(
                "[{}] {}  {}  {} (due {}, {})",
                done, task.id, task.title, task.status, task.deadline, task.priority
            ));
        }
        lines.join("\n")
    }
}

/// List the logged-in account's tasks, optionally filtered.
pub fn task_list(
    store: &Store,
    status: Option<&str>,
    priority: Option<&str>,
    due_today: bool,
) -> Result<TaskListResult> {
    let account = require_session(store)?;
    let status = status.map(parse_status).transpose()?;
    let priority = priority.map(parse_priority).transpose()?;
    let today = Local::now().date_naive();

    let tasks: Vec<Task> = store
        .tasks_for(&account.id)?
        .into_iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .filter(|t| priority.is_none_or(|p| t.priority == p))
        .filter(|t| !due_today || (!t.completed && t.deadline == today))
        .collect();

    Ok(TaskListResult {
        count: tasks.len(),
        tasks,
    })
}

#[derive(Debug, Serialize)]
pub struct TaskUpdateResult {
    pub task: Task,
}

impl Output for TaskUpdateResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Updated task {}: status {}, {} priority",
            self.task.id, self.task.status, self.task.priority
        )
    }
}

/// Edit a task's status and/or priority.
pub fn task_update(
    store: &mut Store,
    id: &str,
    status: Option<&str>,
    priority: Option<&str>,
) -> Result<TaskUpdateResult> {
    if status.is_none() && priority.is_none() {
        return Err(Error::InvalidInput(
            "nothing to update: pass --status and/or --priority".into(),
        ));
    }
    let account = require_session(store)?;
    let status = status.map(parse_status).transpose()?;
    let priority = priority.map(parse_priority).transpose()?;
    let task = store.update_task(&account.id, id, status, priority)?;
    Ok(TaskUpdateResult { task })
}

#[derive(Debug, Serialize)]
pub struct TaskDoneResult {
    pub task: Task,
}

impl Output for TaskDoneResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!("Completed task {}: \"{}\"", self.task.id, self.task.title)
    }
}

/// Mark a task done.
pub fn task_done(store: &mut Store, id: &str) -> Result<TaskDoneResult> {
    let account = require_session(store)?;
    let task = store.complete_task(&account.id, id)?;
    Ok(TaskDoneResult { task })
}

// === Statistics and dashboard ===

#[derive(Debug, Serialize)]
pub struct StatsResult {
    pub stats: DashboardStats,
}

fn format_stats(stats: &DashboardStats) -> String {
    format!(
        "Tasks: {} total, {} completed, {} pending, {} due today\n\
         Board: {} todo, {} in progress, {} review, {} done\n\
         Productivity: {}%\n\
         Study time: {:.1} min\n\
         Goals achieved: {}",
        stats.total,
        stats.completed,
        stats.pending,
        stats.due_today,
        stats.todo,
        stats.progress,
        stats.review,
        stats.completed,
        stats.productivity_percent,
        stats.total_study_minutes,
        stats.goals_achieved
    )
}

impl Output for StatsResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format_stats(&self.stats)
    }
}

/// Compute dashboard statistics for the logged-in account.
pub fn stats(store: &Store) -> Result<StatsResult> {
    let account = require_session(store)?;
    let tasks = store.tasks_for(&account.id)?;
    let sessions = store.study_sessions_for(&account.id)?;
    let today = Local::now().date_naive();
    Ok(StatsResult {
        stats: DashboardStats::compute(&tasks, &sessions, today),
    })
}

#[derive(Debug, Serialize)]
pub struct DashboardResult {
    pub greeting: String,
    pub quote: String,
    pub stats: DashboardStats,
}

impl Output for DashboardResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!(
            "{}\n\n\"{}\"\n\n{}",
            self.greeting,
            self.quote,
            format_stats(&self.stats)
        )
    }
}

fn greeting_for_hour(hour: u32) -> &'static str {
    if (12..18).contains(&hour) {
        "Afternoon"
    } else if hour >= 18 {
        "Evening"
    } else {
        "Morning"
    }
}

/// The quote rotates daily rather than randomly, so repeated views on one
/// day agree.
fn quote_for_date(date: NaiveDate) -> &'static str {
    let index = date.num_days_from_ce().rem_euclid(QUOTES.len() as i32) as usize;
    QUOTES[index]
}

/// Dashboard view: greeting, quote of the day, and the statistics block.
pub fn dashboard(store: &Store) -> Result<DashboardResult> {
    let account = require_session(store)?;
    let tasks = store.tasks_for(&account.id)?;
    let sessions = store.study_sessions_for(&account.id)?;

    let now = Local::now();
    let greeting = format!(
        "Good {}, {}!",
        greeting_for_hour(now.hour()),
        account.username
    );

    Ok(DashboardResult {
        greeting,
        quote: quote_for_date(now.date_naive()).to_string(),
        stats: DashboardStats::compute(&tasks, &sessions, now.date_naive()),
    })
}

// === Timer ===

#[derive(Debug, Serialize)]
pub struct TimerRunResult {
    pub completed: bool,
    pub duration_secs: u64,
    pub remaining_secs: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<StudySession>,
}

impl Output for TimerRunResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        if self.completed {
            format!(
                "Focus session complete: {:.1} minutes logged.",
                self.duration_secs as f64 / 60.0
            )
        } else {
            format!(
                "Timer cancelled with {}s remaining; nothing logged.",
                self.remaining_secs
            )
        }
    }
}

/// Run the countdown to completion or Ctrl-C.
///
/// Ticks once per second. On expiry a study session is logged for the
/// active account; cancellation logs nothing. With `live_display`, the
/// remaining time is drawn to stderr so stdout stays parseable.
pub fn timer_run(store: &mut Store, duration_secs: u64, live_display: bool) -> Result<TimerRunResult> {
    if duration_secs == 0 {
        return Err(Error::InvalidInput("timer duration must be positive".into()));
    }
    let account = require_session(store)?;

    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    let _ = ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst));

    let mut timer = Timer::with_duration(duration_secs);
    let started_at = Utc::now();
    timer.start();

    if live_display {
        eprint!("\r{}", timer.format_remaining());
    }

    let mut completed = false;
    while timer.is_running() && !interrupted.load(Ordering::SeqCst) {
        std::thread::sleep(Duration::from_secs(1));
        if timer.tick() {
            completed = true;
        }
        if live_display {
            eprint!("\r{}", timer.format_remaining());
        }
    }
    if live_display {
        eprintln!();
    }

    let session = if completed {
        Some(store.log_study_session(&account.id, duration_secs, started_at)?)
    } else {
        None
    };

    Ok(TimerRunResult {
        completed,
        duration_secs,
        remaining_secs: timer.remaining_secs(),
        session,
    })
}

// === Store diagnostics ===

#[derive(Debug, Serialize)]
pub struct StoreShowResult {
    pub backend: &'static str,
    pub location: String,
    pub accounts: usize,
    pub session_active: bool,
}

impl Output for StoreShowResult {
    fn to_json(&self) -> String {
        json_string(self)
    }

    fn to_human(&self) -> String {
        format!(
            "Store: {} ({})\nAccounts: {}\nSession active: {}",
            self.location, self.backend, self.accounts, self.session_active
        )
    }
}

/// Summarize the store contents. Works without a session.
pub fn store_show(store: &Store) -> Result<StoreShowResult> {
    Ok(StoreShowResult {
        backend: store.backend_type(),
        location: store.location(),
        accounts: store.account_count()?,
        session_active: store.current_session()?.is_some(),
    })
}
