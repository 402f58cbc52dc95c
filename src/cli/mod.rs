//! CLI argument definitions for eduplan.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Version string including build metadata injected by the build script.
const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("EP_GIT_COMMIT"),
    ", built ",
    env!("EP_BUILD_TIMESTAMP"),
    ")"
);

/// Eduplan - a local study planner.
///
/// Start with `ep register` to create an account, then `ep task add` and
/// `ep dashboard` to plan and track your studying.
#[derive(Parser, Debug)]
#[command(name = "ep")]
#[command(author, version = VERSION, about = "A CLI study planner: tasks, stats, and a focus timer", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Keep data in <path> instead of the platform data directory.
    /// Can also be set via the EP_DATA_DIR environment variable.
    #[arg(long = "data-dir", global = true, env = "EP_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create an account and log in
    Register {
        /// Unique username
        username: String,

        /// Unique email address
        email: String,

        /// Password (compared in plaintext against the local store)
        #[arg(short, long)]
        password: String,
    },

    /// Log in with username or email
    Login {
        /// Username or email address
        identifier: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Log out of the current session
    Logout,

    /// Show the logged-in account
    Whoami,

    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Show productivity statistics
    Stats,

    /// Show the dashboard: greeting, quote of the day, and statistics
    Dashboard,

    /// Focus timer commands
    Timer {
        #[command(subcommand)]
        command: TimerCommands,
    },

    /// Data store management
    Store {
        #[command(subcommand)]
        command: StoreCommands,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Create a new task
    Add {
        /// Task title
        title: String,

        /// Subject or course
        #[arg(short, long)]
        subject: String,

        /// Due date (YYYY-MM-DD)
        #[arg(short = 'D', long = "due")]
        due: String,

        /// Priority
        #[arg(short, long, default_value = "medium", value_parser = ["low", "medium", "high"])]
        priority: String,

        /// Task description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// List tasks
    List {
        /// Filter by status
        #[arg(long, value_parser = ["todo", "progress", "review", "done"])]
        status: Option<String>,

        /// Filter by priority
        #[arg(long, value_parser = ["low", "medium", "high"])]
        priority: Option<String>,

        /// Only pending tasks due today
        #[arg(long)]
        due_today: bool,
    },

    /// Update a task's status or priority
    Update {
        /// Task ID
        id: String,

        /// New status
        #[arg(long, value_parser = ["todo", "progress", "review", "done"])]
        status: Option<String>,

        /// New priority
        #[arg(long, value_parser = ["low", "medium", "high"])]
        priority: Option<String>,
    },

    /// Mark a task done
    Done {
        /// Task ID
        id: String,
    },
}

/// Timer subcommands
#[derive(Subcommand, Debug)]
pub enum TimerCommands {
    /// Run a countdown; on completion a study session is logged
    Run {
        /// Countdown length in minutes (default 25)
        #[arg(short, long)]
        minutes: Option<u64>,

        /// Countdown length in seconds (overrides --minutes)
        #[arg(long, conflicts_with = "minutes")]
        seconds: Option<u64>,
    },
}

/// Store management subcommands
#[derive(Subcommand, Debug)]
pub enum StoreCommands {
    /// Display summary of current store contents
    Show,
}
