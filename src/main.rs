//! Eduplan CLI - a local study planner.

use clap::Parser;
use eduplan::action_log;
use eduplan::cli::{Cli, Commands, StoreCommands, TaskCommands, TimerCommands};
use eduplan::commands::{self, Output};
use eduplan::storage::{Store, default_data_dir};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();
    let human = cli.human_readable;

    // Determine data directory: --data-dir flag > EP_DATA_DIR env > platform default
    let data_dir = resolve_data_dir(cli.data_dir, human);

    // Serialize command for logging
    let (cmd_name, args_json) = serialize_command(&cli.command);

    // Start timing
    let start = Instant::now();

    // Execute command
    let result = run_command(cli.command, &data_dir, human);

    // Calculate duration
    let duration = start.elapsed().as_millis() as u64;

    // Determine success/error
    let (success, error) = match &result {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    // Log the action (never fails; passwords are redacted)
    action_log::log_action(&data_dir, &cmd_name, args_json, success, error, duration);

    // Handle result
    if let Err(e) = result {
        if human {
            eprintln!("Error: {}", e);
        } else {
            eprintln!(r#"{{"error": "{}"}}"#, e);
        }
        process::exit(1);
    }
}

/// Resolve the data directory from the explicit flag/env value or the
/// platform default.
fn resolve_data_dir(explicit_dir: Option<PathBuf>, human: bool) -> PathBuf {
    match explicit_dir {
        Some(dir) => dir,
        None => match default_data_dir() {
            Ok(dir) => dir,
            Err(e) => {
                if human {
                    eprintln!("Error: {}", e);
                } else {
                    eprintln!(r#"{{"error": "{}"}}"#, e);
                }
                process::exit(1);
            }
        },
    }
}

fn run_command(command: Commands, data_dir: &Path, human: bool) -> Result<(), eduplan::Error> {
    let mut store = Store::open(data_dir)?;

    match command {
        Commands::Register {
            username,
            email,
            password,
        } => {
            let result = commands::register(&mut store, &username, &email, &password)?;
            output(&result, human);
        }

        Commands::Login {
            identifier,
            password,
        } => {
            let result = commands::login(&mut store, &identifier, &password)?;
            output(&result, human);
        }

        Commands::Logout => {
            let result = commands::logout(&mut store)?;
            output(&result, human);
        }

        Commands::Whoami => {
            let result = commands::whoami(&store)?;
            output(&result, human);
        }

        Commands::Task { command } => match command {
            TaskCommands::Add {
                title,
                subject,
                due,
                priority,
                description,
            } => {
                let result = commands::task_add(
                    &mut store,
                    &title,
                    &subject,
                    &due,
                    &priority,
                    &description,
                )?;
                output(&result, human);
            }

            TaskCommands::List {
                status,
                priority,
                due_today,
            } => {
                let result = commands::task_list(
                    &store,
                    status.as_deref(),
                    priority.as_deref(),
                    due_today,
                )?;
                output(&result, human);
            }

            TaskCommands::Update {
                id,
                status,
                priority,
            } => {
                let result = commands::task_update(
                    &mut store,
                    &id,
                    status.as_deref(),
                    priority.as_deref(),
                )?;
                output(&result, human);
            }

            TaskCommands::Done { id } => {
                let result = commands::task_done(&mut store, &id)?;
                output(&result, human);
            }
        },

        Commands::Stats => {
            let result = commands::stats(&store)?;
            output(&result, human);
        }

        Commands::Dashboard => {
            let result = commands::dashboard(&store)?;
            output(&result, human);
        }

        Commands::Timer { command } => match command {
            TimerCommands::Run { minutes, seconds } => {
                let duration_secs = match seconds {
                    Some(secs) => secs,
                    None => minutes.unwrap_or(25) * 60,
                };
                let result = commands::timer_run(&mut store, duration_secs, human)?;
                output(&result, human);
            }
        },

        Commands::Store { command } => match command {
            StoreCommands::Show => {
                let result = commands::store_show(&store)?;
                output(&result, human);
            }
        },
    }

    Ok(())
}

/// Serialize a command into a (name, args) pair for the action log.
/// Passwords go in as-is here; the log layer redacts them.
fn serialize_command(command: &Commands) -> (String, serde_json::Value) {
    match command {
        Commands::Register {
            username,
            email,
            password,
        } => (
            "register".to_string(),
            serde_json::json!({"username": username, "email": email, "password": password}),
        ),
        Commands::Login {
            identifier,
            password,
        } => (
            "login".to_string(),
            serde_json::json!({"identifier": identifier, "password": password}),
        ),
        Commands::Logout => ("logout".to_string(), serde_json::json!({})),
        Commands::Whoami => ("whoami".to_string(), serde_json::json!({})),
        Commands::Task { command } => match command {
            TaskCommands::Add {
                title,
                subject,
                due,
                priority,
                description,
            } => (
                "task add".to_string(),
                serde_json::json!({
                    "title": title,
                    "subject": subject,
                    "due": due,
                    "priority": priority,
                    "description": description,
                }),
            ),
            TaskCommands::List {
                status,
                priority,
                due_today,
            } => (
                "task list".to_string(),
                serde_json::json!({"status": status, "priority": priority, "due_today": due_today}),
            ),
            TaskCommands::Update {
                id,
                status,
                priority,
            } => (
                "task update".to_string(),
                serde_json::json!({"id": id, "status": status, "priority": priority}),
            ),
            TaskCommands::Done { id } => {
                ("task done".to_string(), serde_json::json!({"id": id}))
            }
        },
        Commands::Stats => ("stats".to_string(), serde_json::json!({})),
        Commands::Dashboard => ("dashboard".to_string(), serde_json::json!({})),
        Commands::Timer { command } => match command {
            TimerCommands::Run { minutes, seconds } => (
                "timer run".to_string(),
                serde_json::json!({"minutes": minutes, "seconds": seconds}),
            ),
        },
        Commands::Store { command } => match command {
            StoreCommands::Show => ("store show".to_string(), serde_json::json!({})),
        },
    }
}

fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}
