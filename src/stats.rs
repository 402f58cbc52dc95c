//! Productivity statistics over one account's tasks and study sessions.
//!
//! Pure functions: callers load the collections and supply today's date,
//! so the aggregation itself never touches the store or the clock.

use crate::models::{StudySession, Task, TaskStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed goal denominator shown on the dashboard.
const GOALS_TARGET: usize = 5;

/// Derived counts for the dashboard.
///
/// The `done` column of the status breakdown is the completion flag count,
/// not a status count; the two can disagree (see `Task::completed`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Total number of tasks
    pub total: usize,
    /// Tasks with the completion flag set
    pub completed: usize,
    /// Tasks without the completion flag
    pub pending: usize,
    /// Pending tasks due on the given date
    pub due_today: usize,
    /// Tasks with status `todo`
    pub todo: usize,
    /// Tasks with status `progress`
    pub progress: usize,
    /// Tasks with status `review`
    pub review: usize,
    /// round(completed / total * 100), 0 when there are no tasks
    pub productivity_percent: u32,
    /// Total logged study time in minutes, one decimal place
    pub total_study_minutes: f64,
    /// "{completed}/5" goal label
    pub goals_achieved: String,
}

impl DashboardStats {
    /// Aggregate statistics for one account's collections.
    pub fn compute(tasks: &[Task], sessions: &[StudySession], today: NaiveDate) -> Self {
        let total = tasks.len();
        let completed = tasks.iter().filter(|t| t.completed).count();
        let pending = total - completed;
        let due_today = tasks
            .iter()
            .filter(|t| !t.completed && t.deadline == today)
            .count();

        let todo = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Todo)
            .count();
        let progress = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Progress)
            .count();
        let review = tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Review)
            .count();

        let productivity_percent = if total > 0 {
            ((completed as f64 / total as f64) * 100.0).round() as u32
        } else {
            0
        };

        let total_secs: u64 = sessions.iter().map(|s| s.duration_secs).sum();
        let total_study_minutes = (total_secs as f64 / 60.0 * 10.0).round() / 10.0;

        Self {
            total,
            completed,
            pending,
            due_today,
            todo,
            progress,
            review,
            productivity_percent,
            total_study_minutes,
            goals_achieved: format!("{}/{}", completed, GOALS_TARGET),
        }
    }
}
