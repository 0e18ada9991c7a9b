//! Study session log.
//!
//! Sessions are append-only: the timer's `stop()` is the only writer, and
//! a recorded session is never mutated. Everything else here is a pure
//! query over the stored list -- no query touches state or persistence.

use chrono::{DateTime, Duration, Local, Utc};
use serde::{Deserialize, Serialize};

/// One completed timer run with positive elapsed time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    /// When the run was stopped.
    pub occurred_at: DateTime<Utc>,
    pub duration_secs: u64,
    /// Display name of the preset at stop time, copied by value.
    pub preset_name: String,
}

impl StudySession {
    pub fn new(duration_secs: u64, preset_name: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: crate::items::new_id(),
            occurred_at: at,
            duration_secs,
            preset_name: preset_name.into(),
        }
    }
}

/// Sessions from the last 7 days, boundaries inclusive.
pub fn within_last_week(sessions: &[StudySession], now: DateTime<Utc>) -> Vec<&StudySession> {
    let cutoff = now - Duration::days(7);
    sessions
        .iter()
        .filter(|s| s.occurred_at >= cutoff && s.occurred_at <= now)
        .collect()
}

/// Sessions on the same local calendar day as `now`.
pub fn on_same_local_day(sessions: &[StudySession], now: DateTime<Utc>) -> Vec<&StudySession> {
    let today = now.with_timezone(&Local).date_naive();
    sessions
        .iter()
        .filter(|s| s.occurred_at.with_timezone(&Local).date_naive() == today)
        .collect()
}

/// Sum of session durations in seconds.
pub fn total_secs<'a>(sessions: impl IntoIterator<Item = &'a StudySession>) -> u64 {
    sessions.into_iter().map(|s| s.duration_secs).sum()
}
