//! Dashboard summary and display formatting.
//!
//! Pure functions over the session log; nothing here mutates state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::{self, StudySession};

/// Aggregates shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    /// Lifetime accumulated study time in seconds.
    pub total_secs: u64,
    /// Study time recorded today (local calendar day).
    pub today_secs: u64,
    /// Floor of total time over session count; 0 for an empty log.
    pub average_session_secs: u64,
    pub session_count: usize,
    pub sessions_last_week: usize,
}

impl DashboardSummary {
    pub fn compute(sessions: &[StudySession], total_secs: u64, now: DateTime<Utc>) -> Self {
        let today_secs = session::total_secs(session::on_same_local_day(sessions, now));
        let average_session_secs = if sessions.is_empty() {
            0
        } else {
            total_secs / sessions.len() as u64
        };
        Self {
            total_secs,
            today_secs,
            average_session_secs,
            session_count: sessions.len(),
            sessions_last_week: session::within_last_week(sessions, now).len(),
        }
    }
}

/// Format seconds as `"1h 5m"`, or `"45m"` under an hour.
pub fn format_hours_minutes(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

/// Format seconds as a `mm:ss` timer readout.
pub fn format_clock(total_secs: u64) -> String {
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn session(at: DateTime<Utc>, secs: u64) -> StudySession {
        StudySession::new(secs, "Custom", at)
    }

    #[test]
    fn summary_over_empty_log() {
        let summary = DashboardSummary::compute(&[], 0, Utc::now());
        assert_eq!(summary, DashboardSummary::default());
    }

    #[test]
    fn summary_splits_today_from_total() {
        let now = Utc::now();
        let sessions = vec![
            session(now, 600),
            session(now - Duration::days(2), 300),
            session(now - Duration::days(30), 900),
        ];
        let summary = DashboardSummary::compute(&sessions, 1800, now);
        assert_eq!(summary.total_secs, 1800);
        assert_eq!(summary.today_secs, 600);
        assert_eq!(summary.average_session_secs, 600);
        assert_eq!(summary.session_count, 3);
        assert_eq!(summary.sessions_last_week, 2);
    }

    #[test]
    fn hours_minutes_formatting() {
        assert_eq!(format_hours_minutes(0), "0m");
        assert_eq!(format_hours_minutes(2700), "45m");
        assert_eq!(format_hours_minutes(3900), "1h 5m");
        assert_eq!(format_hours_minutes(7200), "2h 0m");
    }

    #[test]
    fn clock_formatting() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(305), "05:05");
        assert_eq!(format_clock(3605), "60:05");
    }
}
