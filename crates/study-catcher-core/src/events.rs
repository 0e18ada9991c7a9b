use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::StudySession;
use crate::timer::{TimerPreset, TimerState};

/// Timer lifecycle events, produced by manager operations.
///
/// Consumers poll for these; the core never depends on anyone listening.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        preset_id: String,
        preset_name: String,
        at: DateTime<Utc>,
    },
    TimerPaused {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        elapsed_secs: u64,
        at: DateTime<Utc>,
    },
    /// Emitted on every stop. `session` is present only when the run had
    /// positive elapsed time and a selected preset.
    TimerStopped {
        session: Option<StudySession>,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        state: TimerState,
        elapsed_secs: u64,
        selected_preset: Option<TimerPreset>,
        total_seconds_studied: u64,
        at: DateTime<Utc>,
    },
}
