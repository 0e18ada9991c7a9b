//! Timer engine implementation.
//!
//! The engine is a count-up state machine. It has no internal thread --
//! a driver (the CLI loop, a GUI interval) calls `tick()` once per elapsed
//! second while the timer runs.
//!
//! ## State transitions
//!
//! ```text
//! Idle -> Running -> Paused -> Running -> ... -> Idle
//! ```
//!
//! ## Tick ownership
//!
//! Each `start()`/`resume()` issues a fresh [`TickHandle`] and invalidates
//! any previously issued one; `pause()`/`stop()` invalidate the live
//! handle. `tick()` only counts when the timer is running and the handle
//! is current, so a driver that failed to cancel its loop can never keep
//! advancing elapsed time after a pause.

use serde::{Deserialize, Serialize};

use super::preset::TimerPreset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
}

/// Capability to advance the timer by one second.
///
/// Not `Clone`: there is exactly one live handle per running stretch.
#[derive(Debug)]
pub struct TickHandle {
    token: u64,
}

/// A run that ended with positive elapsed time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedRun {
    pub duration_secs: u64,
    pub preset_name: String,
}

/// Core timer state machine. Runtime state is never persisted; every
/// process starts from `Idle`.
#[derive(Debug)]
pub struct TimerEngine {
    state: TimerState,
    elapsed_secs: u64,
    selected: Option<TimerPreset>,
    /// Token of the currently issued tick handle, if any.
    tick_token: Option<u64>,
    tick_seq: u64,
}

impl TimerEngine {
    pub fn new() -> Self {
        Self {
            state: TimerState::Idle,
            elapsed_secs: 0,
            selected: None,
            tick_token: None,
            tick_seq: 0,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn is_paused(&self) -> bool {
        self.state == TimerState::Paused
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_secs
    }

    pub fn selected_preset(&self) -> Option<&TimerPreset> {
        self.selected.as_ref()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a run. Valid only from `Idle` with a selected preset;
    /// otherwise a no-op returning `None`. Resets elapsed time and issues
    /// the tick handle for this run.
    pub fn start(&mut self) -> Option<TickHandle> {
        if self.state != TimerState::Idle || self.selected.is_none() {
            return None;
        }
        self.elapsed_secs = 0;
        self.state = TimerState::Running;
        Some(self.issue_tick_handle())
    }

    /// Pause a running timer, invalidating the live tick handle. Elapsed
    /// time is retained. Returns false when not running.
    pub fn pause(&mut self) -> bool {
        if self.state != TimerState::Running {
            return false;
        }
        self.tick_token = None;
        self.state = TimerState::Paused;
        true
    }

    /// Resume from `Paused` without resetting elapsed time. Issues a fresh
    /// tick handle; the pre-pause handle stays dead.
    pub fn resume(&mut self) -> Option<TickHandle> {
        if self.state != TimerState::Paused {
            return None;
        }
        self.state = TimerState::Running;
        Some(self.issue_tick_handle())
    }

    /// Stop from any state and return to `Idle`. Returns the finished run
    /// when elapsed time is positive and a preset is selected; stopping
    /// from `Idle` or with zero elapsed time just resets, with no error.
    pub fn stop(&mut self) -> Option<FinishedRun> {
        self.tick_token = None;
        let finished = if self.state != TimerState::Idle && self.elapsed_secs > 0 {
            self.selected.as_ref().map(|p| FinishedRun {
                duration_secs: self.elapsed_secs,
                preset_name: p.name.clone(),
            })
        } else {
            None
        };
        self.state = TimerState::Idle;
        self.elapsed_secs = 0;
        finished
    }

    /// Replace the selected preset. Allowed in any state; an in-progress
    /// run keeps counting and will be recorded under the new preset's
    /// name when stopped.
    pub fn select_preset(&mut self, preset: TimerPreset) {
        self.selected = Some(preset);
    }

    /// Advance elapsed time by one second. Counts only while running and
    /// only for the currently issued handle; stale handles are ignored.
    pub fn tick(&mut self, handle: &TickHandle) -> bool {
        if self.state != TimerState::Running || self.tick_token != Some(handle.token) {
            return false;
        }
        self.elapsed_secs += 1;
        true
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn issue_tick_handle(&mut self) -> TickHandle {
        // Bumping the sequence invalidates every previously issued handle.
        self.tick_seq += 1;
        self.tick_token = Some(self.tick_seq);
        TickHandle {
            token: self.tick_seq,
        }
    }
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::PresetCatalog;

    fn engine_with_preset() -> TimerEngine {
        let mut engine = TimerEngine::new();
        let preset = PresetCatalog::built_in().get("preset-1").unwrap().clone();
        engine.select_preset(preset);
        engine
    }

    #[test]
    fn start_without_preset_is_noop() {
        let mut engine = TimerEngine::new();
        assert!(engine.start().is_none());
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn start_tick_pause_resume_stop() {
        let mut engine = engine_with_preset();
        let handle = engine.start().unwrap();
        for _ in 0..5 {
            assert!(engine.tick(&handle));
        }
        assert_eq!(engine.elapsed_secs(), 5);

        assert!(engine.pause());
        assert_eq!(engine.state(), TimerState::Paused);
        // A leaked driver still holding the old handle must not advance time.
        assert!(!engine.tick(&handle));
        assert_eq!(engine.elapsed_secs(), 5);

        let handle = engine.resume().unwrap();
        assert!(engine.tick(&handle));
        assert_eq!(engine.elapsed_secs(), 6);

        let finished = engine.stop().unwrap();
        assert_eq!(finished.duration_secs, 6);
        assert_eq!(finished.preset_name, "30 minutes with 1 interval");
        assert_eq!(engine.state(), TimerState::Idle);
        assert_eq!(engine.elapsed_secs(), 0);
    }

    #[test]
    fn stale_handle_is_dead_after_resume() {
        let mut engine = engine_with_preset();
        let old = engine.start().unwrap();
        engine.tick(&old);
        engine.pause();
        let fresh = engine.resume().unwrap();
        assert!(!engine.tick(&old));
        assert!(engine.tick(&fresh));
        assert_eq!(engine.elapsed_secs(), 2);
    }

    #[test]
    fn start_while_running_is_noop() {
        let mut engine = engine_with_preset();
        let handle = engine.start().unwrap();
        engine.tick(&handle);
        assert!(engine.start().is_none());
        assert_eq!(engine.elapsed_secs(), 1);
        assert_eq!(engine.state(), TimerState::Running);
    }

    #[test]
    fn pause_from_idle_and_resume_from_running_are_noops() {
        let mut engine = engine_with_preset();
        assert!(!engine.pause());
        engine.start().unwrap();
        assert!(engine.resume().is_none());
    }

    #[test]
    fn stop_from_idle_records_nothing() {
        let mut engine = engine_with_preset();
        assert!(engine.stop().is_none());
        assert_eq!(engine.state(), TimerState::Idle);
    }

    #[test]
    fn stop_with_zero_elapsed_records_nothing() {
        let mut engine = engine_with_preset();
        engine.start().unwrap();
        assert!(engine.stop().is_none());
    }

    #[test]
    fn start_resets_elapsed_from_previous_run() {
        let mut engine = engine_with_preset();
        let handle = engine.start().unwrap();
        engine.tick(&handle);
        engine.stop();
        let handle = engine.start().unwrap();
        assert_eq!(engine.elapsed_secs(), 0);
        engine.tick(&handle);
        assert_eq!(engine.elapsed_secs(), 1);
    }

    #[test]
    fn preset_change_mid_run_is_recorded_at_stop() {
        let mut engine = engine_with_preset();
        let handle = engine.start().unwrap();
        engine.tick(&handle);
        let custom = PresetCatalog::built_in()
            .get(crate::timer::CUSTOM_PRESET_ID)
            .unwrap()
            .clone();
        engine.select_preset(custom);
        assert_eq!(engine.state(), TimerState::Running);
        let finished = engine.stop().unwrap();
        assert_eq!(finished.preset_name, "Custom");
    }
}
