//! The study manager.
//!
//! [`StudyManager`] exclusively owns the timer runtime state, the preset
//! catalog, and the four persisted collections. Consumers read snapshots
//! and invoke operations; nothing outside this module mutates state.
//!
//! Every mutating operation writes the full updated collection back to the
//! store before returning. Durability is best-effort: a failed write is
//! logged and the in-memory change is kept, so the app stays usable even
//! with persistence completely unavailable.

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;
use crate::events::Event;
use crate::items::{Goal, Reminder, TodoItem};
use crate::session::StudySession;
use crate::storage::{keys, Config, Database, KeyValueStore};
use crate::timer::{PresetCatalog, TickHandle, TimerEngine, TimerPreset, TimerState};

pub struct StudyManager {
    store: Box<dyn KeyValueStore>,
    engine: TimerEngine,
    presets: PresetCatalog,
    todos: Vec<TodoItem>,
    goals: Vec<Goal>,
    reminders: Vec<Reminder>,
    sessions: Vec<StudySession>,
    total_secs: u64,
    /// Live tick handle for the current running stretch, if any.
    tick: Option<TickHandle>,
}

impl StudyManager {
    /// Open the default on-disk store and apply the saved configuration.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened. Callers that
    /// want to stay up regardless can fall back to a [`MemoryStore`]
    /// (see the CLI).
    ///
    /// [`MemoryStore`]: crate::storage::MemoryStore
    pub fn open() -> Result<Self> {
        let store = Database::open()?;
        let mut manager = Self::new(Box::new(store));
        manager.apply_config(&Config::load_or_default());
        Ok(manager)
    }

    /// Build a manager over any store, loading the persisted collections.
    /// Absent keys load as empty collections (or zero total), never as an
    /// error; malformed values are logged and treated as absent.
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        let todos = load_collection(store.as_ref(), keys::TODOS);
        let goals = load_collection(store.as_ref(), keys::GOALS);
        let reminders = load_collection(store.as_ref(), keys::REMINDERS);
        let sessions = load_collection(store.as_ref(), keys::SESSIONS);
        let total_secs = load_scalar(store.as_ref(), keys::TOTAL_TIME);
        Self {
            store,
            engine: TimerEngine::new(),
            presets: PresetCatalog::built_in(),
            todos,
            goals,
            reminders,
            sessions,
            total_secs,
            tick: None,
        }
    }

    /// Apply saved configuration: the custom preset's shape and the
    /// optional default preset selection.
    pub fn apply_config(&mut self, config: &Config) {
        self.presets.update_custom(
            config.custom_preset.duration_min,
            config.custom_preset.intervals,
        );
        if let Some(id) = &config.default_preset {
            self.select_preset(id);
        }
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Select a preset by id. Allowed in any state; an in-progress run is
    /// not interrupted. Returns false for an unknown id.
    pub fn select_preset(&mut self, preset_id: &str) -> bool {
        let Some(preset) = self.presets.get(preset_id) else {
            return false;
        };
        self.engine.select_preset(preset.clone());
        true
    }

    /// Start a run. No-op (returning `None`) unless idle with a preset
    /// selected.
    pub fn start_timer(&mut self) -> Option<Event> {
        let handle = self.engine.start()?;
        self.tick = Some(handle);
        let preset = self.engine.selected_preset()?;
        Some(Event::TimerStarted {
            preset_id: preset.id.clone(),
            preset_name: preset.name.clone(),
            at: Utc::now(),
        })
    }

    /// Advance the timer by one second. The driver calls this once per
    /// elapsed second while running; calls in any other state are no-ops.
    /// Returns the current elapsed time.
    pub fn tick(&mut self) -> u64 {
        if let Some(handle) = &self.tick {
            self.engine.tick(handle);
        }
        self.engine.elapsed_secs()
    }

    pub fn pause_timer(&mut self) -> Option<Event> {
        if !self.engine.pause() {
            return None;
        }
        self.tick = None;
        Some(Event::TimerPaused {
            elapsed_secs: self.engine.elapsed_secs(),
            at: Utc::now(),
        })
    }

    pub fn resume_timer(&mut self) -> Option<Event> {
        let handle = self.engine.resume()?;
        self.tick = Some(handle);
        Some(Event::TimerResumed {
            elapsed_secs: self.engine.elapsed_secs(),
            at: Utc::now(),
        })
    }

    /// Stop the timer. When the run had positive elapsed time and a
    /// selected preset, appends a session and bumps the accumulated total
    /// as one step -- a caller never observes one without the other.
    /// Stopping from idle just resets, with no session and no error.
    pub fn stop_timer(&mut self) -> Event {
        self.tick = None;
        let at = Utc::now();
        let session = self.engine.stop().map(|run| {
            let session = StudySession::new(run.duration_secs, run.preset_name, at);
            self.sessions.push(session.clone());
            self.total_secs += run.duration_secs;
            persist(self.store.as_mut(), keys::SESSIONS, &self.sessions);
            persist(self.store.as_mut(), keys::TOTAL_TIME, &self.total_secs);
            session
        });
        Event::TimerStopped { session, at }
    }

    /// Update the custom preset. Declines a zero duration. When the custom
    /// preset is currently selected, the selection is refreshed in place.
    pub fn update_custom_preset(
        &mut self,
        duration_min: u32,
        intervals: u32,
    ) -> Option<&TimerPreset> {
        self.presets.update_custom(duration_min, intervals)?;
        let custom = self.presets.get(crate::timer::CUSTOM_PRESET_ID)?;
        if self
            .engine
            .selected_preset()
            .is_some_and(|p| p.id == custom.id)
        {
            self.engine.select_preset(custom.clone());
        }
        Some(custom)
    }

    // ── Todos ────────────────────────────────────────────────────────

    /// Append a todo. Whitespace-only text is declined (returns `None`).
    pub fn add_todo(&mut self, text: &str) -> Option<&TodoItem> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.todos.push(TodoItem::new(text));
        persist(self.store.as_mut(), keys::TODOS, &self.todos);
        self.todos.last()
    }

    /// Flip a todo's completed flag. Unknown ids are silently ignored.
    pub fn toggle_todo(&mut self, id: &str) -> bool {
        let Some(item) = self.todos.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        item.completed = !item.completed;
        persist(self.store.as_mut(), keys::TODOS, &self.todos);
        true
    }

    /// Remove a todo if present; removing an absent id is a no-op.
    pub fn remove_todo(&mut self, id: &str) -> bool {
        let before = self.todos.len();
        self.todos.retain(|t| t.id != id);
        let removed = self.todos.len() != before;
        if removed {
            persist(self.store.as_mut(), keys::TODOS, &self.todos);
        }
        removed
    }

    // ── Goals ────────────────────────────────────────────────────────

    pub fn add_goal(&mut self, text: &str) -> Option<&Goal> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.goals.push(Goal::new(text));
        persist(self.store.as_mut(), keys::GOALS, &self.goals);
        self.goals.last()
    }

    pub fn toggle_goal(&mut self, id: &str) -> bool {
        let Some(goal) = self.goals.iter_mut().find(|g| g.id == id) else {
            return false;
        };
        goal.completed = !goal.completed;
        persist(self.store.as_mut(), keys::GOALS, &self.goals);
        true
    }

    pub fn remove_goal(&mut self, id: &str) -> bool {
        let before = self.goals.len();
        self.goals.retain(|g| g.id != id);
        let removed = self.goals.len() != before;
        if removed {
            persist(self.store.as_mut(), keys::GOALS, &self.goals);
        }
        removed
    }

    // ── Reminders ────────────────────────────────────────────────────

    pub fn add_reminder(&mut self, text: &str, time: Option<String>) -> Option<&Reminder> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.reminders.push(Reminder::new(text, time));
        persist(self.store.as_mut(), keys::REMINDERS, &self.reminders);
        self.reminders.last()
    }

    pub fn remove_reminder(&mut self, id: &str) -> bool {
        let before = self.reminders.len();
        self.reminders.retain(|r| r.id != id);
        let removed = self.reminders.len() != before;
        if removed {
            persist(self.store.as_mut(), keys::REMINDERS, &self.reminders);
        }
        removed
    }

    // ── Snapshots ────────────────────────────────────────────────────

    pub fn todos(&self) -> &[TodoItem] {
        &self.todos
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn reminders(&self) -> &[Reminder] {
        &self.reminders
    }

    /// Full session log, insertion order (chronological).
    pub fn sessions(&self) -> &[StudySession] {
        &self.sessions
    }

    /// Lifetime accumulated study time in seconds.
    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    pub fn presets(&self) -> &[TimerPreset] {
        self.presets.all()
    }

    pub fn timer_state(&self) -> TimerState {
        self.engine.state()
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.engine.elapsed_secs()
    }

    pub fn selected_preset(&self) -> Option<&TimerPreset> {
        self.engine.selected_preset()
    }

    pub fn snapshot(&self) -> Event {
        Event::StateSnapshot {
            state: self.engine.state(),
            elapsed_secs: self.engine.elapsed_secs(),
            selected_preset: self.engine.selected_preset().cloned(),
            total_seconds_studied: self.total_secs,
            at: Utc::now(),
        }
    }
}

fn load_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    match store.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            eprintln!("storage: ignoring malformed value for '{key}': {e}");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(e) => {
            eprintln!("storage: failed to load '{key}': {e}");
            Vec::new()
        }
    }
}

fn load_scalar(store: &dyn KeyValueStore, key: &str) -> u64 {
    match store.get(key) {
        Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
            eprintln!("storage: ignoring malformed value for '{key}': {e}");
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            eprintln!("storage: failed to load '{key}': {e}");
            0
        }
    }
}

/// Write boundary: serialize and store, logging failures instead of
/// surfacing them. The in-memory change always stands.
fn persist<T: Serialize + ?Sized>(store: &mut dyn KeyValueStore, key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("storage: failed to serialize '{key}': {e}");
            return;
        }
    };
    if let Err(e) = store.set(key, &raw) {
        eprintln!("storage: failed to persist '{key}': {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorageError;
    use crate::storage::MemoryStore;
    use proptest::prelude::*;

    fn manager() -> StudyManager {
        StudyManager::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn add_todo_appends_uncompleted() {
        let mut mgr = manager();
        let id = mgr.add_todo("Read ch.1").unwrap().id.clone();
        assert_eq!(mgr.todos().len(), 1);
        assert!(!mgr.todos()[0].completed);
        assert_eq!(mgr.todos()[0].id, id);
    }

    #[test]
    fn blank_text_is_declined_everywhere() {
        let mut mgr = manager();
        assert!(mgr.add_todo("").is_none());
        assert!(mgr.add_todo("   ").is_none());
        assert!(mgr.add_goal("\t").is_none());
        assert!(mgr.add_reminder("  ", None).is_none());
        assert!(mgr.todos().is_empty());
        assert!(mgr.goals().is_empty());
        assert!(mgr.reminders().is_empty());
    }

    #[test]
    fn toggle_is_its_own_inverse() {
        let mut mgr = manager();
        let id = mgr.add_todo("Quiz").unwrap().id.clone();
        assert!(mgr.toggle_todo(&id));
        assert!(mgr.todos()[0].completed);
        assert!(mgr.toggle_todo(&id));
        assert!(!mgr.todos()[0].completed);
    }

    #[test]
    fn toggle_unknown_id_is_ignored() {
        let mut mgr = manager();
        mgr.add_todo("Quiz");
        assert!(!mgr.toggle_todo("no-such-id"));
        assert!(!mgr.todos()[0].completed);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut mgr = manager();
        let id = mgr.add_goal("pass algebra").unwrap().id.clone();
        assert!(mgr.remove_goal(&id));
        assert!(!mgr.remove_goal(&id));
        assert!(mgr.goals().is_empty());
    }

    #[test]
    fn todo_scenario_preserves_order() {
        let mut mgr = manager();
        let first = mgr.add_todo("Read ch.1").unwrap().id.clone();
        let second = mgr.add_todo("Read ch.2").unwrap().id.clone();
        mgr.add_todo("Quiz");
        mgr.toggle_todo(&second);
        mgr.remove_todo(&first);

        let todos = mgr.todos();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].text, "Read ch.2");
        assert!(todos[0].completed);
        assert_eq!(todos[1].text, "Quiz");
        assert!(!todos[1].completed);
    }

    #[test]
    fn reminders_keep_optional_time() {
        let mut mgr = manager();
        mgr.add_reminder("office hours", Some("14:00".into()));
        mgr.add_reminder("hydrate", None);
        assert_eq!(mgr.reminders()[0].time.as_deref(), Some("14:00"));
        assert!(mgr.reminders()[1].time.is_none());
    }

    #[test]
    fn start_without_preset_is_noop() {
        let mut mgr = manager();
        assert!(mgr.start_timer().is_none());
        assert_eq!(mgr.timer_state(), TimerState::Idle);
    }

    #[test]
    fn full_timer_run_records_one_session() {
        let mut mgr = manager();
        assert!(mgr.select_preset("preset-1"));
        mgr.start_timer().unwrap();
        for _ in 0..5 {
            mgr.tick();
        }

        mgr.pause_timer().unwrap();
        assert_eq!(mgr.tick(), 5); // paused: tick must not advance
        assert_eq!(mgr.timer_state(), TimerState::Paused);

        mgr.resume_timer().unwrap();
        assert_eq!(mgr.elapsed_secs(), 5);

        let event = mgr.stop_timer();
        let Event::TimerStopped {
            session: Some(session),
            ..
        } = event
        else {
            panic!("expected a recorded session");
        };
        assert_eq!(session.duration_secs, 5);
        assert_eq!(session.preset_name, "30 minutes with 1 interval");
        assert_eq!(mgr.sessions().len(), 1);
        assert_eq!(mgr.total_secs(), 5);
        assert_eq!(mgr.timer_state(), TimerState::Idle);
        assert_eq!(mgr.elapsed_secs(), 0);

        // Stopping again immediately records nothing further.
        let Event::TimerStopped { session, .. } = mgr.stop_timer() else {
            panic!("expected TimerStopped");
        };
        assert!(session.is_none());
        assert_eq!(mgr.sessions().len(), 1);
        assert_eq!(mgr.total_secs(), 5);
    }

    #[test]
    fn totals_accumulate_across_runs() {
        let mut mgr = manager();
        mgr.select_preset("preset-2");
        for expected in [3u64, 7] {
            mgr.start_timer().unwrap();
            for _ in 0..expected {
                mgr.tick();
            }
            mgr.stop_timer();
        }
        assert_eq!(mgr.sessions().len(), 2);
        assert_eq!(mgr.total_secs(), 10);
    }

    #[test]
    fn unknown_preset_is_rejected() {
        let mut mgr = manager();
        assert!(!mgr.select_preset("preset-99"));
        assert!(mgr.selected_preset().is_none());
    }

    #[test]
    fn custom_preset_update_refreshes_selection() {
        let mut mgr = manager();
        mgr.select_preset("preset-custom");
        mgr.update_custom_preset(90, 2).unwrap();
        let selected = mgr.selected_preset().unwrap();
        assert_eq!(selected.duration_min, 90);
        assert_eq!(selected.intervals, 2);
        // A non-custom selection is left alone.
        mgr.select_preset("preset-1");
        mgr.update_custom_preset(50, 1).unwrap();
        assert_eq!(mgr.selected_preset().unwrap().duration_min, 30);
    }

    #[test]
    fn collections_survive_reopening_the_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("study-catcher.db");

        {
            let store = Database::open_at(&path).unwrap();
            let mut mgr = StudyManager::new(Box::new(store));
            mgr.add_todo("Read ch.2");
            mgr.add_goal("finish problem set");
            mgr.add_reminder("review", Some("09:00".into()));
            mgr.select_preset("preset-1");
            mgr.start_timer().unwrap();
            mgr.tick();
            mgr.stop_timer();
        }

        let store = Database::open_at(&path).unwrap();
        let mgr = StudyManager::new(Box::new(store));
        assert_eq!(mgr.todos().len(), 1);
        assert_eq!(mgr.todos()[0].text, "Read ch.2");
        assert_eq!(mgr.goals().len(), 1);
        assert_eq!(mgr.reminders()[0].time.as_deref(), Some("09:00"));
        assert_eq!(mgr.sessions().len(), 1);
        assert_eq!(mgr.total_secs(), 1);
        // Runtime state is transient: a fresh manager starts idle.
        assert_eq!(mgr.timer_state(), TimerState::Idle);
    }

    /// Store that fails every write. The manager must keep operating on
    /// its in-memory state.
    struct FailingStore;

    impl KeyValueStore for FailingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(None)
        }
        fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::QueryFailed("disk full".into()))
        }
        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::QueryFailed("disk full".into()))
        }
        fn clear_all(&mut self) -> Result<(), StorageError> {
            Err(StorageError::QueryFailed("disk full".into()))
        }
    }

    #[test]
    fn write_failures_keep_in_memory_state() {
        let mut mgr = StudyManager::new(Box::new(FailingStore));
        mgr.add_todo("still here");
        assert_eq!(mgr.todos().len(), 1);
        mgr.select_preset("preset-1");
        mgr.start_timer().unwrap();
        mgr.tick();
        let Event::TimerStopped { session, .. } = mgr.stop_timer() else {
            panic!("expected TimerStopped");
        };
        assert!(session.is_some());
        assert_eq!(mgr.total_secs(), 1);
    }

    proptest! {
        #[test]
        fn add_appends_exactly_one(text in "[a-zA-Z0-9 .,]{1,40}") {
            prop_assume!(!text.trim().is_empty());
            let mut mgr = manager();
            let before = mgr.todos().len();
            let added = mgr.add_todo(&text).is_some();
            prop_assert!(added);
            prop_assert_eq!(mgr.todos().len(), before + 1);
            prop_assert!(!mgr.todos().last().unwrap().completed);
        }

        #[test]
        fn toggle_twice_restores_collection(texts in proptest::collection::vec("[a-z]{1,10}", 1..8), pick in 0usize..8) {
            let mut mgr = manager();
            for t in &texts {
                mgr.add_todo(t);
            }
            let idx = pick % mgr.todos().len();
            let id = mgr.todos()[idx].id.clone();
            let before = mgr.todos().to_vec();
            mgr.toggle_todo(&id);
            mgr.toggle_todo(&id);
            prop_assert_eq!(mgr.todos(), before.as_slice());
        }
    }
}
