//! # Study Catcher Core Library
//!
//! Core business logic for Study Catcher, a single-user study tracker.
//! All state lives in a single [`StudyManager`] that owns the timer state
//! machine, the preset catalog, and four persisted collections (todos,
//! goals, reminders, study sessions). Front ends are thin consumers: they
//! read snapshots and invoke manager operations.
//!
//! ## Architecture
//!
//! - **Timer engine**: an `Idle -> Running -> Paused` state machine driven
//!   by an external one-second tick. Tick ownership is explicit: starting
//!   or resuming issues a [`TickHandle`], pausing or stopping invalidates
//!   it, and ticks carrying a stale handle are ignored.
//! - **Storage**: a key-value store contract ([`KeyValueStore`]) with a
//!   SQLite-backed implementation and an in-memory fallback. Collections
//!   are written back in full after every mutation; write failures are
//!   logged and never surfaced to the caller.
//! - **Stats**: pure derived queries over the session log (last 7 days,
//!   today, lifetime totals) feeding the dashboard.

pub mod error;
pub mod events;
pub mod items;
pub mod session;
pub mod stats;
pub mod storage;
pub mod study;
pub mod timer;

pub use error::{ConfigError, CoreError, StorageError};
pub use events::Event;
pub use items::{Goal, Reminder, TodoItem};
pub use session::StudySession;
pub use stats::DashboardSummary;
pub use storage::{Config, Database, KeyValueStore, MemoryStore};
pub use study::StudyManager;
pub use timer::{PresetCatalog, TickHandle, TimerEngine, TimerPreset, TimerState};
