mod config;
pub mod store;

pub use config::Config;
pub use store::{Database, KeyValueStore, MemoryStore};

use std::path::PathBuf;

/// Logical store keys. The store implementation owns the app prefix;
/// callers only ever see these names.
pub mod keys {
    pub const TODOS: &str = "todos";
    pub const GOALS: &str = "goals";
    pub const REMINDERS: &str = "reminders";
    pub const SESSIONS: &str = "studySessions";
    pub const TOTAL_TIME: &str = "totalTimeStudied";
}

/// Returns `~/.config/study-catcher[-dev]/` based on STUDY_CATCHER_ENV.
///
/// Set STUDY_CATCHER_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the config directory cannot be created.
pub fn data_dir() -> std::io::Result<PathBuf> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("STUDY_CATCHER_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("study-catcher-dev")
    } else {
        base_dir.join("study-catcher")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
