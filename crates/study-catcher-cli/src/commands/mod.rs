pub mod config;
pub mod data;
pub mod goal;
pub mod reminder;
pub mod stats;
pub mod timer;
pub mod todo;

use study_catcher_core::{MemoryStore, StudyManager};

/// Open the manager over the on-disk store, degrading to an in-memory
/// store when persistence is unavailable so every command stays usable.
pub(crate) fn open_manager() -> StudyManager {
    match StudyManager::open() {
        Ok(manager) => manager,
        Err(e) => {
            eprintln!("warning: persistent storage unavailable ({e}); changes will not be saved");
            StudyManager::new(Box::new(MemoryStore::new()))
        }
    }
}
