use clap::Subcommand;
use study_catcher_core::{Database, KeyValueStore};

#[derive(Subcommand)]
pub enum DataAction {
    /// Remove all persisted study data (todos, goals, reminders,
    /// sessions, accumulated time). Only this app's keys are touched.
    Clear,
}

pub fn run(action: DataAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DataAction::Clear => {
            let mut db = Database::open()?;
            db.clear_all()?;
            println!("all study data cleared");
        }
    }
    Ok(())
}
