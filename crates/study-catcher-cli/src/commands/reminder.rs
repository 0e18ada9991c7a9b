use clap::Subcommand;

#[derive(Subcommand)]
pub enum ReminderAction {
    /// Add a reminder
    Add {
        /// Reminder text
        text: String,
        /// Display time as HH:MM (stored only, never triggers an alert)
        #[arg(long)]
        time: Option<String>,
    },
    /// List reminders as JSON
    List,
    /// Remove a reminder
    Remove {
        /// Reminder ID
        id: String,
    },
}

pub fn run(action: ReminderAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut mgr = super::open_manager();

    match action {
        ReminderAction::Add { text, time } => match mgr.add_reminder(&text, time) {
            Some(reminder) => println!("{}", serde_json::to_string_pretty(reminder)?),
            None => return Err("reminder text is empty".into()),
        },
        ReminderAction::List => {
            println!("{}", serde_json::to_string_pretty(mgr.reminders())?);
        }
        ReminderAction::Remove { id } => {
            if mgr.remove_reminder(&id) {
                println!("removed: {id}");
            } else {
                println!("reminder not found: {id}");
            }
        }
    }
    Ok(())
}
