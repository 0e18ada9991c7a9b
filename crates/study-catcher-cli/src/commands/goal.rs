use clap::Subcommand;

#[derive(Subcommand)]
pub enum GoalAction {
    /// Add a goal
    Add {
        /// Goal text
        text: String,
    },
    /// List goals as JSON
    List,
    /// Flip a goal's completed flag
    Toggle {
        /// Goal ID
        id: String,
    },
    /// Remove a goal
    Remove {
        /// Goal ID
        id: String,
    },
}

pub fn run(action: GoalAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut mgr = super::open_manager();

    match action {
        GoalAction::Add { text } => match mgr.add_goal(&text) {
            Some(goal) => println!("{}", serde_json::to_string_pretty(goal)?),
            None => return Err("goal text is empty".into()),
        },
        GoalAction::List => {
            println!("{}", serde_json::to_string_pretty(mgr.goals())?);
        }
        GoalAction::Toggle { id } => {
            if mgr.toggle_goal(&id) {
                println!("toggled: {id}");
            } else {
                println!("goal not found: {id}");
            }
        }
        GoalAction::Remove { id } => {
            if mgr.remove_goal(&id) {
                println!("removed: {id}");
            } else {
                println!("goal not found: {id}");
            }
        }
    }
    Ok(())
}
