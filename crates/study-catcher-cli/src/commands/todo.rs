use clap::Subcommand;

#[derive(Subcommand)]
pub enum TodoAction {
    /// Add a todo
    Add {
        /// Todo text
        text: String,
    },
    /// List todos as JSON
    List,
    /// Flip a todo's completed flag
    Toggle {
        /// Todo ID
        id: String,
    },
    /// Remove a todo
    Remove {
        /// Todo ID
        id: String,
    },
}

pub fn run(action: TodoAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut mgr = super::open_manager();

    match action {
        TodoAction::Add { text } => match mgr.add_todo(&text) {
            Some(item) => println!("{}", serde_json::to_string_pretty(item)?),
            None => return Err("todo text is empty".into()),
        },
        TodoAction::List => {
            println!("{}", serde_json::to_string_pretty(mgr.todos())?);
        }
        TodoAction::Toggle { id } => {
            if mgr.toggle_todo(&id) {
                println!("toggled: {id}");
            } else {
                println!("todo not found: {id}");
            }
        }
        TodoAction::Remove { id } => {
            if mgr.remove_todo(&id) {
                println!("removed: {id}");
            } else {
                println!("todo not found: {id}");
            }
        }
    }
    Ok(())
}
