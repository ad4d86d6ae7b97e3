use clap::Parser;

/// Manage Google Calendar events from the terminal
#[derive(Parser, Debug)]
#[command(name = "googler", version, about)]
pub struct Cli {
    /// list your calendar
    #[arg(short, long)]
    pub list: bool,

    /// add a new schedule
    #[arg(short, long)]
    pub add: bool,

    /// delete a schedule
    #[arg(short, long)]
    pub delete: bool,

    /// edit a schedule
    #[arg(short, long)]
    pub edit: bool,
}

/// One of the supported operations on the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Add,
    Delete,
    Edit,
}

impl Cli {
    /// The selected action. With several flags, list beats add beats delete beats edit.
    pub fn action(&self) -> Option<Action> {
        if self.list {
            Some(Action::List)
        } else if self.add {
            Some(Action::Add)
        } else if self.delete {
            Some(Action::Delete)
        } else if self.edit {
            Some(Action::Edit)
        } else {
            None
        }
    }
}
