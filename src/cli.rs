use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "snap")]
#[command(about = "Minimal local snapshots of the current directory")]
#[command(version)]
pub struct Cli {
    /// Show debug logging and list skipped entries
    #[arg(long, short = 'v', global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create the .snap store in the current directory
    Init,

    /// Save a snapshot of the current directory
    Save(SaveArgs),

    /// List saved snapshots
    List(ListArgs),

    /// Replace the current directory with a snapshot
    Restore(IdArgs),

    /// Show differences between a snapshot and the current directory
    Diff(DiffArgs),
}

#[derive(Parser)]
pub struct SaveArgs {
    /// Message stored with the snapshot
    #[arg(num_args = 0..)]
    pub message: Vec<String>,
}

impl SaveArgs {
    /// words given on the command line joined back into one message
    pub fn message(&self) -> Option<String> {
        if self.message.is_empty() {
            None
        } else {
            Some(self.message.join(" "))
        }
    }
}

#[derive(Parser)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Parser)]
pub struct IdArgs {
    /// Snapshot ID
    pub id: u64,
}

#[derive(Parser)]
pub struct DiffArgs {
    /// Snapshot ID
    pub id: u64,

    /// Maximum number of lines to show
    #[arg(long)]
    pub lines: Option<usize>,
}
