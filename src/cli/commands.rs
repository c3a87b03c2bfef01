use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kario", about = concat!("kario v", env!("CARGO_PKG_VERSION"), " - a little task tracker"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Task collection file (default: kario-tasks.json, or kario.toml [store] file)
    #[arg(short = 'f', long = "file", global = true)]
    pub file: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an empty task collection file
    Init,
    /// Add a top-level task
    Add(AddArgs),
    /// List tasks
    List(ListArgs),
    /// Show one task with its subtasks
    Show(ShowArgs),
    /// Manage a task's subtasks
    Sub(SubCmd),
    /// Show the date-preset vocabulary, optionally narrowed by a query
    Presets(PresetsArgs),
}

// ---------------------------------------------------------------------------
// Shared field flags
// ---------------------------------------------------------------------------

/// Metadata flags shared by `add` and `sub add`.
#[derive(Args)]
pub struct FieldArgs {
    /// Description text
    #[arg(long = "desc")]
    pub description: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    /// Time of day (e.g. 09:30)
    #[arg(long)]
    pub time: Option<String>,
    /// Priority level 1-6 (default 3)
    #[arg(long)]
    pub priority: Option<String>,
    /// Free-text reminder (e.g. "15 min before")
    #[arg(long)]
    pub reminder: Option<String>,
    /// Labels, comma separated
    #[arg(long)]
    pub labels: Option<String>,
    /// Repeat rule (e.g. weekly)
    #[arg(long)]
    pub repeat: Option<String>,
}

// ---------------------------------------------------------------------------
// Top-level command args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Args)]
pub struct ListArgs {
    /// Only tasks due within a date preset window (e.g. "Tomorrow", "2 weeks")
    #[arg(long)]
    pub due: Option<String>,
    /// Include completed tasks
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct ShowArgs {
    /// Task id
    pub task_id: String,
}

#[derive(Args)]
pub struct PresetsArgs {
    /// Free-text query to narrow the vocabulary
    pub query: Option<String>,
}

// ---------------------------------------------------------------------------
// Subtask commands
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct SubCmd {
    #[command(subcommand)]
    pub command: SubCommands,
}

#[derive(Subcommand)]
pub enum SubCommands {
    /// Add a subtask to a task
    Add(SubAddArgs),
    /// Flip a subtask's completed flag
    Toggle(SubTargetArgs),
    /// Delete a subtask
    Rm(SubTargetArgs),
    /// Update fields of a subtask
    Set(SubSetArgs),
}

#[derive(Args)]
pub struct SubAddArgs {
    /// Owning task id
    pub task_id: String,
    /// Subtask title
    pub title: String,
    #[command(flatten)]
    pub fields: FieldArgs,
}

#[derive(Args)]
pub struct SubTargetArgs {
    /// Owning task id
    pub task_id: String,
    /// Subtask id
    pub subtask_id: String,
}

#[derive(Args)]
pub struct SubSetArgs {
    /// Owning task id
    pub task_id: String,
    /// Subtask id
    pub subtask_id: String,
    /// New title
    #[arg(long)]
    pub title: Option<String>,
    /// Mark completed
    #[arg(long, conflicts_with = "not_done")]
    pub done: bool,
    /// Mark not completed
    #[arg(long = "not-done")]
    pub not_done: bool,
    #[command(flatten)]
    pub fields: FieldArgs,
    /// Clear the due date
    #[arg(long, conflicts_with = "date")]
    pub clear_date: bool,
    /// Clear the time of day
    #[arg(long, conflicts_with = "time")]
    pub clear_time: bool,
    /// Clear the reminder
    #[arg(long, conflicts_with = "reminder")]
    pub clear_reminder: bool,
    /// Clear all labels
    #[arg(long, conflicts_with = "labels")]
    pub clear_labels: bool,
    /// Clear the repeat rule
    #[arg(long, conflicts_with = "repeat")]
    pub clear_repeat: bool,
}
