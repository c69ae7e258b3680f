use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "todo", about = concat!("terminal-todo v", env!("CARGO_PKG_VERSION"), " - tabbed todo lists in your terminal"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// App directory holding config, UI state, and logs (default: ~/.terminal-todo)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Data file to use instead of the configured one
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,

    /// Back up an unreadable data file and start fresh
    #[arg(long, global = true)]
    pub reset: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all tabs
    Tabs,
    /// Tab management
    Tab(TabCmd),
    /// List tasks in a tab
    List(ListArgs),
    /// Add a task
    Add(AddArgs),
    /// Toggle a task between done and not done
    Done(TaskArgs),
    /// Delete a task
    Rm(TaskArgs),
}

// ---------------------------------------------------------------------------
// Tab args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct TabCmd {
    #[command(subcommand)]
    pub action: TabAction,
}

#[derive(Subcommand)]
pub enum TabAction {
    /// Create a new tab and focus it
    Add(TabAddArgs),
    /// Delete a tab and all of its tasks
    Rm(TabArg),
    /// Focus a tab
    Use(TabArg),
}

#[derive(Args)]
pub struct TabAddArgs {
    /// Tab name (default: "Tab N")
    #[arg(default_value = "")]
    pub name: String,
}

#[derive(Args)]
pub struct TabArg {
    /// Tab id or exact name
    pub tab: String,
}

// ---------------------------------------------------------------------------
// Task args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ListArgs {
    /// Tab id or exact name (default: the focused tab)
    pub tab: Option<String>,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,
    /// Tab id or exact name (default: the focused tab)
    #[arg(long)]
    pub tab: Option<String>,
}

#[derive(Args)]
pub struct TaskArgs {
    /// Task id (e.g. T-001)
    pub task: String,
    /// Tab id or exact name (default: the focused tab)
    #[arg(long)]
    pub tab: Option<String>,
}
