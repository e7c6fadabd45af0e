//! Argument definitions (clap derive).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// todoshare - personal to-do list with shareable links
#[derive(Parser, Debug)]
#[command(name = "todoshare")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding the database and logs (defaults to current directory)
    #[arg(long, global = true, env = "TODOSHARE_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true, env = "TODOSHARE_LOG_LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a task
    Add {
        /// Task text (surrounding whitespace is trimmed)
        text: String,

        /// low, medium or high (defaults to the configured priority)
        #[arg(short, long)]
        priority: Option<String>,

        /// Due date as YYYY-MM-DD or RFC 3339
        #[arg(short, long)]
        due: Option<String>,
    },

    /// List tasks passing the active filter
    List {
        /// Case-insensitive text search
        #[arg(short, long, default_value = "")]
        search: String,

        /// newest, oldest, alphabetical, priority or dueDate
        #[arg(long)]
        sort: Option<String>,

        /// Print the raw tasks as JSON
        #[arg(long)]
        json: bool,
    },

    /// Flip a task between active and completed
    Toggle { id: i64 },

    /// Delete a task
    Remove { id: i64 },

    /// Change fields of a task
    Edit {
        id: i64,

        #[arg(long)]
        text: Option<String>,

        #[arg(long)]
        priority: Option<String>,

        /// New due date (YYYY-MM-DD or RFC 3339)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<String>,

        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },

    /// Set the active filter (all, active, completed)
    Filter { value: String },

    /// Create a share link for a task
    Share {
        id: i64,

        /// view or edit
        #[arg(long, default_value = "view")]
        permission: String,

        /// Days until the link expires
        #[arg(long, default_value_t = todoshare_core::DEFAULT_EXPIRY_DAYS)]
        expiry_days: i64,
    },

    /// Check a share link or id and print its record
    Open { link: String },

    /// Revoke a share
    Revoke { share_id: String },

    /// Extend a share's expiry
    Extend {
        share_id: String,

        #[arg(long, allow_negative_numbers = true)]
        days: i64,
    },

    /// Replace a share's permission
    Permission { share_id: String, permission: String },

    /// List active shares of a task
    Shares { id: i64 },

    /// Remove every expired share record
    Cleanup,

    /// Import tasks from a shared-list JSON file
    Import {
        file: PathBuf,

        /// Also remember the list under the shared-lists view
        #[arg(long)]
        keep_list: bool,
    },

    /// List remembered shared lists
    Lists {
        #[arg(short, long, default_value = "")]
        search: String,

        /// newest, oldest or alphabetical
        #[arg(long, default_value = "newest")]
        sort: String,
    },

    /// Show or change settings
    Settings {
        #[arg(long)]
        theme: Option<String>,

        #[arg(long)]
        sort_by: Option<String>,

        #[arg(long)]
        show_completed: Option<bool>,

        #[arg(long)]
        default_priority: Option<String>,

        #[arg(long)]
        notifications: Option<bool>,
    },

    /// Delete all stored application data
    Clear {
        /// Required confirmation
        #[arg(long)]
        yes: bool,
    },
}
