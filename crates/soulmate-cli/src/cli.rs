use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "soulmate")]
#[command(version, about = "Soulmate - themed counseling chat administration")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Database path (defaults to ~/.soulmate/soulmate.db)
    #[arg(long, global = true, env = "SOULMATE_DB_PATH")]
    pub db_path: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage conversation themes
    #[command(subcommand)]
    Theme(ThemeCommands),

    /// Manage conversation approaches
    #[command(subcommand)]
    Approach(ApproachCommands),

    /// Inspect accounts
    #[command(subcommand)]
    User(UserCommands),

    /// Show a user's chat history grouped into sessions
    History {
        /// Account e-mail
        email: String,

        /// Print every exchange instead of the first one
        #[arg(long)]
        full: bool,
    },

    /// Show a user's profile
    Profile {
        /// Account e-mail
        email: String,
    },
}

#[derive(Subcommand)]
pub enum ThemeCommands {
    /// List themes
    List,

    /// Replace all themes with the built-in defaults
    Seed,
}

#[derive(Subcommand)]
pub enum ApproachCommands {
    /// List approaches
    List,

    /// Add an approach
    Add {
        /// Display name
        name: String,

        /// Style instructions appended to the system prompt
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Remove an approach
    Remove {
        /// Approach ID
        id: String,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// List accounts
    List,
}
