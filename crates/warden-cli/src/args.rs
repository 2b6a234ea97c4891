use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Workflow guard rails for coding agents
///
/// Warden validates the actions an agent is about to take. Planning documents
/// must follow the plan template, and git usage must follow the direct-to-trunk
/// workflow: no branches, no merges, commits only on the trunk branch and no
/// force pushes. Blocked actions exit with status 2 and print the violations
/// on stderr.
#[derive(Parser)]
#[command(version, about, name = "warden")]
pub struct Args {
    /// Path to a JSON configuration file. Defaults to
    /// $XDG_CONFIG_HOME/warden/config.json when it exists
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Trunk branch all commits must land on (overrides the configuration)
    #[arg(long, global = true)]
    pub trunk: Option<String>,

    /// Treat this as the current branch instead of asking git
    #[arg(long, global = true)]
    pub branch: Option<String>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the Warden CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Validate an intercepted agent action (hook entry point)
    ///
    /// The payload is the hook JSON, e.g.
    /// {"tool":"Bash","tool_input":{"command":"git merge dev"}}.
    /// It is read from stdin when not given as an argument.
    Hook {
        /// Hook payload JSON
        payload: Option<String>,
    },
    /// Validate a planning document on disk
    #[command(alias = "vp")]
    ValidatePlan {
        /// Path to the planning document
        file: PathBuf,
    },
    /// Check a shell command against the git workflow policy
    #[command(alias = "cc")]
    CheckCommand {
        /// The command, quoted as a single argument
        command: String,
    },
    /// Show the active plan, task and workflow rules
    Context,
    /// Start the MCP server
    Serve,
}
