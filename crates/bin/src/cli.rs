//! CLI argument definitions for the Roster binary.
//!
//! Argument parsing stops at extracting a command name and its trailing
//! arguments; resolving the name to an operation is the registry's job,
//! so an unrecognized command flows through dispatch rather than dying
//! inside clap.

use std::path::PathBuf;

use clap::Parser;

/// Roster: manage registered users and the active session
#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(about = "Roster: manage registered users and the active session")]
#[command(version)]
pub struct Cli {
    /// Path to the session document.
    /// Defaults to .rosterconfig.json in the home directory.
    #[arg(short, long, env = "ROSTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Command to run: register, login, or users
    pub command: String,

    /// Arguments for the command (a user name for register and login)
    pub args: Vec<String>,
}
