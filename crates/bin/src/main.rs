//! Roster CLI entry point.
//!
//! Loads the session document, connects the user directory named by its
//! connection string, builds the command registry, and dispatches the
//! single command from the command line. Every failure exits non-zero
//! with one human-readable message.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use roster::{SessionStore, UserDirectory};
use roster_bin::cli::Cli;
use roster_bin::commands;
use roster_bin::context::AppContext;
use roster_bin::errors::CliError;
use roster_bin::registry::Command;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("roster=warn".parse().unwrap()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        if e.is_usage_error() {
            eprintln!();
            print_usage();
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config_path = match cli.config {
        Some(path) => path,
        None => SessionStore::default_path()?,
    };
    let session = SessionStore::load(&config_path)?;

    let connection_string = session.connection_string();
    tracing::info!(
        store = %redact_url(&connection_string),
        "connecting to user directory"
    );
    let directory = UserDirectory::connect(&connection_string).await?;

    let ctx = AppContext::new(session, directory);
    let registry = commands::build_registry()?;
    let command = Command::new(cli.command, cli.args);

    registry.dispatch(&ctx, &command).await
}

/// Redact credentials from a connection URL for safe logging
fn redact_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut redacted = parsed.clone();
        if !parsed.username().is_empty() {
            let _ = redacted.set_username("***");
        }
        if parsed.password().is_some() {
            let _ = redacted.set_password(Some("***"));
        }
        redacted.to_string()
    } else {
        // Not URL-shaped (e.g. a bare SQLite path); nothing to hide
        url.to_string()
    }
}

fn print_usage() {
    eprintln!("Usage: roster [--config <path>] <command> [arg]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  register <name>  register a new user and activate the session");
    eprintln!("  login <name>     switch the session to an existing user");
    eprintln!("  users            list registered users");
}
