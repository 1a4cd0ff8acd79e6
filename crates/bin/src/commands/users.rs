//! The `users` command: list every registered user.

use crate::context::AppContext;
use crate::errors::CliError;
use crate::registry::Command;

/// Run the `users` command
///
/// Prints records in whatever order the directory returns them.
pub async fn run(ctx: &AppContext, _cmd: &Command) -> Result<(), CliError> {
    let users = ctx.directory.list_all().await?;

    if users.is_empty() {
        println!("No users registered.");
        return Ok(());
    }

    let current = ctx.session.current_user();
    for user in &users {
        let marker = if current.as_deref() == Some(user.name.as_str()) {
            " (current)"
        } else {
            ""
        };
        println!(
            "{}  {}  created {}{}",
            user.name,
            user.id,
            user.created_at.to_rfc3339(),
            marker
        );
    }

    Ok(())
}
