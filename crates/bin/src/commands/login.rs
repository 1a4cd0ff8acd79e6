//! The `login` command: switch the session to an existing user.

use crate::commands::require_name;
use crate::context::AppContext;
use crate::errors::CliError;
use crate::registry::Command;

/// Run the `login <name>` command
pub async fn run(ctx: &AppContext, cmd: &Command) -> Result<(), CliError> {
    let name = require_name(cmd, "login")?;

    // Login is identity selection, not authentication: the user just has
    // to exist.
    let user = ctx.directory.find_by_name(name).await?;

    ctx.session.set_active_user(&user.name)?;

    println!("Logged in as {}", user.name);
    Ok(())
}
