//! The `register` command: create a user and activate the session.

use roster::directory::DirectoryError;

use crate::commands::require_name;
use crate::context::AppContext;
use crate::errors::CliError;
use crate::registry::Command;

/// Run the `register <name>` command
pub async fn run(ctx: &AppContext, cmd: &Command) -> Result<(), CliError> {
    let name = require_name(cmd, "register")?;

    // Existence probe: a hit is a hard conflict, a miss is the green
    // light to create. Registering twice is an error, not a no-op.
    match ctx.directory.find_by_name(name).await {
        Ok(existing) => {
            tracing::debug!(name = %existing.name, id = %existing.id, "registration probe hit");
            return Err(roster::Error::from(DirectoryError::already_exists(name)).into());
        }
        Err(e) if e.is_not_found() => {}
        Err(e) => return Err(e.into()),
    }

    // The store's uniqueness constraint stays authoritative: a race with
    // a concurrent registration surfaces here as the conflict error.
    let user = ctx.directory.create(name).await?;

    // Session activation is a distinct step with a distinct failure: the
    // user record already exists, so the operator reconciles with login.
    if let Err(e) = ctx.session.set_active_user(&user.name) {
        tracing::warn!(
            user = %user.name,
            "user created but session activation failed; `roster login {}` will retry it",
            user.name
        );
        return Err(e.into());
    }

    println!("Created user {} ({})", user.name, user.id);
    Ok(())
}
