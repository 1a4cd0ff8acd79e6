//! Command handlers.
//!
//! One module per command. Each handler composes the session store and
//! the user directory from the shared context, performs no local error
//! recovery, and returns the first failure unchanged.

pub mod login;
pub mod register;
pub mod users;

use crate::context::AppContext;
use crate::errors::CliError;
use crate::registry::{Command, CommandKind, HandlerFuture, Registry};

/// Build the registry with every supported command bound.
pub fn build_registry() -> Result<Registry, CliError> {
    let mut registry = Registry::new();

    registry.register(CommandKind::Register, register_handler)?;
    registry.register(CommandKind::Login, login_handler)?;
    registry.register(CommandKind::Users, users_handler)?;

    Ok(registry)
}

fn register_handler<'a>(ctx: &'a AppContext, cmd: &'a Command) -> HandlerFuture<'a> {
    Box::pin(register::run(ctx, cmd))
}

fn login_handler<'a>(ctx: &'a AppContext, cmd: &'a Command) -> HandlerFuture<'a> {
    Box::pin(login::run(ctx, cmd))
}

fn users_handler<'a>(ctx: &'a AppContext, cmd: &'a Command) -> HandlerFuture<'a> {
    Box::pin(users::run(ctx, cmd))
}

/// The non-empty user name `register` and `login` require.
pub(crate) fn require_name<'a>(
    cmd: &'a Command,
    command: &'static str,
) -> Result<&'a str, CliError> {
    cmd.param().ok_or_else(|| CliError::InvalidArgument {
        command,
        reason: "a non-empty user name is required".to_string(),
    })
}
