//! Command registration and dispatch.
//!
//! Command names are parsed into a tagged [`CommandKind`] rather than
//! looked up by raw string, so dispatch ranges over a closed set of
//! operations while keeping the register-then-dispatch contract: binding
//! the same kind twice is an error, and dispatching a name with no bound
//! handler is an error. Registration happens once at startup; the table
//! is read-only afterwards.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use crate::context::AppContext;
use crate::errors::CliError;

/// A parsed invocation: a command name and its arguments.
///
/// Transient; constructed from process input for a single dispatch and
/// discarded after.
#[derive(Debug, Clone)]
pub struct Command {
    /// The command name as typed
    pub name: String,
    /// Everything after the command name
    pub args: Vec<String>,
}

impl Command {
    pub fn new(name: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// The single parameter commands take, if present and non-empty.
    pub fn param(&self) -> Option<&str> {
        self.args
            .first()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// The supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Create a user and activate the session for it
    Register,
    /// Switch the session to an existing user
    Login,
    /// List every registered user
    Users,
}

impl CommandKind {
    /// Parse a command name. Anything unrecognized is `None`.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "register" => Some(CommandKind::Register),
            "login" => Some(CommandKind::Login),
            "users" => Some(CommandKind::Users),
            _ => None,
        }
    }

    /// The name this command is invoked by.
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Register => "register",
            CommandKind::Login => "login",
            CommandKind::Users => "users",
        }
    }
}

/// Future returned by a handler invocation.
pub type HandlerFuture<'a> = Pin<Box<dyn Future<Output = Result<(), CliError>> + Send + 'a>>;

/// A command handler.
///
/// Borrows the shared execution context and the parsed command for the
/// duration of one invocation.
pub type Handler = for<'a> fn(&'a AppContext, &'a Command) -> HandlerFuture<'a>;

/// Startup-time binding of command kinds to handlers.
pub struct Registry {
    handlers: HashMap<CommandKind, Handler>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Bind `handler` to `kind`.
    ///
    /// Fails with [`CliError::DuplicateCommand`] when the kind is
    /// already bound.
    pub fn register(&mut self, kind: CommandKind, handler: Handler) -> Result<(), CliError> {
        if self.handlers.contains_key(&kind) {
            return Err(CliError::DuplicateCommand { name: kind.name() });
        }

        self.handlers.insert(kind, handler);
        tracing::debug!(command = kind.name(), "registered command");
        Ok(())
    }

    /// Dispatch a parsed command against the bound handlers.
    ///
    /// A name that resolves to no bound handler fails with
    /// [`CliError::UnknownCommand`] before any effect; otherwise the
    /// handler runs and its result is returned unchanged.
    pub async fn dispatch(&self, ctx: &AppContext, command: &Command) -> Result<(), CliError> {
        let handler = CommandKind::parse(&command.name)
            .and_then(|kind| self.handlers.get(&kind))
            .ok_or_else(|| CliError::UnknownCommand {
                name: command.name.clone(),
            })?;

        tracing::debug!(command = %command.name, args = ?command.args, "dispatching command");
        handler(ctx, command).await
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop_handler<'a>(_ctx: &'a AppContext, _cmd: &'a Command) -> HandlerFuture<'a> {
        Box::pin(async { Ok(()) })
    }

    #[test]
    fn test_kind_parse_round_trip() {
        for kind in [CommandKind::Register, CommandKind::Login, CommandKind::Users] {
            assert_eq!(CommandKind::parse(kind.name()), Some(kind));
        }
        assert_eq!(CommandKind::parse("delete"), None);
        assert_eq!(CommandKind::parse(""), None);
        assert_eq!(CommandKind::parse("REGISTER"), None);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = Registry::new();
        registry
            .register(CommandKind::Users, noop_handler)
            .unwrap();

        let err = registry
            .register(CommandKind::Users, noop_handler)
            .unwrap_err();
        assert!(err.is_duplicate_command());
    }

    #[test]
    fn test_command_param() {
        let cmd = Command::new("login", vec!["alice".to_string()]);
        assert_eq!(cmd.param(), Some("alice"));

        let cmd = Command::new("login", vec![]);
        assert_eq!(cmd.param(), None);

        let cmd = Command::new("login", vec![String::new()]);
        assert_eq!(cmd.param(), None);
    }
}
