//! Library surface of the Roster CLI.
//!
//! The binary entry point is a thin wrapper; the argument surface, the
//! command registry, and the handlers live here so integration tests can
//! drive them directly.

pub mod cli;
pub mod commands;
pub mod context;
pub mod errors;
pub mod registry;

pub use context::AppContext;
pub use errors::CliError;
