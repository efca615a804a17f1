//! Command-line surface for the job tracker.
//!
//! # Responsibility
//! - Parse `company` / `contact` / `job` command groups.
//! - Translate commands into service calls and render their results.
//! - Map typed errors to exit codes.

pub mod args;
pub mod commands;
pub mod error;
pub mod exitcode;

pub use args::{Cli, Commands};
pub use commands::execute_command;
pub use error::{CliError, CliResult};
