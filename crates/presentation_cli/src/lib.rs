//! SmartRent command-line interface
//!
//! Argument parsing lives in [`cli`], command execution in [`commands`], so
//! both can be exercised without spawning the binary.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, log_filter_from_verbosity};
pub use commands::{CommandOutput, execute};
