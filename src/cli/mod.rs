//! CLI module
//!
//! Command-line interface for the tap.
//!
//! # Commands
//!
//! - `check` - Test connection and credentials against the API
//! - `discover` - Print the stream catalog
//! - `read` - Extract data and emit messages as JSON lines
//! - `validate` - Validate the configuration without making requests

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
