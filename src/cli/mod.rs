//! CLI module
//!
//! Command-line interface for the MCP server.
//!
//! # Commands
//!
//! - `serve` - Run the MCP server on stdio (default)
//! - `tools` - Print the tool catalog
//! - `call` - Invoke a single tool and print its output
//! - `check` - Verify credentials against the ChartMogul API

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
