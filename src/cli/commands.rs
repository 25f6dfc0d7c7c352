//! CLI commands and argument parsing

use crate::logging::LogFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// ChartMogul MCP server
#[derive(Parser, Debug)]
#[command(name = "chartmogul-mcp")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// ChartMogul API key (overrides CHARTMOGUL_TOKEN)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// ChartMogul API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the MCP server on stdin/stdout
    Serve,

    /// Print the tool catalog
    Tools {
        /// Print full definitions with input schemas
        #[arg(long)]
        json: bool,
    },

    /// Invoke one tool and print its normalized output
    Call {
        /// Tool name
        tool: String,

        /// Arguments as a JSON object
        #[arg(long)]
        args: Option<String>,
    },

    /// Retrieve the account to verify credentials
    Check,
}

impl Cli {
    /// The command to run; `serve` when none was given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
