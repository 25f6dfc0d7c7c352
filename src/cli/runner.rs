//! CLI runner - executes commands

use crate::chartmogul::ChartMogulClient;
use crate::cli::commands::{Cli, Commands};
use crate::config::ServerConfig;
use crate::error::{Error, Result, ResultExt};
use crate::mcp::McpServer;
use crate::tools::{self, ToolHandler};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match self.cli.command() {
            Commands::Serve => self.serve().await,
            Commands::Tools { json } => self.tools(json),
            Commands::Call { tool, args } => self.call(&tool, args.as_deref()).await,
            Commands::Check => self.check().await,
        }
    }

    /// Load and validate configuration.
    ///
    /// Precedence: defaults, then the YAML file, then the environment,
    /// then command-line flags.
    pub fn load_config(&self) -> Result<ServerConfig> {
        let mut config = ServerConfig::load(self.cli.config.as_deref())?;
        config.apply_overrides(self.cli.api_key.clone(), self.cli.base_url.clone());
        config.validate()?;
        debug!(config = ?config, "Loaded configuration");
        Ok(config)
    }

    fn handler(config: &ServerConfig) -> Result<ToolHandler> {
        let client = ChartMogulClient::new(config)?;
        Ok(ToolHandler::new(client, config.pagination()))
    }

    /// Run the MCP server on stdio
    async fn serve(&self) -> Result<()> {
        let config = self.load_config()?;
        let handler = Self::handler(&config)?;
        let server = Arc::new(McpServer::new(handler, config.server_name.clone()));
        server.serve_stdio().await
    }

    /// Print the tool catalog
    fn tools(&self, full: bool) -> Result<()> {
        if full {
            println!("{}", serde_json::to_string_pretty(tools::definitions())?);
            return Ok(());
        }

        let width = tools::TOOLS.iter().map(|t| t.name.len()).max().unwrap_or(0);
        for tool in tools::TOOLS {
            let summary = tool.description.lines().next().unwrap_or_default();
            println!("{:width$}  {summary}", tool.name);
        }
        Ok(())
    }

    /// Invoke a single tool
    async fn call(&self, tool: &str, args: Option<&str>) -> Result<()> {
        let arguments = args
            .map(|raw| {
                serde_json::from_str::<Value>(raw)
                    .map_err(|e| Error::invalid_argument("--args", format!("invalid JSON: {e}")))
            })
            .transpose()?;

        let config = self.load_config()?;
        let handler = Self::handler(&config)?;

        match handler.call(tool, arguments).await? {
            Some(output) => {
                println!("{}", serde_json::to_string_pretty(&output)?);
                Ok(())
            }
            None => {
                println!("null");
                Err(Error::Other(format!("Tool '{tool}' returned no result")))
            }
        }
    }

    /// Verify credentials
    async fn check(&self) -> Result<()> {
        let config = self.load_config()?;
        let client = ChartMogulClient::new(&config)?;

        info!(base_url = %config.base_url, "Checking connection");
        let account = client
            .account()
            .await
            .with_context(|| format!("Connection check against {} failed", config.base_url))?;

        let status = json!({
            "status": "SUCCEEDED",
            "account": crate::normalize::normalize(&account),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        Ok(())
    }
}
