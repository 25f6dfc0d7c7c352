// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # ChartMogul MCP
//!
//! A Model Context Protocol server exposing the ChartMogul API to agents.
//!
//! ## Features
//!
//! - **Capped cursor pagination**: List tools walk ChartMogul cursors until
//!   roughly `limit` items are collected, then stop
//! - **Normalized results**: Typed records become plain JSON with ISO-8601
//!   dates, unknown provider fields passed through
//! - **Absorbed failures**: Provider errors are logged and surface as `null`
//! - **Retry and rate limiting**: Backoff on 429/5xx, optional token bucket
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use chartmogul_mcp::{ChartMogulClient, ServerConfig, ToolHandler};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> chartmogul_mcp::Result<()> {
//!     let config = ServerConfig::load(None)?;
//!     config.validate()?;
//!
//!     let client = ChartMogulClient::new(&config)?;
//!     let handler = ToolHandler::new(client, config.pagination());
//!
//!     let customers = handler
//!         .call("list_customers", Some(json!({ "status": "Active", "limit": 50 })))
//!         .await?;
//!     println!("{customers:?}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  MCP (JSON-RPC over stdio)                      │
//! │  initialize    ping    tools/list    tools/call                 │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬───────────┬─────────────┐
//! │  Tools   │ ChartMogul│  Pagination   │ Normalize │    HTTP     │
//! ├──────────┼───────────┼───────────────┼───────────┼─────────────┤
//! │ Catalog  │ Models    │ Cursor loop   │ Records   │ Basic auth  │
//! │ Args     │ Resources │ Limit cap     │ Dates     │ Retry       │
//! │ Dispatch │ Metrics   │ All-or-nothing│ Extras    │ Rate Limit  │
//! └──────────┴───────────┴───────────────┴───────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Authentication for the ChartMogul API
pub mod auth;

/// HTTP client with retry and rate limiting
pub mod http;

/// Capped cursor pagination
pub mod pagination;

/// Record normalization
pub mod normalize;

/// ChartMogul API client, records and resources
pub mod chartmogul;

/// Server configuration
pub mod config;

/// Logging setup
pub mod logging;

/// Tool catalog and dispatch
pub mod tools;

/// MCP protocol and stdio server
pub mod mcp;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use chartmogul::ChartMogulClient;
pub use config::ServerConfig;
pub use mcp::McpServer;
pub use normalize::{normalize, Normalize};
pub use pagination::{aggregate, Filters, PageRequest, PageResponse};
pub use tools::ToolHandler;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
