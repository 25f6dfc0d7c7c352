//! Tool layer
//!
//! The catalog of tools exposed over MCP, argument coercion, and dispatch
//! to the ChartMogul client.
//!
//! A tool call ends in one of three ways:
//!
//! - `Ok(Some(value))`: the normalized result
//! - `Ok(None)`: the provider call failed; the failure has been logged
//! - `Err(_)`: unknown tool or unusable arguments

mod args;
mod catalog;
mod handler;

pub use args::Arguments;
pub use catalog::{
    definitions, find, Listing, Operation, Param, ParamKind, ToolDefinition, ToolSpec, TOOLS,
};
pub use handler::ToolHandler;
