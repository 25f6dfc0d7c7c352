//! Authentication module
//!
//! Supports: HTTP Basic (ChartMogul API key), None
//!
//! ChartMogul authenticates with HTTP Basic where the API key is the
//! username and the password is left empty.

mod authenticator;
mod types;

pub use authenticator::Authenticator;
pub use types::AuthConfig;
