//! Error types for the ChartMogul MCP server
//!
//! Provider and transport errors stop at the tool layer, which logs them
//! and returns no result. Argument and protocol errors reach the MCP client.

use thiserror::Error;

/// Crate-wide error
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Startup
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required setting: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid setting '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // ============================================================================
    // ChartMogul API
    // ============================================================================
    #[error("Request to ChartMogul failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("ChartMogul returned {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("ChartMogul rate limit hit, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("ChartMogul did not answer within {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Unexpected ChartMogul response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Tool calls
    // ============================================================================
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Missing required argument: {argument}")]
    MissingArgument { argument: String },

    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument { argument: String, message: String },

    // ============================================================================
    // Transport
    // ============================================================================
    #[error("Protocol error: {message}")]
    Protocol { message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Required setting absent
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Setting present but unusable
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Non-success HTTP status with the response body
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Response body that does not match the expected shape
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Tool name not in the catalog
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool { name: name.into() }
    }

    /// Required tool argument absent or blank
    pub fn missing_argument(argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            argument: argument.into(),
        }
    }

    /// Tool argument that cannot be coerced
    pub fn invalid_argument(argument: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            message: message.into(),
        }
    }

    /// MCP transport failure
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }

    /// Whether another attempt might succeed: transport failures, timeouts,
    /// 429 and 5xx gateway/availability statuses
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(_) | Self::RateLimited { .. } | Self::Timeout { .. } => true,
            Self::HttpStatus { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }

    /// Whether the caller supplied bad tool input (as opposed to a provider failure)
    pub fn is_argument_error(&self) -> bool {
        matches!(
            self,
            Self::MissingArgument { .. } | Self::InvalidArgument { .. }
        )
    }
}

/// Result type alias for the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Prefix an error with what was being attempted
pub trait ResultExt<T> {
    /// Add a fixed prefix
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add a lazily built prefix
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.with_context(|| message.into())
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::Other(format!("{}: {}", f(), e.into())))
    }
}
