//! Auth configuration types

use std::fmt;

/// Authentication configuration
#[derive(Clone, Default)]
pub enum AuthConfig {
    /// No authentication required
    #[default]
    None,

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
}

impl AuthConfig {
    /// ChartMogul API key auth: the key is the Basic username, password empty
    pub fn api_key(key: impl Into<String>) -> Self {
        Self::Basic {
            username: key.into(),
            password: String::new(),
        }
    }

    /// Check whether any credentials are configured
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// Secrets never reach the logs.
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Basic { .. } => f
                .debug_struct("Basic")
                .field("username", &"***")
                .field("password", &"***")
                .finish(),
        }
    }
}
