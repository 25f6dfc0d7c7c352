//! Server configuration
//!
//! `ServerConfig` is built once at startup and handed to the client and the
//! tool layer. Sources, lowest precedence first: built-in defaults, an
//! optional YAML file, environment variables, command-line flags.
//!
//! ```yaml
//! api_key: "..."
//! base_url: https://api.chartmogul.com/v1
//! page_size: 20
//! default_limit: 20
//! timeout_seconds: 30
//! max_retries: 3
//! backoff: exponential
//! rate_limit:
//!   requests_per_second: 10
//!   burst_size: 10
//! ```

use crate::auth::AuthConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClientConfig, RateLimiterConfig};
use crate::pagination::{PaginationConfig, DEFAULT_LIMIT, DEFAULT_PAGE_SIZE};
use crate::types::BackoffType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "CHARTMOGUL_TOKEN";

/// Environment variable overriding the API base URL
pub const ENV_BASE_URL: &str = "CHARTMOGUL_BASE_URL";

/// Default ChartMogul API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.chartmogul.com/v1";

/// Runtime configuration for the MCP server
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// ChartMogul API key
    pub api_key: String,

    /// API base URL
    pub base_url: String,

    /// Name reported in the MCP handshake
    pub server_name: String,

    /// Items requested per page
    pub page_size: u32,

    /// Item cap when a tool call omits `limit`
    pub default_limit: i64,

    /// Request timeout in seconds
    pub timeout_seconds: u64,

    /// Retries for transient HTTP failures
    pub max_retries: u32,

    /// Initial retry delay in milliseconds
    pub initial_backoff_ms: u64,

    /// Maximum retry delay in milliseconds
    pub max_backoff_ms: u64,

    /// Backoff strategy between retries
    pub backoff: BackoffType,

    /// Client-side rate limit (disabled when absent)
    pub rate_limit: Option<RateLimiterConfig>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            server_name: default_server_name(),
            page_size: DEFAULT_PAGE_SIZE,
            default_limit: DEFAULT_LIMIT,
            timeout_seconds: 30,
            max_retries: 3,
            initial_backoff_ms: 100,
            max_backoff_ms: 60_000,
            backoff: BackoffType::Exponential,
            rate_limit: Some(RateLimiterConfig::default()),
        }
    }
}

fn default_server_name() -> String {
    "mcp-chartmogul".to_string()
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("server_name", &self.server_name)
            .field("page_size", &self.page_size)
            .field("default_limit", &self.default_limit)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_retries", &self.max_retries)
            .field("initial_backoff_ms", &self.initial_backoff_ms)
            .field("max_backoff_ms", &self.max_backoff_ms)
            .field("backoff", &self.backoff)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from defaults, an optional YAML file and the
    /// process environment. The result is not validated yet.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Load configuration from a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read config file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Apply environment overrides using `lookup` to read variables
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(key) = lookup(ENV_API_KEY).filter(|v| !v.is_empty()) {
            self.api_key = key;
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
    }

    /// Apply command-line overrides
    pub fn apply_overrides(&mut self, api_key: Option<String>, base_url: Option<String>) {
        if let Some(key) = api_key {
            self.api_key = key;
        }
        if let Some(url) = base_url {
            self.base_url = url;
        }
    }

    /// Check the configuration is usable
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::missing_field(format!(
                "api_key (set {ENV_API_KEY} or pass --api-key)"
            )));
        }

        let url = url::Url::parse(&self.base_url)
            .map_err(|e| Error::invalid_config("base_url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_config(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.page_size == 0 {
            return Err(Error::invalid_config("page_size", "must be at least 1"));
        }

        if let Some(rate_limit) = &self.rate_limit {
            if rate_limit.requests_per_second == 0 {
                return Err(Error::invalid_config(
                    "rate_limit.requests_per_second",
                    "must be at least 1",
                ));
            }
        }

        Ok(())
    }

    /// Pagination settings for the tool layer
    pub fn pagination(&self) -> PaginationConfig {
        PaginationConfig {
            page_size: self.page_size,
            default_limit: self.default_limit,
        }
    }

    /// Credentials for the HTTP client
    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig::api_key(&self.api_key)
    }

    /// HTTP client settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.timeout_seconds))
            .max_retries(self.max_retries)
            .backoff(
                self.backoff,
                Duration::from_millis(self.initial_backoff_ms),
                Duration::from_millis(self.max_backoff_ms),
            );

        match &self.rate_limit {
            Some(rate_limit) => builder.rate_limit(rate_limit.clone()),
            None => builder.no_rate_limit(),
        }
        .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.base_url, "https://api.chartmogul.com/v1");
        assert_eq!(config.server_name, "mcp-chartmogul");
        assert_eq!(config.page_size, 20);
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.timeout_seconds, 30);
        assert_eq!(config.max_retries, 3);
        assert_eq!(config.backoff, BackoffType::Exponential);
        assert!(config.rate_limit.is_some());
    }

    #[test]
    fn test_auth_config_is_api_key_basic() {
        let config = ServerConfig {
            api_key: "cm-key".to_string(),
            ..ServerConfig::default()
        };
        match config.auth_config() {
            AuthConfig::Basic { username, password } => {
                assert_eq!(username, "cm-key");
                assert!(password.is_empty());
            }
            other => panic!("Expected Basic, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_yaml_partial() {
        let yaml = r"
api_key: secret
page_size: 50
backoff: linear
rate_limit: null
";
        let config = ServerConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.api_key, "secret");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.backoff, BackoffType::Linear);
        assert!(config.rate_limit.is_none());
        // untouched fields keep their defaults
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_parse_empty_yaml() {
        let config = ServerConfig::from_yaml("  \n").unwrap();
        assert_eq!(config.page_size, 20);
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let result = ServerConfig::from_yaml("page_size: [1, 2");
        assert!(matches!(result, Err(Error::YamlParse(_))));
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "api_key: from-file\ntimeout_seconds: 5").unwrap();

        let config = ServerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_key, "from-file");
        assert_eq!(config.timeout_seconds, 5);
    }

    #[test]
    fn test_from_missing_file() {
        let result = ServerConfig::from_file(Path::new("/nonexistent/chartmogul.yaml"));
        assert!(matches!(result, Err(Error::FileNotFound { .. })));
    }

    #[test]
    fn test_precedence() {
        let mut config = ServerConfig::from_yaml("api_key: yaml-key\nbase_url: http://yaml").unwrap();

        config.apply_env(env(&[(ENV_API_KEY, "env-key")]));
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, "http://yaml");

        config.apply_overrides(None, Some("http://flag".into()));
        assert_eq!(config.api_key, "env-key");
        assert_eq!(config.base_url, "http://flag");

        config.apply_overrides(Some("flag-key".into()), None);
        assert_eq!(config.api_key, "flag-key");
    }

    #[test]
    fn test_empty_env_is_ignored() {
        let mut config = ServerConfig {
            api_key: "kept".into(),
            ..Default::default()
        };
        config.apply_env(env(&[(ENV_API_KEY, ""), (ENV_BASE_URL, "")]));
        assert_eq!(config.api_key, "kept");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_validate() {
        let valid = ServerConfig {
            api_key: "key".into(),
            ..Default::default()
        };
        assert!(valid.validate().is_ok());

        let missing_key = ServerConfig::default();
        assert!(matches!(
            missing_key.validate(),
            Err(Error::MissingConfigField { .. })
        ));

        let bad_url = ServerConfig {
            base_url: "not a url".into(),
            ..valid.clone()
        };
        assert!(matches!(
            bad_url.validate(),
            Err(Error::InvalidConfigValue { ref field, .. }) if field == "base_url"
        ));

        let bad_scheme = ServerConfig {
            base_url: "ftp://api.chartmogul.com".into(),
            ..valid.clone()
        };
        assert!(bad_scheme.validate().is_err());

        let zero_page = ServerConfig {
            page_size: 0,
            ..valid
        };
        assert!(matches!(
            zero_page.validate(),
            Err(Error::InvalidConfigValue { ref field, .. }) if field == "page_size"
        ));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ServerConfig {
            api_key: "super-secret".into(),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_http_client_config() {
        let config = ServerConfig {
            api_key: "key".into(),
            timeout_seconds: 7,
            max_retries: 1,
            rate_limit: None,
            ..Default::default()
        };
        let http = config.http_client_config();
        assert_eq!(http.base_url.as_deref(), Some(DEFAULT_BASE_URL));
        assert_eq!(http.timeout, Duration::from_secs(7));
        assert_eq!(http.max_retries, 1);
        assert!(http.rate_limit.is_none());

        let pagination = config.pagination();
        assert_eq!(pagination.page_size, 20);
        assert_eq!(pagination.default_limit, 20);
    }
}
