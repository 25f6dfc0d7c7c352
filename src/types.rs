//! Common types used throughout the crate

use serde::{Deserialize, Serialize};

/// JSON object type
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// HTTP methods used against the ChartMogul API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    #[default]
    GET,
    POST,
    PATCH,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::GET => reqwest::Method::GET,
            Method::POST => reqwest::Method::POST,
            Method::PATCH => reqwest::Method::PATCH,
        }
    }
}

/// How retry delays grow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackoffType {
    /// Same delay every time
    Constant,
    /// `initial * attempt`
    Linear,
    /// `initial * 2^attempt`
    #[default]
    Exponential,
}

/// Trimmed text, or `None` if only whitespace remains
pub fn non_blank(text: &str) -> Option<String> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
