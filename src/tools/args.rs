//! Tool argument coercion
//!
//! MCP clients are loose about types: limits arrive as strings, booleans as
//! `"true"`. Coercion here is the only validation tool input gets.

use crate::error::{Error, Result};
use crate::normalize::Moment;
use crate::types::{non_blank, JsonObject};
use serde_json::Value;

/// Arguments of one tool call
#[derive(Debug, Clone, Default)]
pub struct Arguments(JsonObject);

impl Arguments {
    /// Wrap the `arguments` member of a `tools/call` request.
    ///
    /// A missing or null value is an empty argument set.
    pub fn from_value(value: Option<Value>) -> Result<Self> {
        match value {
            None | Some(Value::Null) => Ok(Self::default()),
            Some(Value::Object(map)) => Ok(Self(map)),
            Some(other) => Err(Error::invalid_argument(
                "arguments",
                format!("expected an object, got {}", type_name(&other)),
            )),
        }
    }

    fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Optional text; empty strings count as absent
    pub fn optional_str(&self, name: &str) -> Result<Option<String>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(non_blank(s)),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(other) => Err(Error::invalid_argument(
                name,
                format!("expected a string, got {}", type_name(other)),
            )),
        }
    }

    /// Required text
    pub fn required_str(&self, name: &str) -> Result<String> {
        self.optional_str(name)?
            .ok_or_else(|| Error::missing_argument(name))
    }

    /// Item cap: an integer or an integer-valued string
    pub fn limit(&self, name: &str, default: i64) -> Result<i64> {
        match self.get(name) {
            None => Ok(default),
            Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
                Error::invalid_argument(name, format!("expected an integer, got {n}"))
            }),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(default),
            Some(Value::String(s)) => s.trim().parse::<i64>().map_err(|_| {
                Error::invalid_argument(name, format!("expected an integer, got '{s}'"))
            }),
            Some(other) => Err(Error::invalid_argument(
                name,
                format!("expected an integer, got {}", type_name(other)),
            )),
        }
    }

    /// Optional boolean: `true`/`false` as JSON booleans or strings
    pub fn optional_bool(&self, name: &str) -> Result<Option<bool>> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "" => Ok(None),
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                _ => Err(Error::invalid_argument(
                    name,
                    format!("expected true or false, got '{s}'"),
                )),
            },
            Some(other) => Err(Error::invalid_argument(
                name,
                format!("expected a boolean, got {}", type_name(other)),
            )),
        }
    }

    /// Optional ISO-8601 date or date-time, forwarded as given
    pub fn optional_date(&self, name: &str) -> Result<Option<String>> {
        let Some(text) = self.optional_str(name)? else {
            return Ok(None);
        };
        match Moment::parse(&text) {
            Moment::Raw(_) => Err(Error::invalid_argument(
                name,
                format!("expected an ISO 8601 date, got '{text}'"),
            )),
            _ => Ok(Some(text)),
        }
    }

    /// Required ISO-8601 date or date-time
    pub fn required_date(&self, name: &str) -> Result<String> {
        self.optional_date(name)?
            .ok_or_else(|| Error::missing_argument(name))
    }

    /// Required attribute object
    pub fn data(&self, name: &str) -> Result<Value> {
        match self.get(name) {
            None => Err(Error::missing_argument(name)),
            Some(Value::Object(map)) => Ok(Value::Object(map.clone())),
            // some clients send nested objects as JSON text
            Some(Value::String(s)) => match serde_json::from_str::<Value>(s) {
                Ok(Value::Object(map)) => Ok(Value::Object(map)),
                _ => Err(Error::invalid_argument(name, "expected an object")),
            },
            Some(other) => Err(Error::invalid_argument(
                name,
                format!("expected an object, got {}", type_name(other)),
            )),
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
