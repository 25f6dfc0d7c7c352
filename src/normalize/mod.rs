//! Result normalization
//!
//! Deep-converts provider records into plain JSON: mappings, sequences,
//! strings, numbers, booleans and null. Date and date-time values become
//! ISO-8601 strings; nothing else changes meaning.
//!
//! # Overview
//!
//! Record types do not need to know about JSON. They expose an ordered
//! field enumeration through [`Fields`], and [`normalize_fields`] walks it.
//! The [`impl_fields!`](crate::impl_fields) macro writes both impls for a
//! struct from its field list.
//!
//! ```rust
//! use chartmogul_mcp::impl_fields;
//! use chartmogul_mcp::normalize::Normalize;
//! use chrono::NaiveDate;
//!
//! struct Invoice {
//!     uuid: String,
//!     date: NaiveDate,
//! }
//!
//! impl_fields!(Invoice { uuid, date });
//!
//! let invoice = Invoice {
//!     uuid: "inv_1".into(),
//!     date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
//! };
//! assert_eq!(
//!     invoice.normalize(),
//!     serde_json::json!({"uuid": "inv_1", "date": "2024-03-01"})
//! );
//! ```

mod moment;

pub use moment::Moment;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Conversion into a plain, transport-safe JSON value.
///
/// Implementations must be total: every value has a normalized form.
pub trait Normalize {
    /// Produce the normalized representation
    fn normalize(&self) -> Value;
}

/// Ordered field enumeration for structured records
pub trait Fields {
    /// Field names paired with their values, in declaration order
    fn fields(&self) -> Vec<(&str, &dyn Normalize)>;
}

/// Normalize any value
pub fn normalize<T: Normalize + ?Sized>(value: &T) -> Value {
    value.normalize()
}

/// Normalize a record through its field enumeration, keeping field order
pub fn normalize_fields<R: Fields + ?Sized>(record: &R) -> Value {
    let mut map = Map::new();
    for (name, value) in record.fields() {
        let name = name.strip_prefix("r#").unwrap_or(name);
        map.insert(name.to_string(), value.normalize());
    }
    Value::Object(map)
}

/// Implement [`Fields`] and [`Normalize`] for a struct from its field list.
///
/// An optional trailing `..extra` names a `serde_json::Map` field whose
/// entries are appended after the declared fields (used for provider
/// attributes the model does not name).
#[macro_export]
macro_rules! impl_fields {
    ($ty:ty { $($field:ident),* $(,)? } $(.. $extra:ident)?) => {
        impl $crate::normalize::Fields for $ty {
            #[allow(unused_mut)]
            fn fields(&self) -> Vec<(&str, &dyn $crate::normalize::Normalize)> {
                let mut fields: Vec<(&str, &dyn $crate::normalize::Normalize)> = vec![
                    $((stringify!($field), &self.$field as &dyn $crate::normalize::Normalize)),*
                ];
                $(
                    fields.extend(
                        self.$extra
                            .iter()
                            .map(|(k, v)| (k.as_str(), v as &dyn $crate::normalize::Normalize)),
                    );
                )?
                fields
            }
        }

        impl $crate::normalize::Normalize for $ty {
            fn normalize(&self) -> ::serde_json::Value {
                $crate::normalize::normalize_fields(self)
            }
        }
    };
}

// ============================================================================
// Plain values (returned unchanged)
// ============================================================================

impl Normalize for Value {
    fn normalize(&self) -> Value {
        self.clone()
    }
}

impl Normalize for Map<String, Value> {
    fn normalize(&self) -> Value {
        Value::Object(self.clone())
    }
}

impl Normalize for Number {
    fn normalize(&self) -> Value {
        Value::Number(self.clone())
    }
}

impl Normalize for str {
    fn normalize(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl Normalize for String {
    fn normalize(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Normalize for bool {
    fn normalize(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! normalize_integer {
    ($($ty:ty),*) => {
        $(
            impl Normalize for $ty {
                fn normalize(&self) -> Value {
                    Value::Number(Number::from(*self))
                }
            }
        )*
    };
}

normalize_integer!(i32, i64, u32, u64, usize);

impl Normalize for f64 {
    fn normalize(&self) -> Value {
        // NaN and infinities have no JSON form
        Number::from_f64(*self).map_or(Value::Null, Value::Number)
    }
}

// ============================================================================
// Containers
// ============================================================================

impl<T: Normalize> Normalize for Option<T> {
    fn normalize(&self) -> Value {
        self.as_ref().map_or(Value::Null, Normalize::normalize)
    }
}

impl<T: Normalize> Normalize for Vec<T> {
    fn normalize(&self) -> Value {
        self.as_slice().normalize()
    }
}

impl<T: Normalize> Normalize for [T] {
    fn normalize(&self) -> Value {
        Value::Array(self.iter().map(Normalize::normalize).collect())
    }
}

impl<T: Normalize> Normalize for BTreeMap<String, T> {
    fn normalize(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(k, v)| (k.clone(), v.normalize()))
                .collect(),
        )
    }
}

// ============================================================================
// Temporal values
// ============================================================================

impl Normalize for NaiveDate {
    fn normalize(&self) -> Value {
        Value::String(self.format("%Y-%m-%d").to_string())
    }
}

impl Normalize for NaiveDateTime {
    fn normalize(&self) -> Value {
        Value::String(self.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
    }
}

impl<Tz: TimeZone> Normalize for DateTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn normalize(&self) -> Value {
        Value::String(self.to_rfc3339_opts(SecondsFormat::AutoSi, false))
    }
}
