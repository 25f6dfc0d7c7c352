//! Pagination types
//!
//! Request/response envelopes shared by every paginated resource, and the
//! transient state of one aggregation call.

use crate::normalize::Normalize;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Items fetched per page when nothing else is configured
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Item cap applied when a caller omits `limit`
pub const DEFAULT_LIMIT: i64 = 20;

/// Named filter parameters forwarded to the provider as query parameters.
///
/// Absent filters are simply not present; iteration order is by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters(BTreeMap<String, String>);

impl Filters {
    /// Create an empty filter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter if a value is present
    pub fn with(mut self, name: impl Into<String>, value: Option<impl ToString>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a filter if a value is present
    pub fn insert(&mut self, name: impl Into<String>, value: Option<impl ToString>) {
        if let Some(value) = value {
            self.0.insert(name.into(), value.to_string());
        }
    }

    /// Look up a filter value
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Iterate over filters as query pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of filters set
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no filters are set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Filters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (name, value)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={value}")?;
        }
        f.write_str("}")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Filters {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parameters for fetching a single page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Opaque continuation token (absent for the first page)
    pub cursor: Option<String>,
    /// Items requested per page
    pub page_size: u32,
    /// Filters for the collection
    pub filters: Filters,
}

impl PageRequest {
    /// Request for the first page
    pub fn first(page_size: u32, filters: Filters) -> Self {
        Self {
            cursor: None,
            page_size,
            filters,
        }
    }
}

/// One page of a ChartMogul collection.
///
/// ChartMogul names the entry list after the resource on a few endpoints;
/// those names are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PageResponse<R> {
    /// Entries in provider order
    #[serde(
        alias = "plans",
        alias = "plan_groups",
        alias = "data_sources",
        default = "Vec::new"
    )]
    pub entries: Vec<R>,
    /// Whether the provider reports further pages
    #[serde(default)]
    pub has_more: bool,
    /// Continuation token for the next page
    #[serde(rename = "cursor", default)]
    pub next_cursor: Option<String>,
}

impl<R> PageResponse<R> {
    /// Build a page (mostly useful for fakes and tests)
    pub fn new(entries: Vec<R>, has_more: bool, next_cursor: Option<String>) -> Self {
        Self {
            entries,
            has_more,
            next_cursor,
        }
    }
}

/// Aggregation settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Items requested per page
    pub page_size: u32,
    /// Cap used when the caller gives no limit
    pub default_limit: i64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            default_limit: DEFAULT_LIMIT,
        }
    }
}

/// Tracks one aggregation call
#[derive(Debug, Clone)]
pub struct AggregationState {
    /// Normalized entries accumulated so far (append-only)
    pub accumulated: Vec<Value>,
    /// Cursor for the next fetch
    pub cursor: Option<String>,
    /// Running total, advanced by the page size per fetch
    pub total: i64,
    /// Whether more pages are available
    pub has_more: bool,
    /// Pages fetched so far
    pub pages: u32,
}

impl Default for AggregationState {
    fn default() -> Self {
        Self {
            accumulated: Vec::new(),
            cursor: None,
            total: 0,
            has_more: true,
            pages: 0,
        }
    }
}

impl AggregationState {
    /// Create a fresh state
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether another page should be fetched
    pub fn should_fetch(&self, limit: i64) -> bool {
        self.has_more && self.total < limit
    }

    /// Request for the next page
    pub fn next_request(&self, page_size: u32, filters: &Filters) -> PageRequest {
        PageRequest {
            cursor: self.cursor.clone(),
            page_size,
            filters: filters.clone(),
        }
    }

    /// Fold a fetched page into the state.
    ///
    /// The running total advances by `page_size`, not by the number of
    /// entries the page actually held.
    pub fn absorb<R: Normalize>(&mut self, page: PageResponse<R>, page_size: u32) {
        self.accumulated
            .extend(page.entries.iter().map(Normalize::normalize));
        self.total += i64::from(page_size);
        self.has_more = page.has_more;
        self.cursor = page.next_cursor;
        self.pages += 1;
    }

    /// Consume the state, returning the accumulated entries
    pub fn into_entries(self) -> Vec<Value> {
        self.accumulated
    }
}
