//! Pagination module
//!
//! Cursor pagination with a safety cap.
//!
//! # Overview
//!
//! Every paginated ChartMogul collection answers with the same envelope:
//! a list of entries, a `has_more` flag, and an opaque `cursor`. The
//! [`aggregate`] function drives any page-fetching operation that follows
//! that contract and returns the flattened, normalized entries.
//!
//! ```rust,ignore
//! let entries = aggregate(
//!     |request| client.fetch_page::<Customer>(&Resource::Customers, request),
//!     &Filters::new().with("status", Some("Active")),
//!     50,
//!     20,
//! )
//! .await?;
//! ```

mod aggregator;
mod types;

pub use aggregator::aggregate;
pub use types::{
    AggregationState, Filters, PageRequest, PageResponse, PaginationConfig, DEFAULT_LIMIT,
    DEFAULT_PAGE_SIZE,
};
