//! Capped cursor aggregation
//!
//! Drives a page-fetching operation until the provider reports exhaustion
//! or the item cap is reached, normalizing entries as they arrive.

use super::types::{AggregationState, Filters, PageRequest, PageResponse};
use crate::error::Result;
use crate::normalize::Normalize;
use serde_json::Value;
use std::future::Future;
use tracing::{debug, error};

/// Fetch pages with `fetch_page` and return their normalized entries.
///
/// Termination is checked before each fetch: pages are requested while the
/// provider reports more and fewer than `limit` items have been requested.
/// Every fetch asks for `page_size` items, so the result may overshoot
/// `limit` by up to `page_size - 1` entries.
///
/// A failure on any page discards everything fetched so far and is
/// returned to the caller. A `limit` of zero or less performs no fetch.
pub async fn aggregate<R, F, Fut>(
    mut fetch_page: F,
    filters: &Filters,
    limit: i64,
    page_size: u32,
) -> Result<Vec<Value>>
where
    R: Normalize,
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<PageResponse<R>>>,
{
    let mut state = AggregationState::new();

    while state.should_fetch(limit) {
        let request = state.next_request(page_size, filters);

        let page = match fetch_page(request).await {
            Ok(page) => page,
            Err(e) => {
                error!(
                    page = state.pages + 1,
                    filters = %filters,
                    error = %e,
                    "Page fetch failed, discarding partial results"
                );
                return Err(e);
            }
        };

        debug!(
            page = state.pages + 1,
            entries = page.entries.len(),
            has_more = page.has_more,
            "Fetched page"
        );

        state.absorb(page, page_size);
    }

    debug!(
        pages = state.pages,
        entries = state.accumulated.len(),
        "Aggregation complete"
    );

    Ok(state.into_entries())
}
