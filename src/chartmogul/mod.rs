//! ChartMogul API module
//!
//! Typed client for the ChartMogul REST API (`https://api.chartmogul.com/v1`).
//!
//! # Overview
//!
//! - [`Resource`] enumerates the paginated collections; every one of them is
//!   fetched through [`ChartMogulClient::fetch_page`] and so fits the
//!   [`aggregate`](crate::pagination::aggregate) contract.
//! - [`Entity`] enumerates records addressable by UUID for retrieve, create
//!   and update.
//! - [`Metric`] enumerates the Metrics API reports.
//!
//! Authentication is HTTP Basic with the API key as the username and an
//! empty password.

mod client;
pub mod models;
mod resource;

pub use client::{ChartMogulClient, MetricsQuery};
pub use resource::{Entity, Metric, Resource};
