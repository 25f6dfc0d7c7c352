//! ChartMogul API client
//!
//! Thin typed layer over [`HttpClient`]: builds paths and query strings,
//! decodes JSON into the records in [`super::models`]. Errors are returned
//! as-is; deciding what a failure means is left to the caller.

use super::models::{Account, DataSource, DataSourceList, MetricsReport};
use super::resource::{Entity, Metric, Resource};
use crate::config::ServerConfig;
use crate::error::Result;
use crate::http::{HttpClient, RequestConfig};
use crate::pagination::{Filters, PageRequest, PageResponse};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

/// Parameters shared by every metrics report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsQuery {
    /// First day of the report (`YYYY-MM-DD`)
    pub start_date: String,
    /// Last day of the report (`YYYY-MM-DD`)
    pub end_date: String,
    /// `day`, `week`, `month` or `quarter`
    pub interval: String,
    /// Comma-separated ISO country codes
    pub geo: Option<String>,
    /// Comma-separated plan names or UUIDs
    pub plans: Option<String>,
}

impl MetricsQuery {
    /// Query parameters in ChartMogul's spelling
    pub fn to_filters(&self) -> Filters {
        Filters::new()
            .with("start-date", Some(&self.start_date))
            .with("end-date", Some(&self.end_date))
            .with("interval", Some(&self.interval))
            .with("geo", self.geo.as_ref())
            .with("plans", self.plans.as_ref())
    }
}

/// Client for the ChartMogul REST API
#[derive(Debug)]
pub struct ChartMogulClient {
    http: HttpClient,
}

impl ChartMogulClient {
    /// Create a client from server configuration
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let http = HttpClient::with_auth(config.http_client_config(), config.auth_config())?;
        Ok(Self { http })
    }

    /// Wrap an already configured HTTP client
    pub fn from_http(http: HttpClient) -> Self {
        Self { http }
    }

    /// Get the underlying HTTP client
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Fetch one page of a paginated collection
    pub async fn fetch_page<R: DeserializeOwned>(
        &self,
        resource: &Resource,
        request: PageRequest,
    ) -> Result<PageResponse<R>> {
        debug!(
            resource = %resource,
            cursor = request.cursor.as_deref().unwrap_or(""),
            per_page = request.page_size,
            "Fetching page"
        );

        let mut config = RequestConfig::new()
            .queries(request.filters.iter())
            .query("per_page", request.page_size.to_string());
        if let Some(cursor) = request.cursor {
            config = config.query("cursor", cursor);
        }

        self.http
            .get_json_with_config(&resource.path(), config)
            .await
    }

    /// Retrieve the account the API key belongs to
    pub async fn account(&self) -> Result<Account> {
        self.http.get_json("account").await
    }

    /// List data sources (single page)
    pub async fn data_sources(&self, filters: &Filters) -> Result<Vec<DataSource>> {
        let config = RequestConfig::new().queries(filters.iter());
        let list: DataSourceList = self
            .http
            .get_json_with_config(Entity::DataSource.collection_path(), config)
            .await?;
        Ok(list.data_sources)
    }

    /// Retrieve a single record by UUID
    pub async fn retrieve<R: DeserializeOwned>(&self, entity: Entity, uuid: &str) -> Result<R> {
        self.http.get_json(&entity.item_path(uuid)).await
    }

    /// Create a record
    pub async fn create<R: DeserializeOwned>(&self, entity: Entity, data: Value) -> Result<R> {
        self.http
            .post_json(entity.collection_path(), data)
            .await
    }

    /// Update attributes of a record
    pub async fn update<R: DeserializeOwned>(
        &self,
        entity: Entity,
        uuid: &str,
        data: Value,
    ) -> Result<R> {
        self.http.patch_json(&entity.item_path(uuid), data).await
    }

    /// Fetch a metrics report
    pub async fn metrics(&self, metric: Metric, query: &MetricsQuery) -> Result<MetricsReport> {
        let config = RequestConfig::new().queries(query.to_filters().iter());
        self.http
            .get_json_with_config(metric.path(), config)
            .await
    }
}
