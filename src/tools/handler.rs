//! Tool dispatch
//!
//! Turns a tool name and its arguments into ChartMogul calls. Provider
//! failures stop here: they are logged and the call yields `None`.

use super::args::Arguments;
use super::catalog::{self, Listing, Operation, Param, ParamKind, ToolSpec};
use crate::chartmogul::models::{
    Activity, Contact, Customer, CustomerNote, DataSource, Opportunity, Plan, PlanGroup,
    Subscription, Task,
};
use crate::chartmogul::{ChartMogulClient, Entity, MetricsQuery, Resource};
use crate::error::{Error, Result};
use crate::normalize::Normalize;
use crate::pagination::{aggregate, Filters, PaginationConfig};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use tracing::{error, info, info_span, Instrument};

/// Executes tools against a ChartMogul client
#[derive(Debug)]
pub struct ToolHandler {
    client: ChartMogulClient,
    pagination: PaginationConfig,
}

impl ToolHandler {
    /// Create a handler
    pub fn new(client: ChartMogulClient, pagination: PaginationConfig) -> Self {
        Self { client, pagination }
    }

    /// Get the ChartMogul client
    pub fn client(&self) -> &ChartMogulClient {
        &self.client
    }

    /// Run a tool.
    ///
    /// Returns `Err` only for an unknown tool or unusable arguments. A
    /// provider failure is `Ok(None)`.
    pub async fn call(&self, name: &str, arguments: Option<Value>) -> Result<Option<Value>> {
        let spec = catalog::find(name).ok_or_else(|| Error::unknown_tool(name))?;
        let args = Arguments::from_value(arguments)?;

        self.run(spec, &args)
            .instrument(info_span!("tool", name = spec.name))
            .await
    }

    async fn run(&self, spec: &ToolSpec, args: &Arguments) -> Result<Option<Value>> {
        match spec.operation {
            Operation::Account => {
                info!("Retrieving account information");
                Ok(absorb("retrieve account", self.client.account()).await)
            }
            Operation::ListSources => {
                let filters = collect_filters(spec.params, args)?;
                info!(filters = %filters, "Listing data sources");
                Ok(absorb("list data sources", self.client.data_sources(&filters)).await)
            }
            Operation::List(listing) => self.list(spec, listing, args).await,
            Operation::Retrieve(entity) => {
                let uuid = args.required_str("uuid")?;
                info!(uuid = %uuid, "Retrieving {entity}");
                Ok(self.retrieve(entity, &uuid).await)
            }
            Operation::Create(entity) => {
                let data = args.data("data")?;
                info!(data = %data, "Creating {entity}");
                Ok(self.create(entity, data).await)
            }
            Operation::Update(entity) => {
                let uuid = args.required_str("uuid")?;
                let data = args.data("data")?;
                info!(uuid = %uuid, data = %data, "Updating {entity}");
                Ok(self.update(entity, &uuid, data).await)
            }
            Operation::Metrics(metric) => {
                let query = MetricsQuery {
                    start_date: args.required_date("start_date")?,
                    end_date: args.required_date("end_date")?,
                    interval: args.required_str("interval")?,
                    geo: args.optional_str("geo")?,
                    plans: args.optional_str("plans")?,
                };
                info!(
                    start_date = %query.start_date,
                    end_date = %query.end_date,
                    interval = %query.interval,
                    geo = query.geo.as_deref().unwrap_or(""),
                    plans = query.plans.as_deref().unwrap_or(""),
                    "Fetching {metric} metrics"
                );
                let entries = async {
                    let report = self.client.metrics(metric, &query).await?;
                    Ok::<_, Error>(report.entries)
                };
                Ok(absorb(&format!("fetch {metric} metrics"), entries).await)
            }
        }
    }

    async fn list(
        &self,
        spec: &ToolSpec,
        listing: Listing,
        args: &Arguments,
    ) -> Result<Option<Value>> {
        let filters = collect_filters(spec.params, args)?;
        let limit = args.limit("limit", self.pagination.default_limit)?;

        let resource = match listing {
            Listing::Customers => Resource::Customers,
            Listing::CustomerSearch => Resource::CustomerSearch,
            Listing::CustomerSubscriptions => Resource::CustomerSubscriptions {
                customer_uuid: args.required_str("uuid")?,
            },
            Listing::CustomerActivities => Resource::CustomerActivities {
                customer_uuid: args.required_str("uuid")?,
            },
            Listing::Contacts => Resource::Contacts,
            Listing::CustomerNotes => Resource::CustomerNotes,
            Listing::Opportunities => Resource::Opportunities,
            Listing::Plans => Resource::Plans,
            Listing::PlanGroups => Resource::PlanGroups,
            Listing::PlanGroupPlans => Resource::PlanGroupPlans {
                plan_group_uuid: args.required_str("uuid")?,
            },
            Listing::Tasks => Resource::Tasks,
        };

        info!(
            resource = %resource,
            filters = %filters,
            limit,
            "Listing {resource}"
        );

        let entries = match listing {
            Listing::Customers | Listing::CustomerSearch => {
                self.aggregate::<Customer>(&resource, &filters, limit).await
            }
            Listing::CustomerSubscriptions => {
                self.aggregate::<Subscription>(&resource, &filters, limit)
                    .await
            }
            Listing::CustomerActivities => {
                self.aggregate::<Activity>(&resource, &filters, limit).await
            }
            Listing::Contacts => self.aggregate::<Contact>(&resource, &filters, limit).await,
            Listing::CustomerNotes => {
                self.aggregate::<CustomerNote>(&resource, &filters, limit)
                    .await
            }
            Listing::Opportunities => {
                self.aggregate::<Opportunity>(&resource, &filters, limit)
                    .await
            }
            Listing::Plans | Listing::PlanGroupPlans => {
                self.aggregate::<Plan>(&resource, &filters, limit).await
            }
            Listing::PlanGroups => {
                self.aggregate::<PlanGroup>(&resource, &filters, limit)
                    .await
            }
            Listing::Tasks => self.aggregate::<Task>(&resource, &filters, limit).await,
        };

        Ok(report(&format!("list {resource}"), entries.map(Value::Array)))
    }

    async fn aggregate<R>(
        &self,
        resource: &Resource,
        filters: &Filters,
        limit: i64,
    ) -> Result<Vec<Value>>
    where
        R: DeserializeOwned + Normalize,
    {
        aggregate(
            |request| self.client.fetch_page::<R>(resource, request),
            filters,
            limit,
            self.pagination.page_size,
        )
        .await
    }

    async fn retrieve(&self, entity: Entity, uuid: &str) -> Option<Value> {
        let operation = format!("retrieve {entity}");
        let client = &self.client;
        match entity {
            Entity::DataSource => absorb(&operation, client.retrieve::<DataSource>(entity, uuid)).await,
            Entity::Customer => absorb(&operation, client.retrieve::<Customer>(entity, uuid)).await,
            Entity::Contact => absorb(&operation, client.retrieve::<Contact>(entity, uuid)).await,
            Entity::CustomerNote => {
                absorb(&operation, client.retrieve::<CustomerNote>(entity, uuid)).await
            }
            Entity::Opportunity => {
                absorb(&operation, client.retrieve::<Opportunity>(entity, uuid)).await
            }
            Entity::Plan => absorb(&operation, client.retrieve::<Plan>(entity, uuid)).await,
            Entity::PlanGroup => absorb(&operation, client.retrieve::<PlanGroup>(entity, uuid)).await,
            Entity::Task => absorb(&operation, client.retrieve::<Task>(entity, uuid)).await,
        }
    }

    async fn create(&self, entity: Entity, data: Value) -> Option<Value> {
        let operation = format!("create {entity}");
        let client = &self.client;
        match entity {
            Entity::DataSource => absorb(&operation, client.create::<DataSource>(entity, data)).await,
            Entity::Customer => absorb(&operation, client.create::<Customer>(entity, data)).await,
            Entity::Contact => absorb(&operation, client.create::<Contact>(entity, data)).await,
            Entity::CustomerNote => {
                absorb(&operation, client.create::<CustomerNote>(entity, data)).await
            }
            Entity::Opportunity => {
                absorb(&operation, client.create::<Opportunity>(entity, data)).await
            }
            Entity::Plan => absorb(&operation, client.create::<Plan>(entity, data)).await,
            Entity::PlanGroup => absorb(&operation, client.create::<PlanGroup>(entity, data)).await,
            Entity::Task => absorb(&operation, client.create::<Task>(entity, data)).await,
        }
    }

    async fn update(&self, entity: Entity, uuid: &str, data: Value) -> Option<Value> {
        let operation = format!("update {entity}");
        let client = &self.client;
        match entity {
            Entity::DataSource => {
                absorb(&operation, client.update::<DataSource>(entity, uuid, data)).await
            }
            Entity::Customer => absorb(&operation, client.update::<Customer>(entity, uuid, data)).await,
            Entity::Contact => absorb(&operation, client.update::<Contact>(entity, uuid, data)).await,
            Entity::CustomerNote => {
                absorb(&operation, client.update::<CustomerNote>(entity, uuid, data)).await
            }
            Entity::Opportunity => {
                absorb(&operation, client.update::<Opportunity>(entity, uuid, data)).await
            }
            Entity::Plan => absorb(&operation, client.update::<Plan>(entity, uuid, data)).await,
            Entity::PlanGroup => {
                absorb(&operation, client.update::<PlanGroup>(entity, uuid, data)).await
            }
            Entity::Task => absorb(&operation, client.update::<Task>(entity, uuid, data)).await,
        }
    }
}

/// Await a provider call, normalizing success and absorbing failure
async fn absorb<T, F>(operation: &str, call: F) -> Option<Value>
where
    T: Normalize,
    F: Future<Output = Result<T>>,
{
    report(operation, call.await.map(|value| value.normalize()))
}

fn report(operation: &str, result: Result<Value>) -> Option<Value> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!(operation, error = %e, "ChartMogul request failed");
            None
        }
    }
}

/// Build provider filters from the filter-like parameters of a tool
fn collect_filters(params: &[Param], args: &Arguments) -> Result<Filters> {
    let mut filters = Filters::new();
    for param in params {
        match param.kind {
            ParamKind::Text if param.required => {
                filters.insert(param.name, Some(args.required_str(param.name)?));
            }
            ParamKind::Text => filters.insert(param.name, args.optional_str(param.name)?),
            ParamKind::Date => filters.insert(param.name, args.optional_date(param.name)?),
            ParamKind::Flag => filters.insert(param.name, args.optional_bool(param.name)?),
            ParamKind::Uuid | ParamKind::Limit | ParamKind::Data => {}
        }
    }
    Ok(filters)
}
