//! ChartMogul records
//!
//! Typed views of the provider's JSON. Each record names the attributes the
//! tools care about; anything else the provider sends is kept in `extra`
//! and passed through untouched when the record is normalized. Normalized
//! field names are snake_case even where the wire format uses hyphens.

use crate::impl_fields;
use crate::normalize::Moment;
use crate::types::JsonObject;
use serde::Deserialize;
use serde_json::{Number, Value};

/// Account the API key belongs to
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: Option<String>,
    pub name: Option<String>,
    pub currency: Option<String>,
    pub time_zone: Option<String>,
    pub week_start_on: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(Account { id, name, currency, time_zone, week_start_on } ..extra);

/// Billing system connection
#[derive(Debug, Clone, Deserialize)]
pub struct DataSource {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub system: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<Moment>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(DataSource { uuid, name, system, status, created_at } ..extra);

/// Single-page data source listing
#[derive(Debug, Clone, Deserialize)]
pub struct DataSourceList {
    #[serde(default)]
    pub data_sources: Vec<DataSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Customer {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub external_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    #[serde(rename = "customer-since")]
    pub customer_since: Option<Moment>,
    pub attributes: Option<Value>,
    pub address: Option<Value>,
    pub data_source_uuid: Option<String>,
    #[serde(default)]
    pub data_source_uuids: Vec<String>,
    #[serde(default)]
    pub external_ids: Vec<String>,
    pub company: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub lead_created_at: Option<Moment>,
    pub free_trial_started_at: Option<Moment>,
    pub mrr: Option<Number>,
    pub arr: Option<Number>,
    #[serde(rename = "billing-system-url")]
    pub billing_system_url: Option<String>,
    #[serde(rename = "chartmogul-url")]
    pub chartmogul_url: Option<String>,
    #[serde(rename = "billing-system-type")]
    pub billing_system_type: Option<String>,
    pub currency: Option<String>,
    #[serde(rename = "currency-sign")]
    pub currency_sign: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(Customer {
    id,
    uuid,
    external_id,
    name,
    email,
    status,
    customer_since,
    attributes,
    address,
    data_source_uuid,
    data_source_uuids,
    external_ids,
    company,
    country,
    state,
    city,
    zip,
    lead_created_at,
    free_trial_started_at,
    mrr,
    arr,
    billing_system_url,
    chartmogul_url,
    billing_system_type,
    currency,
    currency_sign,
} ..extra);

/// Subscription as listed under a customer
#[derive(Debug, Clone, Deserialize)]
pub struct Subscription {
    pub id: Option<i64>,
    pub uuid: Option<String>,
    pub external_id: Option<String>,
    pub plan: Option<String>,
    pub quantity: Option<Number>,
    pub mrr: Option<Number>,
    pub arr: Option<Number>,
    pub status: Option<String>,
    #[serde(rename = "billing-cycle")]
    pub billing_cycle: Option<String>,
    #[serde(rename = "billing-cycle-count")]
    pub billing_cycle_count: Option<Number>,
    #[serde(rename = "start-date")]
    pub start_date: Option<Moment>,
    #[serde(rename = "end-date")]
    pub end_date: Option<Moment>,
    pub currency: Option<String>,
    #[serde(rename = "currency-sign")]
    pub currency_sign: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(Subscription {
    id,
    uuid,
    external_id,
    plan,
    quantity,
    mrr,
    arr,
    status,
    billing_cycle,
    billing_cycle_count,
    start_date,
    end_date,
    currency,
    currency_sign,
} ..extra);

/// Entry in a customer's activity stream
#[derive(Debug, Clone, Deserialize)]
pub struct Activity {
    pub uuid: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub date: Option<Moment>,
    #[serde(rename = "activity-mrr-movement")]
    pub activity_mrr_movement: Option<Number>,
    #[serde(rename = "activity-mrr")]
    pub activity_mrr: Option<Number>,
    #[serde(rename = "activity-arr")]
    pub activity_arr: Option<Number>,
    pub currency: Option<String>,
    #[serde(rename = "subscription-external-id")]
    pub subscription_external_id: Option<String>,
    #[serde(rename = "plan-external-id")]
    pub plan_external_id: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(Activity {
    uuid,
    description,
    r#type,
    date,
    activity_mrr_movement,
    activity_mrr,
    activity_arr,
    currency,
    subscription_external_id,
    plan_external_id,
} ..extra);

#[derive(Debug, Clone, Deserialize)]
pub struct Contact {
    pub uuid: Option<String>,
    pub customer_uuid: Option<String>,
    pub customer_external_id: Option<String>,
    pub data_source_uuid: Option<String>,
    pub position: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linked_in: Option<String>,
    pub twitter: Option<String>,
    pub notes: Option<String>,
    pub custom: Option<Value>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(Contact {
    uuid,
    customer_uuid,
    customer_external_id,
    data_source_uuid,
    position,
    first_name,
    last_name,
    title,
    email,
    phone,
    linked_in,
    twitter,
    notes,
    custom,
} ..extra);

/// Note or call log attached to a customer
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerNote {
    pub uuid: Option<String>,
    pub customer_uuid: Option<String>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub text: Option<String>,
    pub author: Option<String>,
    pub call_duration: Option<Number>,
    pub created_at: Option<Moment>,
    pub updated_at: Option<Moment>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(CustomerNote {
    uuid,
    customer_uuid,
    r#type,
    text,
    author,
    call_duration,
    created_at,
    updated_at,
} ..extra);

#[derive(Debug, Clone, Deserialize)]
pub struct Opportunity {
    pub uuid: Option<String>,
    pub customer_uuid: Option<String>,
    pub owner: Option<String>,
    pub pipeline: Option<String>,
    pub pipeline_stage: Option<String>,
    pub estimated_close_date: Option<Moment>,
    pub currency: Option<String>,
    pub amount_in_cents: Option<Number>,
    #[serde(rename = "type")]
    pub r#type: Option<String>,
    pub forecast_category: Option<String>,
    pub win_likelihood: Option<Number>,
    pub custom: Option<Value>,
    pub created_at: Option<Moment>,
    pub updated_at: Option<Moment>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(Opportunity {
    uuid,
    customer_uuid,
    owner,
    pipeline,
    pipeline_stage,
    estimated_close_date,
    currency,
    amount_in_cents,
    r#type,
    forecast_category,
    win_likelihood,
    custom,
    created_at,
    updated_at,
} ..extra);

#[derive(Debug, Clone, Deserialize)]
pub struct Plan {
    pub uuid: Option<String>,
    pub data_source_uuid: Option<String>,
    pub external_id: Option<String>,
    pub name: Option<String>,
    pub interval_count: Option<i64>,
    pub interval_unit: Option<String>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(Plan {
    uuid,
    data_source_uuid,
    external_id,
    name,
    interval_count,
    interval_unit,
} ..extra);

#[derive(Debug, Clone, Deserialize)]
pub struct PlanGroup {
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub plans_count: Option<i64>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(PlanGroup { uuid, name, plans_count } ..extra);

#[derive(Debug, Clone, Deserialize)]
pub struct Task {
    pub task_uuid: Option<String>,
    pub customer_uuid: Option<String>,
    pub task_details: Option<String>,
    pub assignee: Option<String>,
    pub due_date: Option<Moment>,
    pub completed_at: Option<Moment>,
    pub created_at: Option<Moment>,
    pub updated_at: Option<Moment>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(Task {
    task_uuid,
    customer_uuid,
    task_details,
    assignee,
    due_date,
    completed_at,
    created_at,
    updated_at,
} ..extra);

/// One interval of a metrics report
///
/// Which figures are present depends on the metric requested.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsEntry {
    pub date: Option<Moment>,
    pub customers: Option<Number>,
    pub mrr: Option<Number>,
    pub arr: Option<Number>,
    pub arpa: Option<Number>,
    pub asp: Option<Number>,
    pub ltv: Option<Number>,
    #[serde(rename = "customer-churn-rate")]
    pub customer_churn_rate: Option<Number>,
    #[serde(rename = "mrr-churn-rate")]
    pub mrr_churn_rate: Option<Number>,
    #[serde(rename = "mrr-new-business")]
    pub mrr_new_business: Option<Number>,
    #[serde(rename = "mrr-expansion")]
    pub mrr_expansion: Option<Number>,
    #[serde(rename = "mrr-contraction")]
    pub mrr_contraction: Option<Number>,
    #[serde(rename = "mrr-churn")]
    pub mrr_churn: Option<Number>,
    #[serde(rename = "mrr-reactivation")]
    pub mrr_reactivation: Option<Number>,
    #[serde(flatten)]
    pub extra: JsonObject,
}

impl_fields!(MetricsEntry {
    date,
    customers,
    mrr,
    arr,
    arpa,
    asp,
    ltv,
    customer_churn_rate,
    mrr_churn_rate,
    mrr_new_business,
    mrr_expansion,
    mrr_contraction,
    mrr_churn,
    mrr_reactivation,
} ..extra);

/// Metrics report envelope; only `entries` is surfaced
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsReport {
    #[serde(default)]
    pub entries: Vec<MetricsEntry>,
    pub summary: Option<Value>,
}
