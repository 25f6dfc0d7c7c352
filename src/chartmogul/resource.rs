//! ChartMogul endpoints
//!
//! Paginated collections, single-record entities and metrics reports, each
//! as a closed set of kinds mapping to API paths.

use std::fmt;

/// Paginated collection kinds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    Customers,
    CustomerSearch,
    CustomerSubscriptions { customer_uuid: String },
    CustomerActivities { customer_uuid: String },
    Contacts,
    CustomerNotes,
    Opportunities,
    Plans,
    PlanGroups,
    PlanGroupPlans { plan_group_uuid: String },
    Tasks,
}

impl Resource {
    /// Path relative to the API base URL
    pub fn path(&self) -> String {
        match self {
            Self::Customers => "customers".to_string(),
            Self::CustomerSearch => "customers/search".to_string(),
            Self::CustomerSubscriptions { customer_uuid } => {
                format!("customers/{customer_uuid}/subscriptions")
            }
            Self::CustomerActivities { customer_uuid } => {
                format!("customers/{customer_uuid}/activities")
            }
            Self::Contacts => "contacts".to_string(),
            Self::CustomerNotes => "customer_notes".to_string(),
            Self::Opportunities => "opportunities".to_string(),
            Self::Plans => "plans".to_string(),
            Self::PlanGroups => "plan_groups".to_string(),
            Self::PlanGroupPlans { plan_group_uuid } => {
                format!("plan_groups/{plan_group_uuid}/plans")
            }
            Self::Tasks => "tasks".to_string(),
        }
    }

    /// Short name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::CustomerSearch => "customer search",
            Self::CustomerSubscriptions { .. } => "customer subscriptions",
            Self::CustomerActivities { .. } => "customer activities",
            Self::Contacts => "contacts",
            Self::CustomerNotes => "customer notes",
            Self::Opportunities => "opportunities",
            Self::Plans => "plans",
            Self::PlanGroups => "plan groups",
            Self::PlanGroupPlans { .. } => "plan group plans",
            Self::Tasks => "tasks",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Record kinds that can be retrieved, created or updated by UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    DataSource,
    Customer,
    Contact,
    CustomerNote,
    Opportunity,
    Plan,
    PlanGroup,
    Task,
}

impl Entity {
    /// Collection path (create target)
    pub fn collection_path(self) -> &'static str {
        match self {
            Self::DataSource => "data_sources",
            Self::Customer => "customers",
            Self::Contact => "contacts",
            Self::CustomerNote => "customer_notes",
            Self::Opportunity => "opportunities",
            Self::Plan => "plans",
            Self::PlanGroup => "plan_groups",
            Self::Task => "tasks",
        }
    }

    /// Path of a single record
    pub fn item_path(self, uuid: &str) -> String {
        format!("{}/{uuid}", self.collection_path())
    }

    /// Short name for logs
    pub fn name(self) -> &'static str {
        match self {
            Self::DataSource => "data source",
            Self::Customer => "customer",
            Self::Contact => "contact",
            Self::CustomerNote => "customer note",
            Self::Opportunity => "opportunity",
            Self::Plan => "plan",
            Self::PlanGroup => "plan group",
            Self::Task => "task",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Metrics API reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    All,
    Mrr,
    Arr,
    Arpa,
    Asp,
    CustomerCount,
    CustomerChurnRate,
    MrrChurnRate,
    Ltv,
}

impl Metric {
    /// Every report, in catalog order
    pub const ALL: [Metric; 9] = [
        Self::All,
        Self::Mrr,
        Self::Arr,
        Self::Arpa,
        Self::Asp,
        Self::CustomerCount,
        Self::CustomerChurnRate,
        Self::MrrChurnRate,
        Self::Ltv,
    ];

    /// Path relative to the API base URL
    pub fn path(self) -> &'static str {
        match self {
            Self::All => "metrics/all",
            Self::Mrr => "metrics/mrr",
            Self::Arr => "metrics/arr",
            Self::Arpa => "metrics/arpa",
            Self::Asp => "metrics/asp",
            Self::CustomerCount => "metrics/customer-count",
            Self::CustomerChurnRate => "metrics/customer-churn-rate",
            Self::MrrChurnRate => "metrics/mrr-churn-rate",
            Self::Ltv => "metrics/ltv",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Mrr => "MRR",
            Self::Arr => "ARR",
            Self::Arpa => "ARPA",
            Self::Asp => "ASP",
            Self::CustomerCount => "Customer count",
            Self::CustomerChurnRate => "Customer churn rate",
            Self::MrrChurnRate => "MRR churn rate",
            Self::Ltv => "LTV",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
