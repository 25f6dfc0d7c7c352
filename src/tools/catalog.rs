//! Tool catalog
//!
//! Every tool the server exposes, with its parameters and description.
//! Input schemas are derived from the parameter lists.

use crate::chartmogul::{Entity, Metric};
use crate::pagination::DEFAULT_LIMIT;
use serde::Serialize;
use serde_json::{json, Map, Value};
use std::sync::LazyLock;

/// Parameter value kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free text, forwarded as-is
    Text,
    /// ISO-8601 date or date-time
    Date,
    /// Boolean (`true`/`false`, also as strings)
    Flag,
    /// UUID that becomes part of the request path
    Uuid,
    /// Item cap for paginated tools
    Limit,
    /// Attribute object for create/update
    Data,
}

/// One tool parameter
#[derive(Debug, Clone, Copy)]
pub struct Param {
    pub name: &'static str,
    pub kind: ParamKind,
    pub required: bool,
    pub description: &'static str,
}

impl Param {
    const fn required(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: true,
            description,
        }
    }

    const fn optional(name: &'static str, kind: ParamKind, description: &'static str) -> Self {
        Self {
            name,
            kind,
            required: false,
            description,
        }
    }

    fn schema(&self) -> Value {
        match self.kind {
            ParamKind::Text | ParamKind::Uuid => {
                json!({ "type": "string", "description": self.description })
            }
            ParamKind::Date => json!({
                "type": "string",
                "description": self.description,
                "format": "date",
            }),
            ParamKind::Flag => json!({
                "type": ["boolean", "string"],
                "description": self.description,
            }),
            ParamKind::Limit => json!({
                "type": ["integer", "string"],
                "description": self.description,
                "default": DEFAULT_LIMIT,
            }),
            ParamKind::Data => json!({
                "type": "object",
                "description": self.description,
                "additionalProperties": true,
            }),
        }
    }
}

/// Paginated collections reachable from tools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    Customers,
    CustomerSearch,
    CustomerSubscriptions,
    CustomerActivities,
    Contacts,
    CustomerNotes,
    Opportunities,
    Plans,
    PlanGroups,
    PlanGroupPlans,
    Tasks,
}

/// What a tool does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Account,
    ListSources,
    List(Listing),
    Retrieve(Entity),
    Create(Entity),
    Update(Entity),
    Metrics(Metric),
}

/// Static description of a tool
#[derive(Debug, Clone, Copy)]
pub struct ToolSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub operation: Operation,
    pub params: &'static [Param],
}

impl ToolSpec {
    /// JSON Schema for the tool's arguments
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for param in self.params {
            properties.insert(param.name.to_string(), param.schema());
            if param.required {
                required.push(Value::String(param.name.to_string()));
            }
        }
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Listing definition sent in `tools/list`
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name,
            description: self.description,
            input_schema: self.input_schema(),
        }
    }
}

/// Tool as advertised to MCP clients
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

// ============================================================================
// Parameters
// ============================================================================

use ParamKind::{Data, Date, Flag, Limit, Text, Uuid};

const LIMIT: Param = Param::optional(
    "limit",
    Limit,
    "Maximum number of items to return (default 20)",
);

const RECORD_UUID: Param = Param::required("uuid", Uuid, "UUID of the record");

const DATA: Param = Param::required("data", Data, "Attributes as a data dictionary");

const UUID_ONLY: &[Param] = &[RECORD_UUID];
const UPDATE_PARAMS: &[Param] = &[RECORD_UUID, DATA];
const CREATE_PARAMS: &[Param] = &[DATA];

const METRICS_PARAMS: &[Param] = &[
    Param::required("start_date", Date, "Start of the period (YYYY-MM-DD)"),
    Param::required("end_date", Date, "End of the period (YYYY-MM-DD)"),
    Param::required("interval", Text, "One of day, week, month or quarter"),
    Param::optional(
        "geo",
        Text,
        "Comma-separated ISO 3166-1 Alpha-2 country codes",
    ),
    Param::optional(
        "plans",
        Text,
        "Comma-separated plan names, UUIDs or external IDs",
    ),
];

// ============================================================================
// Descriptions
// ============================================================================

macro_rules! limited {
    ($what:literal, $intro:literal) => {
        concat!(
            $intro,
            " We have a default limit of 20 ",
            $what,
            ", ask but discourage the user if they want more than 20 as this will exhaust AI tokens."
        )
    };
    ($what:literal, $intro:literal, $filters:literal) => {
        concat!(limited!($what, $intro), " ", $filters)
    };
}

macro_rules! metrics {
    ($intro:literal) => {
        concat!(
            $intro,
            " Provide the start-date, end-date and interval (possible values are day, week, month, \
or quarter). Additional filter values include geo (A comma-separated list of ISO 3166-1 Alpha-2 formatted country \
codes) and plans (A comma-separated list of plan names (as configured in your ChartMogul account), UUIDs and \
external IDs to filter the results. Spaces in plan names must be URL-encoded, \
e.g., Silver%20plan,Gold%20plan,Enterprise%20plan)."
        )
    };
    ($intro:literal, cents) => {
        concat!(
            metrics!($intro),
            " All amounts are given in the selected currency of your account and are an integer \
number of cents. Divide by 100 to obtain the actual value."
        )
    };
}

// ============================================================================
// Catalog
// ============================================================================

/// All tools, in advertised order
pub static TOOLS: &[ToolSpec] = &[
    // Account
    ToolSpec {
        name: "retrieve_account",
        description: "Retrieve some useful information about your ChartMogul account.",
        operation: Operation::Account,
        params: &[],
    },
    // Data sources
    ToolSpec {
        name: "list_sources",
        description: "Get a list of all data sources in your ChartMogul account. \
You can also filter using the data source name or system \
(the type of system of the data sources, e.g., Stripe, Recurly, Custom, etc.).",
        operation: Operation::ListSources,
        params: &[
            Param::optional("name", Text, "Data source name"),
            Param::optional("system", Text, "Billing system, e.g. Stripe, Recurly, Custom"),
        ],
    },
    ToolSpec {
        name: "retrieve_source",
        description: "Retrieve a data source from your ChartMogul account using its UUID.",
        operation: Operation::Retrieve(Entity::DataSource),
        params: UUID_ONLY,
    },
    // Customers
    ToolSpec {
        name: "list_customers",
        description: limited!(
            "customers",
            "Get a list of customers in your ChartMogul account.",
            "You can also filter based on data_source_uuid, external_id, \
status (one of New_Lead, Working_Lead, Qualified_Lead, Unqualified_Lead, Active, Past_Due or Cancelled) \
and system (the type of system of the data sources, e.g. Stripe, Recurly, Custom, etc.)."
        ),
        operation: Operation::List(Listing::Customers),
        params: &[
            Param::optional("data_source_uuid", Text, "Data source UUID"),
            Param::optional("external_id", Text, "Customer external ID"),
            Param::optional("status", Text, "Customer status"),
            Param::optional("system", Text, "Billing system"),
            LIMIT,
        ],
    },
    ToolSpec {
        name: "search_customers",
        description: limited!(
            "customers",
            "Search a list of all customers with the specified email address in your ChartMogul account."
        ),
        operation: Operation::List(Listing::CustomerSearch),
        params: &[
            Param::required("email", Text, "Email address to search for"),
            LIMIT,
        ],
    },
    ToolSpec {
        name: "retrieve_customer",
        description: "Retrieve a customer from your ChartMogul account using its UUID.",
        operation: Operation::Retrieve(Entity::Customer),
        params: UUID_ONLY,
    },
    ToolSpec {
        name: "update_customer",
        description: "Update certain modifiable attributes of a customer in your ChartMogul account. \
Attributes that can be modified are: company, lead_created_at, free_trial_started_at, zip, city, state, \
country, attributes (nested object which includes tags and custom object), owner, primary_contact, status \
and website_url, and should be included in a data dictionary.",
        operation: Operation::Update(Entity::Customer),
        params: UPDATE_PARAMS,
    },
    ToolSpec {
        name: "list_customer_subscriptions",
        description: limited!(
            "subscriptions",
            "Get a list of all subscriptions with the specified customer uuid in your ChartMogul account."
        ),
        operation: Operation::List(Listing::CustomerSubscriptions),
        params: &[Param::required("uuid", Uuid, "Customer UUID"), LIMIT],
    },
    ToolSpec {
        name: "list_customer_activities",
        description: limited!(
            "activities",
            "Get a list of all activities with the specified customer uuid in your ChartMogul account."
        ),
        operation: Operation::List(Listing::CustomerActivities),
        params: &[Param::required("uuid", Uuid, "Customer UUID"), LIMIT],
    },
    // Contacts
    ToolSpec {
        name: "list_contacts",
        description: limited!(
            "contacts",
            "Get a list of all contacts in your ChartMogul account.",
            "You can filter using the contact email address and the customer_external_id."
        ),
        operation: Operation::List(Listing::Contacts),
        params: &[
            Param::optional("email", Text, "Contact email address"),
            Param::optional("customer_external_id", Text, "External ID of the customer"),
            LIMIT,
        ],
    },
    ToolSpec {
        name: "retrieve_contact",
        description: "Retrieve a contact from your ChartMogul account using its UUID.",
        operation: Operation::Retrieve(Entity::Contact),
        params: UUID_ONLY,
    },
    ToolSpec {
        name: "update_contact",
        description: "Update certain modifiable attributes of a contact in your ChartMogul account. \
Attributes that can be modified are: first_name, last_name, position, title, email, phone, linked_in, \
twitter, notes, custom (an array containing the custom attributes; each custom attribute must be defined \
as an object with a key and value), and should be included in a data dictionary.",
        operation: Operation::Update(Entity::Contact),
        params: UPDATE_PARAMS,
    },
    ToolSpec {
        name: "create_contact",
        description: "Create a contact in your ChartMogul account. \
IMPORTANT: Always ask for ALL missing required details before creating a contact. \
Required fields are: customer_uuid, data_source_uuid. \
Optional fields are: first_name, last_name, position, title, email, phone, linked_in, twitter, notes, \
custom (an array containing the custom attributes; each custom attribute must be defined as an object \
with a key and value). All fields should be included in a data dictionary.",
        operation: Operation::Create(Entity::Contact),
        params: CREATE_PARAMS,
    },
    // Customer notes
    ToolSpec {
        name: "list_customer_notes",
        description: limited!(
            "customer notes",
            "Get a list of all customer notes in your ChartMogul account.",
            "You can filter using the customer_uuid and the type (note or call)."
        ),
        operation: Operation::List(Listing::CustomerNotes),
        params: &[
            Param::optional("customer_uuid", Text, "Customer UUID"),
            Param::optional("type", Text, "note or call"),
            LIMIT,
        ],
    },
    ToolSpec {
        name: "retrieve_customer_note",
        description: "Retrieve a customer note from your ChartMogul account using its UUID.",
        operation: Operation::Retrieve(Entity::CustomerNote),
        params: UUID_ONLY,
    },
    ToolSpec {
        name: "update_customer_note",
        description: "Update certain modifiable attributes of a customer note in your ChartMogul account. \
Attributes that can be modified are: author_email, text, call_duration (integer; relevant for type call; \
duration of the call in seconds), created_at (an ISO 8601-formatted time in the past), updated_at \
(an ISO 8601-formatted time in the past), and should be included in a data dictionary.",
        operation: Operation::Update(Entity::CustomerNote),
        params: UPDATE_PARAMS,
    },
    ToolSpec {
        name: "create_customer_note",
        description: "Create a customer note in your ChartMogul account. \
IMPORTANT: Always ask for ALL missing required details before creating a customer note. \
Required fields are: customer_uuid, type (call or note). Optional fields are: author_email, text, \
call_duration (integer; relevant for type call; duration of the call in seconds), created_at \
(an ISO 8601-formatted time in the past). All fields should be included in a data dictionary.",
        operation: Operation::Create(Entity::CustomerNote),
        params: CREATE_PARAMS,
    },
    // Opportunities
    ToolSpec {
        name: "list_opportunities",
        description: limited!(
            "opportunities",
            "Get a list of all opportunities in your ChartMogul account.",
            "You can filter using the customer_uuid, owner (email address of the ChartMogul user with a CRM \
seat who is the primary salesperson responsible for this opportunity), pipeline, pipeline_stage, \
estimated_close_date_on_or_after (lower limit of the estimated close date range; an ISO 8601-formatted date) \
and estimated_close_date_on_or_before (upper limit of the estimated close date range; an ISO 8601-formatted date)."
        ),
        operation: Operation::List(Listing::Opportunities),
        params: &[
            Param::optional("customer_uuid", Text, "Customer UUID"),
            Param::optional("owner", Text, "Email of the responsible salesperson"),
            Param::optional("pipeline", Text, "Pipeline name"),
            Param::optional("pipeline_stage", Text, "Pipeline stage"),
            Param::optional(
                "estimated_close_date_on_or_after",
                Date,
                "Lower limit of the estimated close date range",
            ),
            Param::optional(
                "estimated_close_date_on_or_before",
                Date,
                "Upper limit of the estimated close date range",
            ),
            LIMIT,
        ],
    },
    ToolSpec {
        name: "retrieve_opportunity",
        description: "Retrieve an opportunity from your ChartMogul account using its UUID.",
        operation: Operation::Retrieve(Entity::Opportunity),
        params: UUID_ONLY,
    },
    ToolSpec {
        name: "update_opportunity",
        description: "Update certain modifiable attributes of an opportunity in your ChartMogul account. \
Attributes that can be modified are: owner, pipeline, pipeline_stage, estimated_close_date, amount_in_cents, \
currency (The 3-letter currency code for the expected close value, e.g. USD, EUR or GBP), type (recurring or \
one-time), forecast_category (pipeline, best_case, committed, lost or won), win_likelihood (0-100), custom \
(list of custom attributes as key and value pairs) and should be included in a data dictionary.",
        operation: Operation::Update(Entity::Opportunity),
        params: UPDATE_PARAMS,
    },
    ToolSpec {
        name: "create_opportunity",
        description: "Create an opportunity in your ChartMogul account. \
IMPORTANT: Always ask for ALL missing required details before creating an opportunity. \
Required fields are: customer_uuid, owner (email address of the ChartMogul user with a CRM seat who is the \
primary salesperson responsible for this opportunity), pipeline, pipeline_stage, estimated_close_date \
(an ISO 8601-formatted date), amount_in_cents, currency (The 3-letter currency code for the expected close \
value, e.g. USD, EUR or GBP). Optional fields: type (recurring or one-time), forecast_category (pipeline, \
best_case, committed, lost or won), win_likelihood (integer; 0-100), custom (list of custom attributes as key \
and value pairs). All fields should be included in a data dictionary.",
        operation: Operation::Create(Entity::Opportunity),
        params: CREATE_PARAMS,
    },
    // Plans
    ToolSpec {
        name: "list_plans",
        description: limited!(
            "plans",
            "Get a list of all plans in your ChartMogul account.",
            "You can filter using the data_source_uuid, external_id, and system (the billing system that \
the plan belongs to, e.g., Stripe, Recurly, Custom)."
        ),
        operation: Operation::List(Listing::Plans),
        params: &[
            Param::optional("data_source_uuid", Text, "Data source UUID"),
            Param::optional("external_id", Text, "Plan external ID"),
            Param::optional("system", Text, "Billing system"),
            LIMIT,
        ],
    },
    ToolSpec {
        name: "retrieve_plan",
        description: "Retrieve a plan from your ChartMogul account using its UUID.",
        operation: Operation::Retrieve(Entity::Plan),
        params: UUID_ONLY,
    },
    ToolSpec {
        name: "update_plan",
        description: "Update certain modifiable attributes of a plan in your ChartMogul account. \
Attributes that can be modified are: name, interval_count (frequency of billing interval; accepts integers \
greater than 0, e.g., 6 for a half-yearly plan), interval_unit (day, month or year) and should be included \
in a data dictionary.",
        operation: Operation::Update(Entity::Plan),
        params: UPDATE_PARAMS,
    },
    ToolSpec {
        name: "create_plan",
        description: "Create a plan in your ChartMogul account. \
IMPORTANT: Always ask for ALL missing required details before creating a plan. \
Required fields are: data_source_uuid, name, interval_count (frequency of billing interval; accepts \
integers greater than 0, e.g., 6 for a half-yearly plan), interval_unit (day, month or year). \
Optional field: external_id. All fields should be included in a data dictionary.",
        operation: Operation::Create(Entity::Plan),
        params: CREATE_PARAMS,
    },
    // Plan groups
    ToolSpec {
        name: "list_plan_groups",
        description: limited!(
            "plan groups",
            "Get a list of all plan groups in your ChartMogul account."
        ),
        operation: Operation::List(Listing::PlanGroups),
        params: &[LIMIT],
    },
    ToolSpec {
        name: "list_plan_group_plans",
        description: "Get a list of all plans in a plan group using its UUID.",
        operation: Operation::List(Listing::PlanGroupPlans),
        params: &[Param::required("uuid", Uuid, "Plan group UUID"), LIMIT],
    },
    ToolSpec {
        name: "retrieve_plan_group",
        description: "Retrieve a plan group from your ChartMogul account using its UUID.",
        operation: Operation::Retrieve(Entity::PlanGroup),
        params: UUID_ONLY,
    },
    ToolSpec {
        name: "update_plan_group",
        description: "Update certain modifiable attributes of a plan group in your ChartMogul account. \
Attributes that can be modified are: name, plans (array of the uuids of the plans to be added to the plan \
group) and should be included in a data dictionary.",
        operation: Operation::Update(Entity::PlanGroup),
        params: UPDATE_PARAMS,
    },
    ToolSpec {
        name: "create_plan_group",
        description: "Create a plan group in your ChartMogul account. \
IMPORTANT: Always ask for ALL missing required details before creating a plan group. \
Required fields are: name, plans (array of the uuids of the plans to be added to the plan group) \
and should be included in a data dictionary.",
        operation: Operation::Create(Entity::PlanGroup),
        params: CREATE_PARAMS,
    },
    // Tasks
    ToolSpec {
        name: "list_tasks",
        description: limited!(
            "tasks",
            "Get a list of all tasks in your ChartMogul account.",
            "You can filter using the customer_uuid, assignee (email address of the ChartMogul user with a \
CRM seat assigned to the task), due_date_on_or_after (lower limit of the due date range; an ISO 8601-formatted \
date), estimated_close_date_on_or_before (upper limit of the due date range; an ISO 8601-formatted date), \
completed (true or false)."
        ),
        operation: Operation::List(Listing::Tasks),
        params: &[
            Param::optional("customer_uuid", Text, "Customer UUID"),
            Param::optional("assignee", Text, "Email of the assigned user"),
            Param::optional(
                "due_date_on_or_after",
                Date,
                "Lower limit of the due date range",
            ),
            Param::optional(
                "estimated_close_date_on_or_before",
                Date,
                "Upper limit of the due date range",
            ),
            Param::optional("completed", Flag, "Only completed (true) or open (false) tasks"),
            LIMIT,
        ],
    },
    ToolSpec {
        name: "retrieve_task",
        description: "Retrieve a task from your ChartMogul account using its UUID.",
        operation: Operation::Retrieve(Entity::Task),
        params: UUID_ONLY,
    },
    ToolSpec {
        name: "update_task",
        description: "Update certain modifiable attributes of a task in your ChartMogul account. \
Attributes that can be modified are: task_details (up to 255 characters), assignee (email address of the \
ChartMogul user with a CRM seat assigned to the task), due_date (an ISO 8601-formatted date), completed_at \
(an ISO 8601-formatted date) and should be included in a data dictionary.",
        operation: Operation::Update(Entity::Task),
        params: UPDATE_PARAMS,
    },
    ToolSpec {
        name: "create_task",
        description: "Create a task in your ChartMogul account. \
IMPORTANT: Always ask for ALL missing required details before creating a task. \
Required fields are: customer_uuid, task_details (up to 255 characters), assignee (email address of the \
ChartMogul user with a CRM seat assigned to the task), due_date (an ISO 8601-formatted date). \
Optional field: completed_at (an ISO 8601-formatted date). All fields should be included in a data dictionary.",
        operation: Operation::Create(Entity::Task),
        params: CREATE_PARAMS,
    },
    // Metrics
    ToolSpec {
        name: "all_metrics",
        description: metrics!(
            "Retrieve all key metrics, for the specified time period, interval and filters. \
Metrics include: MRR, ARR, ARPA, ASP, customer count, customer churn rate, MRR churn rate and LTV.",
            cents
        ),
        operation: Operation::Metrics(Metric::All),
        params: METRICS_PARAMS,
    },
    ToolSpec {
        name: "mrr_metrics",
        description: metrics!(
            "Retrieve Monthly Recurring Revenue (MRR) metrics, for the specified time period, interval and filters.",
            cents
        ),
        operation: Operation::Metrics(Metric::Mrr),
        params: METRICS_PARAMS,
    },
    ToolSpec {
        name: "arr_metrics",
        description: metrics!(
            "Retrieve Annualized Run Rate (ARR) metrics, for the specified time period, interval and filters.",
            cents
        ),
        operation: Operation::Metrics(Metric::Arr),
        params: METRICS_PARAMS,
    },
    ToolSpec {
        name: "arpa_metrics",
        description: metrics!(
            "Retrieve Average Revenue Per Account (ARPA) metrics, for the specified time period, interval and filters.",
            cents
        ),
        operation: Operation::Metrics(Metric::Arpa),
        params: METRICS_PARAMS,
    },
    ToolSpec {
        name: "asp_metrics",
        description: metrics!(
            "Retrieve Average Sale Price (ASP) metrics, for the specified time period, interval and filters.",
            cents
        ),
        operation: Operation::Metrics(Metric::Asp),
        params: METRICS_PARAMS,
    },
    ToolSpec {
        name: "customer_count_metrics",
        description: metrics!(
            "Retrieve customer count metrics, for the specified time period, interval and filters."
        ),
        operation: Operation::Metrics(Metric::CustomerCount),
        params: METRICS_PARAMS,
    },
    ToolSpec {
        name: "customer_churn_rate_metrics",
        description: metrics!(
            "Retrieve customer churn rate metrics, for the specified time period, interval and filters."
        ),
        operation: Operation::Metrics(Metric::CustomerChurnRate),
        params: METRICS_PARAMS,
    },
    ToolSpec {
        name: "mrr_churn_rate_metrics",
        description: metrics!(
            "Retrieve Net MRR Churn Rate metrics, for the specified time period, interval and filters."
        ),
        operation: Operation::Metrics(Metric::MrrChurnRate),
        params: METRICS_PARAMS,
    },
    ToolSpec {
        name: "ltv_metrics",
        description: metrics!(
            "Retrieve Customer Lifetime Value (LTV) metrics, for the specified time period, and filters.",
            cents
        ),
        operation: Operation::Metrics(Metric::Ltv),
        params: METRICS_PARAMS,
    },
];

static DEFINITIONS: LazyLock<Vec<ToolDefinition>> =
    LazyLock::new(|| TOOLS.iter().map(ToolSpec::definition).collect());

/// Look up a tool by name
pub fn find(name: &str) -> Option<&'static ToolSpec> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// Definitions for `tools/list`
pub fn definitions() -> &'static [ToolDefinition] {
    &DEFINITIONS
}
