// ── Entity schemas ──
//
// One `EntitySchema` per entity type drives the generic page controller:
// wire types, searchable text, discrete filters, statistics, form
// conversion and the optional pre-flight uniqueness check.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use netequip_api::{ApiClient, Employee, Equipment, EquipmentType, Id, paths};

use crate::config::DisplayOptions;
use crate::form::FormFields;
use crate::validate::ValidationError;

/// Per-entity behavior plugged into [`EntityPage`](crate::EntityPage).
pub trait EntitySchema: Send + Sync + 'static {
    type Record: Clone + fmt::Debug + Serialize + DeserializeOwned + Send + Sync;
    type Form: FormFields;
    type Payload: Serialize + fmt::Debug + Send + Sync;
    type Filter: Clone + Default + PartialEq + fmt::Debug + Send + Sync;
    type Stats: Summary + Serialize + fmt::Debug;

    /// Collection path under the API root.
    const PATH: &'static str;
    /// Human label for one record, e.g. `"Equipment type"`.
    const TITLE: &'static str;
    /// Reference collections loaded alongside the primary one.
    const REFERENCES: &'static [Reference] = &[];

    fn id(record: &Self::Record) -> Id;

    /// Short name used in prompts and notices.
    fn label(record: &Self::Record) -> String;

    /// Text the free-form search box matches against.
    fn search_fields(record: &Self::Record) -> Vec<&str>;

    fn matches(filter: &Self::Filter, record: &Self::Record, now: NaiveDateTime) -> bool;

    fn stats(records: &[Self::Record], now: NaiveDateTime) -> Self::Stats;

    /// Option lists for the discrete filters.
    fn facets(records: &[Self::Record], references: &ReferenceData) -> Vec<Facet>;

    fn new_form(now: NaiveDateTime) -> Self::Form;

    fn form_from_record(record: &Self::Record) -> Self::Form;

    /// Normalize and validate raw form input.
    fn build_payload(form: &Self::Form) -> Result<Self::Payload, ValidationError>;

    /// Uniqueness check to run before creating `payload`.
    fn uniqueness_probe(_payload: &Self::Payload) -> Option<UniqueProbe> {
        None
    }

    fn delete_prompt(record: &Self::Record) -> String {
        format!(
            "Delete {} \"{}\"?",
            Self::TITLE.to_lowercase(),
            Self::label(record)
        )
    }

    fn item_path(id: Id) -> String {
        format!("{}/{id}", Self::PATH)
    }
}

/// Statistics rendered as label/value pairs.
pub trait Summary {
    fn entries(&self, display: &DisplayOptions) -> Vec<(&'static str, String)>;
}

// ── Facets ───────────────────────────────────────────────────────────

/// A selectable value for a filter or a reference field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub value: String,
    pub label: String,
}

impl FacetOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Options for one filter control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Facet {
    pub name: &'static str,
    pub options: Vec<FacetOption>,
}

impl Facet {
    pub fn new(name: &'static str, options: Vec<FacetOption>) -> Self {
        Self { name, options }
    }

    /// Facet whose options are the distinct non-blank `values`, sorted.
    pub fn distinct<'a>(name: &'static str, values: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        let options = distinct_values(values)
            .into_iter()
            .map(|v| FacetOption::new(v.clone(), v))
            .collect();
        Self { name, options }
    }

    /// Facet listing every variant of a status enum.
    pub fn variants<T>(name: &'static str) -> Self
    where
        T: strum::IntoEnumIterator + AsRef<str>,
    {
        let options = T::iter()
            .map(|v| {
                let value: &str = v.as_ref();
                FacetOption::new(value, value)
            })
            .collect();
        Self { name, options }
    }
}

/// Distinct non-blank values in ascending order.
pub fn distinct_values<'a>(values: impl IntoIterator<Item = Option<&'a str>>) -> Vec<String> {
    values
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ── Reference collections ────────────────────────────────────────────

/// A collection some entity page needs for its select boxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    Equipment,
    EquipmentTypes,
    Employees,
}

impl Reference {
    fn describe(self) -> &'static str {
        match self {
            Self::Equipment => "equipment list",
            Self::EquipmentTypes => "equipment types",
            Self::Employees => "employee list",
        }
    }
}

/// Loaded reference collections. Lists that were not requested, or
/// failed to load, are empty.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub equipment: Vec<Equipment>,
    pub equipment_types: Vec<EquipmentType>,
    pub employees: Vec<Employee>,
}

async fn fetch_if<T: DeserializeOwned>(
    client: &ApiClient,
    wanted: bool,
    path: &str,
) -> Result<Vec<T>, netequip_api::Error> {
    if wanted {
        client.get(path).await
    } else {
        Ok(Vec::new())
    }
}

impl ReferenceData {
    /// Fetch the requested collections concurrently.
    ///
    /// Returns the data plus a message for each collection that failed.
    pub async fn fetch(client: &ApiClient, wanted: &[Reference]) -> (Self, Vec<String>) {
        let (equipment, equipment_types, employees) = tokio::join!(
            fetch_if::<Equipment>(client, wanted.contains(&Reference::Equipment), paths::EQUIPMENT),
            fetch_if::<EquipmentType>(
                client,
                wanted.contains(&Reference::EquipmentTypes),
                paths::EQUIPMENT_TYPES,
            ),
            fetch_if::<Employee>(client, wanted.contains(&Reference::Employees), paths::EMPLOYEES),
        );

        let mut failures = Vec::new();
        let data = Self {
            equipment: settle(equipment, Reference::Equipment, &mut failures),
            equipment_types: settle(equipment_types, Reference::EquipmentTypes, &mut failures),
            employees: settle(employees, Reference::Employees, &mut failures),
        };
        (data, failures)
    }

    pub fn equipment_name(&self, id: Id) -> Option<&str> {
        self.equipment
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.name.as_str())
    }

    pub fn employee_name(&self, id: Id) -> Option<&str> {
        self.employees
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.full_name.as_str())
    }

    pub fn type_name(&self, id: Id) -> Option<&str> {
        self.equipment_types
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.type_name.as_str())
    }

    pub fn equipment_options(&self) -> Vec<FacetOption> {
        self.equipment
            .iter()
            .map(|e| FacetOption::new(e.id.to_string(), e.name.clone()))
            .collect()
    }

    pub fn employee_options(&self) -> Vec<FacetOption> {
        self.employees
            .iter()
            .map(|e| FacetOption::new(e.id.to_string(), e.full_name.clone()))
            .collect()
    }

    /// Type options labelled `"<type> (<manufacturer> <model>)"`.
    pub fn type_options(&self) -> Vec<FacetOption> {
        self.equipment_types
            .iter()
            .map(|t| {
                let detail = [t.manufacturer.as_deref(), t.model.as_deref()]
                    .into_iter()
                    .flatten()
                    .collect::<Vec<_>>()
                    .join(" ");
                let label = if detail.is_empty() {
                    t.type_name.clone()
                } else {
                    format!("{} ({detail})", t.type_name)
                };
                FacetOption::new(t.id.to_string(), label)
            })
            .collect()
    }
}

fn settle<T>(
    result: Result<Vec<T>, netequip_api::Error>,
    reference: Reference,
    failures: &mut Vec<String>,
) -> Vec<T> {
    result.unwrap_or_else(|e| {
        warn!(error = %e, "failed to load {}", reference.describe());
        failures.push(format!("Failed to load {}: {e}", reference.describe()));
        Vec::new()
    })
}

// ── Uniqueness checks ────────────────────────────────────────────────

/// A value that must not already exist on the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UniqueProbe {
    TypeName(String),
    Email(String),
    IpAddress(String),
}

impl UniqueProbe {
    pub async fn exists(&self, client: &ApiClient) -> Result<bool, netequip_api::Error> {
        match self {
            Self::TypeName(name) => client.equipment_type_exists(name).await,
            Self::Email(email) => client.employee_email_exists(email).await,
            Self::IpAddress(ip) => client.ip_address_exists(ip).await,
        }
    }

    pub fn duplicate_message(&self) -> String {
        match self {
            Self::TypeName(_) => "An equipment type with this name already exists".into(),
            Self::Email(_) => "An employee with this email already exists".into(),
            Self::IpAddress(ip) => format!("IP address {ip} already exists"),
        }
    }
}
