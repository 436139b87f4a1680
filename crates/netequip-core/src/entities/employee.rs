// Employees: owners of equipment and performers of maintenance.

use chrono::NaiveDateTime;
use serde::Serialize;

use netequip_api::{Employee, EmployeePayload, Id, paths};

use crate::config::DisplayOptions;
use crate::error::CoreError;
use crate::form::{self, form_fields};
use crate::page::EntityPage;
use crate::schema::{EntitySchema, Facet, ReferenceData, Summary, UniqueProbe};
use crate::validate::{self, ValidationError};

pub struct EmployeeSchema;

pub type EmployeePage = EntityPage<EmployeeSchema>;

form_fields! {
    pub struct EmployeeForm {
        full_name => "fullName",
        position => "position",
        email => "email",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub position: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EmployeeStats {
    pub total: usize,
}

impl Summary for EmployeeStats {
    fn entries(&self, _display: &DisplayOptions) -> Vec<(&'static str, String)> {
        vec![("Total", self.total.to_string())]
    }
}

impl EntitySchema for EmployeeSchema {
    type Record = Employee;
    type Form = EmployeeForm;
    type Payload = EmployeePayload;
    type Filter = EmployeeFilter;
    type Stats = EmployeeStats;

    const PATH: &'static str = paths::EMPLOYEES;
    const TITLE: &'static str = "Employee";

    fn id(record: &Employee) -> Id {
        record.id
    }

    fn label(record: &Employee) -> String {
        record.full_name.clone()
    }

    fn search_fields(record: &Employee) -> Vec<&str> {
        [
            Some(record.full_name.as_str()),
            record.position.as_deref(),
            record.email.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn matches(filter: &EmployeeFilter, record: &Employee, _now: NaiveDateTime) -> bool {
        filter
            .position
            .as_ref()
            .is_none_or(|p| record.position.as_deref() == Some(p.as_str()))
    }

    fn stats(records: &[Employee], _now: NaiveDateTime) -> EmployeeStats {
        EmployeeStats {
            total: records.len(),
        }
    }

    fn facets(records: &[Employee], _references: &ReferenceData) -> Vec<Facet> {
        vec![Facet::distinct(
            "position",
            records.iter().map(|e| e.position.as_deref()),
        )]
    }

    fn new_form(_now: NaiveDateTime) -> EmployeeForm {
        EmployeeForm::default()
    }

    fn form_from_record(record: &Employee) -> EmployeeForm {
        EmployeeForm {
            full_name: record.full_name.clone(),
            position: form::raw(record.position.as_deref()),
            email: form::raw(record.email.as_deref()),
        }
    }

    fn build_payload(form: &EmployeeForm) -> Result<EmployeePayload, ValidationError> {
        let full_name = form::required("fullName", &form.full_name)?;
        validate::check_max_len("fullName", Some(&full_name), 100)?;

        let position = form::text(&form.position);
        validate::check_max_len("position", position.as_deref(), 100)?;

        let email = form::text(&form.email);
        validate::check_max_len("email", email.as_deref(), 100)?;
        validate::check_pattern("email", email.as_deref(), validate::is_email, "email address")?;

        Ok(EmployeePayload {
            full_name,
            position,
            email,
        })
    }

    fn uniqueness_probe(payload: &EmployeePayload) -> Option<UniqueProbe> {
        payload.email.clone().map(UniqueProbe::Email)
    }
}

impl EntityPage<EmployeeSchema> {
    /// Server-side search by name fragment.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Employee>, CoreError> {
        Ok(self.client().search_employees(name.trim()).await?)
    }
}
