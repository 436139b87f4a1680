// Maintenance history: dated work records with an optional cost and a
// planned next date.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use netequip_api::{Id, Lenient, MaintenancePayload, MaintenanceRecord, MaintenanceType, paths};

use crate::config::DisplayOptions;
use crate::error::CoreError;
use crate::form::{self, form_fields};
use crate::page::EntityPage;
use crate::present;
use crate::schema::{EntitySchema, Facet, FacetOption, Reference, ReferenceData, Summary};
use crate::validate::{self, ValidationError};

pub struct MaintenanceSchema;

pub type MaintenancePage = EntityPage<MaintenanceSchema>;

form_fields! {
    pub struct MaintenanceForm {
        equipment_id => "equipmentId",
        date => "date",
        kind => "type",
        description => "description",
        performed_by_id => "performedById",
        cost => "cost",
        next_maintenance_date => "nextMaintenanceDate",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaintenanceFilter {
    pub equipment_id: Option<Id>,
    pub kind: Option<MaintenanceType>,
    pub performed_by_id: Option<Id>,
    /// Only records dated within the last N days, up to now.
    pub within_days: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MaintenanceStats {
    pub total: usize,
    pub overdue: usize,
    pub total_cost: Decimal,
}

impl Summary for MaintenanceStats {
    fn entries(&self, display: &DisplayOptions) -> Vec<(&'static str, String)> {
        vec![
            ("Total", self.total.to_string()),
            ("Overdue", self.overdue.to_string()),
            (
                "Total cost",
                present::format_currency(self.total_cost, &display.currency, display.locale),
            ),
        ]
    }
}

fn kind(record: &MaintenanceRecord) -> Option<MaintenanceType> {
    record.kind.as_ref().and_then(Lenient::known)
}

fn within_days(record: &MaintenanceRecord, days: u32, now: NaiveDateTime) -> bool {
    // A range reaching past the calendar has no lower bound.
    let start = now.checked_sub_signed(Duration::days(i64::from(days)));
    record
        .date
        .is_some_and(|d| d <= now && start.is_none_or(|start| d >= start))
}

/// The number of days offered by the date-range filter.
pub const DATE_RANGES: &[u32] = &[7, 30, 90, 365];

impl EntitySchema for MaintenanceSchema {
    type Record = MaintenanceRecord;
    type Form = MaintenanceForm;
    type Payload = MaintenancePayload;
    type Filter = MaintenanceFilter;
    type Stats = MaintenanceStats;

    const PATH: &'static str = paths::MAINTENANCE;
    const TITLE: &'static str = "Maintenance record";
    const REFERENCES: &'static [Reference] = &[Reference::Equipment, Reference::Employees];

    fn id(record: &MaintenanceRecord) -> Id {
        record.id
    }

    fn label(record: &MaintenanceRecord) -> String {
        let equipment = record.equipment_name.as_deref().unwrap_or("?");
        match record.date {
            Some(date) => format!("{equipment} ({})", date.format("%Y-%m-%d %H:%M")),
            None => equipment.to_owned(),
        }
    }

    fn search_fields(record: &MaintenanceRecord) -> Vec<&str> {
        [
            record.equipment_name.as_deref(),
            record.description.as_deref(),
            record.performed_by_name.as_deref(),
            record.kind.as_ref().map(Lenient::as_str),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn matches(filter: &MaintenanceFilter, record: &MaintenanceRecord, now: NaiveDateTime) -> bool {
        filter
            .equipment_id
            .is_none_or(|id| record.equipment_id == Some(id))
            && filter.kind.is_none_or(|k| kind(record) == Some(k))
            && filter
                .performed_by_id
                .is_none_or(|id| record.performed_by_id == Some(id))
            && filter
                .within_days
                .is_none_or(|days| within_days(record, days, now))
    }

    fn stats(records: &[MaintenanceRecord], now: NaiveDateTime) -> MaintenanceStats {
        MaintenanceStats {
            total: records.len(),
            overdue: records
                .iter()
                .filter(|r| present::is_overdue(r.next_maintenance_date, now))
                .count(),
            total_cost: records.iter().filter_map(|r| r.cost).sum(),
        }
    }

    fn facets(_records: &[MaintenanceRecord], references: &ReferenceData) -> Vec<Facet> {
        vec![
            Facet::new("equipmentId", references.equipment_options()),
            Facet::variants::<MaintenanceType>("type"),
            Facet::new("performedById", references.employee_options()),
            Facet::new(
                "withinDays",
                DATE_RANGES
                    .iter()
                    .map(|d| FacetOption::new(d.to_string(), format!("Last {d} days")))
                    .collect(),
            ),
        ]
    }

    fn new_form(now: NaiveDateTime) -> MaintenanceForm {
        MaintenanceForm {
            date: form::raw_datetime(now),
            ..MaintenanceForm::default()
        }
    }

    fn form_from_record(record: &MaintenanceRecord) -> MaintenanceForm {
        MaintenanceForm {
            equipment_id: form::raw(record.equipment_id),
            date: record.date.map(form::raw_datetime).unwrap_or_default(),
            kind: form::raw(record.kind.as_ref()),
            description: form::raw(record.description.as_deref()),
            performed_by_id: form::raw(record.performed_by_id),
            cost: form::raw(record.cost),
            next_maintenance_date: record
                .next_maintenance_date
                .map(form::raw_date)
                .unwrap_or_default(),
        }
    }

    fn build_payload(form: &MaintenanceForm) -> Result<MaintenancePayload, ValidationError> {
        let equipment_id = form::require(
            "equipmentId",
            form::parse_id("equipmentId", &form.equipment_id)?,
        )?;
        let date = form::require("date", form::parse_datetime("date", &form.date)?)?;
        let kind = form::require("type", form::parse_enum("type", &form.kind)?)?;

        let description = form::text(&form.description);
        validate::check_max_len("description", description.as_deref(), 1000)?;

        let cost = form::parse_decimal("cost", &form.cost)?;
        validate::check_cost("cost", cost)?;

        Ok(MaintenancePayload {
            equipment_id,
            date,
            kind,
            description,
            performed_by_id: form::parse_id("performedById", &form.performed_by_id)?,
            cost,
            next_maintenance_date: form::parse_date(
                "nextMaintenanceDate",
                &form.next_maintenance_date,
            )?,
        })
    }

    fn delete_prompt(record: &MaintenanceRecord) -> String {
        let when = record
            .date
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        format!(
            "Delete the maintenance record for \"{}\" from {when}?",
            record.equipment_name.as_deref().unwrap_or("?")
        )
    }
}

impl EntityPage<MaintenanceSchema> {
    /// Plan the next maintenance for a piece of equipment.
    ///
    /// The server stores the date on that equipment's latest record, so
    /// equipment without loaded records is rejected before any request.
    pub async fn schedule_next(
        &mut self,
        equipment_id: Id,
        date: NaiveDate,
    ) -> Result<(), CoreError> {
        if !self
            .records()
            .iter()
            .any(|r| r.equipment_id == Some(equipment_id))
        {
            return Err(ValidationError::new(
                "equipmentId",
                format!("equipment {equipment_id} has no maintenance records"),
            )
            .into());
        }
        let result = self
            .client()
            .schedule_next_maintenance(equipment_id, date)
            .await;
        self.finish_action(result, &format!("Next maintenance scheduled for {date}"))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::form::FormFields;
    use crate::present::DisplayLocale;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn records() -> Vec<MaintenanceRecord> {
        serde_json::from_value(json!([
            { "id": 1, "equipmentId": 1, "equipmentName": "core-sw", "type": "Routine",
              "date": "2024-06-05T10:00:00", "cost": 1500.5, "nextMaintenanceDate": "2024-06-01" },
            { "id": 2, "equipmentId": 2, "equipmentName": "edge-rtr", "type": "Repair",
              "date": "2024-01-15T09:30:00", "cost": 250, "nextMaintenanceDate": "2024-12-01" },
            { "id": 3, "equipmentId": 2, "equipmentName": "edge-rtr", "type": "Inspection",
              "date": "2024-06-09T08:00:00" },
        ]))
        .unwrap()
    }

    #[test]
    fn stats_sum_costs_and_count_overdue() {
        let stats = MaintenanceSchema::stats(&records(), now());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.overdue, 1);
        assert_eq!(stats.total_cost, Decimal::new(17_505, 1));

        let display = DisplayOptions {
            locale: DisplayLocale::EnUs,
            currency: "USD".into(),
        };
        assert_eq!(
            stats.entries(&display)[2],
            ("Total cost", "$1,750.50".to_owned())
        );
    }

    #[test]
    fn date_range_filter() {
        let records = records();
        let last_week = MaintenanceFilter {
            within_days: Some(7),
            ..MaintenanceFilter::default()
        };
        let hits: Vec<_> = records
            .iter()
            .filter(|r| MaintenanceSchema::matches(&last_week, r, now()))
            .map(|r| r.id)
            .collect();
        assert_eq!(hits, vec![1, 3]);
    }

    #[test]
    fn huge_date_range_has_no_lower_bound() {
        let records = records();
        let forever = MaintenanceFilter {
            within_days: Some(u32::MAX),
            ..MaintenanceFilter::default()
        };
        let hits = records
            .iter()
            .filter(|r| MaintenanceSchema::matches(&forever, r, now()))
            .count();
        assert_eq!(hits, 3);
    }

    #[test]
    fn unknown_type_is_searchable() {
        let records = records();
        assert!(MaintenanceSchema::search_fields(&records[2]).contains(&"Inspection"));
    }

    #[test]
    fn payload_requires_type_and_checks_cost() {
        let mut form = MaintenanceSchema::new_form(now());
        assert_eq!(form.date, "2024-06-10T12:00");
        form.set("equipmentId", "2").unwrap();
        assert_eq!(MaintenanceSchema::build_payload(&form).unwrap_err().field, "type");

        form.set("type", "Upgrade").unwrap();
        form.set("cost", "-5").unwrap();
        assert_eq!(MaintenanceSchema::build_payload(&form).unwrap_err().field, "cost");

        form.set("cost", "1999.99").unwrap();
        form.set("nextMaintenanceDate", "2024-12-31").unwrap();
        let payload = MaintenanceSchema::build_payload(&form).unwrap();
        assert_eq!(payload.kind, MaintenanceType::Upgrade);
        assert_eq!(payload.cost, Some(Decimal::new(199_999, 2)));
        assert_eq!(payload.date, now());
    }
}
