// Equipment: the central entity. References equipment types and employees.

use chrono::NaiveDateTime;
use serde::Serialize;

use netequip_api::{Equipment, EquipmentPayload, EquipmentStatus, Id, Lenient, paths};

use crate::config::DisplayOptions;
use crate::error::CoreError;
use crate::form::{self, form_fields};
use crate::page::{EntityPage, Outcome};
use crate::schema::{EntitySchema, Facet, Reference, ReferenceData, Summary};
use crate::validate::{self, ValidationError};

pub struct EquipmentSchema;

pub type EquipmentPage = EntityPage<EquipmentSchema>;

form_fields! {
    /// Raw equipment form input.
    pub struct EquipmentForm {
        name => "name",
        serial_number => "serialNumber",
        type_id => "typeId",
        employee_id => "employeeId",
        ip_address => "ipAddress",
        mac_address => "macAddress",
        address => "address",
        status => "status",
        technical_params => "technicalParams",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentFilter {
    pub status: Option<EquipmentStatus>,
    pub type_id: Option<Id>,
    pub employee_id: Option<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EquipmentStats {
    pub total: usize,
    pub active: usize,
    pub maintenance: usize,
}

impl Summary for EquipmentStats {
    fn entries(&self, _display: &DisplayOptions) -> Vec<(&'static str, String)> {
        vec![
            ("Total", self.total.to_string()),
            ("Active", self.active.to_string()),
            ("In maintenance", self.maintenance.to_string()),
        ]
    }
}

fn has_status(record: &Equipment, status: EquipmentStatus) -> bool {
    record.status.as_ref().and_then(Lenient::known) == Some(status)
}

impl EntitySchema for EquipmentSchema {
    type Record = Equipment;
    type Form = EquipmentForm;
    type Payload = EquipmentPayload;
    type Filter = EquipmentFilter;
    type Stats = EquipmentStats;

    const PATH: &'static str = paths::EQUIPMENT;
    const TITLE: &'static str = "Equipment";
    const REFERENCES: &'static [Reference] = &[Reference::EquipmentTypes, Reference::Employees];

    fn id(record: &Equipment) -> Id {
        record.id
    }

    fn label(record: &Equipment) -> String {
        record.name.clone()
    }

    fn search_fields(record: &Equipment) -> Vec<&str> {
        [
            Some(record.name.as_str()),
            record.serial_number.as_deref(),
            record.ip_address.as_deref(),
            record.mac_address.as_deref(),
            record.address.as_deref(),
            record.type_name.as_deref(),
            record.employee_full_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn matches(filter: &EquipmentFilter, record: &Equipment, _now: NaiveDateTime) -> bool {
        filter.status.is_none_or(|s| has_status(record, s))
            && filter.type_id.is_none_or(|id| record.type_id == Some(id))
            && filter
                .employee_id
                .is_none_or(|id| record.employee_id == Some(id))
    }

    fn stats(records: &[Equipment], _now: NaiveDateTime) -> EquipmentStats {
        EquipmentStats {
            total: records.len(),
            active: records
                .iter()
                .filter(|r| has_status(r, EquipmentStatus::Active))
                .count(),
            maintenance: records
                .iter()
                .filter(|r| has_status(r, EquipmentStatus::Maintenance))
                .count(),
        }
    }

    fn facets(_records: &[Equipment], references: &ReferenceData) -> Vec<Facet> {
        vec![
            Facet::variants::<EquipmentStatus>("status"),
            Facet::new("typeId", references.type_options()),
            Facet::new("employeeId", references.employee_options()),
        ]
    }

    fn new_form(_now: NaiveDateTime) -> EquipmentForm {
        EquipmentForm {
            status: EquipmentStatus::Active.to_string(),
            ..EquipmentForm::default()
        }
    }

    fn form_from_record(record: &Equipment) -> EquipmentForm {
        EquipmentForm {
            name: record.name.clone(),
            serial_number: form::raw(record.serial_number.as_deref()),
            type_id: form::raw(record.type_id),
            employee_id: form::raw(record.employee_id),
            ip_address: form::raw(record.ip_address.as_deref()),
            mac_address: form::raw(record.mac_address.as_deref()),
            address: form::raw(record.address.as_deref()),
            status: form::raw(record.status.as_ref()),
            technical_params: record
                .technical_params
                .as_ref()
                .and_then(|v| serde_json::to_string_pretty(v).ok())
                .unwrap_or_default(),
        }
    }

    fn build_payload(form: &EquipmentForm) -> Result<EquipmentPayload, ValidationError> {
        let name = form::required("name", &form.name)?;
        validate::check_max_len("name", Some(&name), 100)?;

        let serial_number = form::text(&form.serial_number);
        validate::check_max_len("serialNumber", serial_number.as_deref(), 100)?;

        let type_id = form::require("typeId", form::parse_id("typeId", &form.type_id)?)?;
        let employee_id = form::parse_id("employeeId", &form.employee_id)?;

        let ip_address = form::text(&form.ip_address);
        validate::check_pattern(
            "ipAddress",
            ip_address.as_deref(),
            validate::is_ip_address,
            "IP address",
        )?;

        let mac_address = form::text(&form.mac_address);
        validate::check_pattern(
            "macAddress",
            mac_address.as_deref(),
            validate::is_mac_address,
            "MAC address",
        )?;

        let address = form::text(&form.address);
        validate::check_max_len("address", address.as_deref(), 250)?;

        let status = form::parse_enum("status", &form.status)?.unwrap_or(EquipmentStatus::Active);
        let technical_params = validate::technical_params("technicalParams", &form.technical_params)?;

        Ok(EquipmentPayload {
            type_id,
            employee_id,
            name,
            serial_number,
            ip_address,
            mac_address,
            address,
            status,
            technical_params,
        })
    }

    fn delete_prompt(record: &Equipment) -> String {
        format!(
            "Delete equipment \"{}\"?\n\nThis also deletes:\n- all of its ports\n- all of its IP addresses\n- its maintenance history",
            record.name
        )
    }
}

impl EntityPage<EquipmentSchema> {
    /// Change the lifecycle status of a loaded piece of equipment.
    pub async fn set_status(&mut self, id: Id, status: EquipmentStatus) -> Result<Outcome, CoreError> {
        if self.find(id).is_none() {
            return Ok(Outcome::NotInCache);
        }
        let result = self.client().set_equipment_status(id, status).await;
        self.finish_action(result, &format!("Status changed to {status}"))
            .await?;
        Ok(Outcome::Done)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::form::FormFields;
    use crate::query::{Query, filter_records};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn sample() -> Vec<Equipment> {
        serde_json::from_value(json!([
            { "id": 1, "name": "core-sw-01", "status": "Active", "typeId": 1,
              "ipAddress": "10.0.0.1", "employeeFullName": "Anna Petrova", "employeeId": 5 },
            { "id": 2, "name": "edge-rtr", "status": "Maintenance", "typeId": 2,
              "address": "Server room B" },
            { "id": 3, "name": "old-ap", "status": "Decommissioned", "typeId": 2 },
        ]))
        .unwrap()
    }

    #[test]
    fn stats_count_known_statuses() {
        let stats = EquipmentSchema::stats(&sample()[..2], now());
        assert_eq!(
            stats,
            EquipmentStats {
                total: 2,
                active: 1,
                maintenance: 1
            }
        );
    }

    #[test]
    fn filtering_is_a_subset_and_idempotent() {
        let records = sample();
        let query = Query {
            search: "  ROOM ".into(),
            filter: EquipmentFilter {
                type_id: Some(2),
                ..EquipmentFilter::default()
            },
        };
        let once: Vec<Equipment> = filter_records::<EquipmentSchema>(&records, &query, now())
            .into_iter()
            .cloned()
            .collect();
        assert_eq!(once.iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);

        let twice = filter_records::<EquipmentSchema>(&once, &query, now());
        assert_eq!(twice.len(), once.len());

        let by_status = Query {
            search: String::new(),
            filter: EquipmentFilter {
                status: Some(EquipmentStatus::Active),
                ..EquipmentFilter::default()
            },
        };
        let active = filter_records::<EquipmentSchema>(&records, &by_status, now());
        assert!(active.iter().all(|e| has_status(e, EquipmentStatus::Active)));
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn payload_normalizes_input() {
        let mut form = EquipmentSchema::new_form(now());
        form.set("name", "  core-sw-02 ").unwrap();
        form.set("typeId", "4").unwrap();
        form.set("serialNumber", "   ").unwrap();
        form.set("macAddress", "00:1a:2b:3c:4d:5e").unwrap();
        form.set("technicalParams", r#"{"ports": 48}"#).unwrap();

        let payload = EquipmentSchema::build_payload(&form).unwrap();
        assert_eq!(payload.name, "core-sw-02");
        assert_eq!(payload.type_id, 4);
        assert_eq!(payload.serial_number, None);
        assert_eq!(payload.status, EquipmentStatus::Active);
        assert_eq!(payload.technical_params, Some(json!({"ports": 48})));
    }

    #[test]
    fn payload_rejects_bad_input() {
        let mut form = EquipmentSchema::new_form(now());
        form.set("name", "sw").unwrap();
        assert_eq!(
            EquipmentSchema::build_payload(&form).unwrap_err().field,
            "typeId"
        );

        form.set("typeId", "1").unwrap();
        form.set("technicalParams", "{not json").unwrap();
        assert_eq!(
            EquipmentSchema::build_payload(&form).unwrap_err().field,
            "technicalParams"
        );

        form.set("technicalParams", "").unwrap();
        form.set("ipAddress", "300.1.1.1").unwrap();
        assert_eq!(
            EquipmentSchema::build_payload(&form).unwrap_err().field,
            "ipAddress"
        );
    }

    #[test]
    fn edit_form_keeps_unknown_status() {
        let form = EquipmentSchema::form_from_record(&sample()[2]);
        assert_eq!(form.status, "Decommissioned");
        assert_eq!(form.type_id, "2");
        assert!(EquipmentSchema::build_payload(&form).is_err());
    }
}
