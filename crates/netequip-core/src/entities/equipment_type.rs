// Equipment types: a catalogue keyed by a unique type name.

use chrono::NaiveDateTime;
use serde::Serialize;

use netequip_api::{EquipmentType, EquipmentTypePayload, Id, paths};

use crate::config::DisplayOptions;
use crate::error::CoreError;
use crate::form::{self, form_fields};
use crate::page::EntityPage;
use crate::schema::{
    EntitySchema, Facet, ReferenceData, Summary, UniqueProbe, distinct_values,
};
use crate::validate::{self, ValidationError};

pub struct EquipmentTypeSchema;

pub type EquipmentTypePage = EntityPage<EquipmentTypeSchema>;

form_fields! {
    pub struct EquipmentTypeForm {
        type_name => "typeName",
        manufacturer => "manufacturer",
        model => "model",
        default_port_count => "defaultPortCount",
        connection_type => "connectionType",
        osi_level => "osiLevel",
        description => "description",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EquipmentTypeFilter {
    pub osi_level: Option<String>,
    pub manufacturer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EquipmentTypeStats {
    pub total: usize,
    pub manufacturers: usize,
}

impl Summary for EquipmentTypeStats {
    fn entries(&self, _display: &DisplayOptions) -> Vec<(&'static str, String)> {
        vec![
            ("Total", self.total.to_string()),
            ("Manufacturers", self.manufacturers.to_string()),
        ]
    }
}

fn same(selected: Option<&String>, value: Option<&str>) -> bool {
    selected.is_none_or(|s| value == Some(s.as_str()))
}

impl EntitySchema for EquipmentTypeSchema {
    type Record = EquipmentType;
    type Form = EquipmentTypeForm;
    type Payload = EquipmentTypePayload;
    type Filter = EquipmentTypeFilter;
    type Stats = EquipmentTypeStats;

    const PATH: &'static str = paths::EQUIPMENT_TYPES;
    const TITLE: &'static str = "Equipment type";

    fn id(record: &EquipmentType) -> Id {
        record.id
    }

    fn label(record: &EquipmentType) -> String {
        record.type_name.clone()
    }

    fn search_fields(record: &EquipmentType) -> Vec<&str> {
        [
            Some(record.type_name.as_str()),
            record.manufacturer.as_deref(),
            record.model.as_deref(),
            record.connection_type.as_deref(),
            record.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn matches(filter: &EquipmentTypeFilter, record: &EquipmentType, _now: NaiveDateTime) -> bool {
        same(filter.osi_level.as_ref(), record.osi_level.as_deref())
            && same(filter.manufacturer.as_ref(), record.manufacturer.as_deref())
    }

    fn stats(records: &[EquipmentType], _now: NaiveDateTime) -> EquipmentTypeStats {
        EquipmentTypeStats {
            total: records.len(),
            manufacturers: distinct_values(records.iter().map(|t| t.manufacturer.as_deref())).len(),
        }
    }

    fn facets(records: &[EquipmentType], _references: &ReferenceData) -> Vec<Facet> {
        vec![
            Facet::distinct("osiLevel", records.iter().map(|t| t.osi_level.as_deref())),
            Facet::distinct(
                "manufacturer",
                records.iter().map(|t| t.manufacturer.as_deref()),
            ),
        ]
    }

    fn new_form(_now: NaiveDateTime) -> EquipmentTypeForm {
        EquipmentTypeForm::default()
    }

    fn form_from_record(record: &EquipmentType) -> EquipmentTypeForm {
        EquipmentTypeForm {
            type_name: record.type_name.clone(),
            manufacturer: form::raw(record.manufacturer.as_deref()),
            model: form::raw(record.model.as_deref()),
            default_port_count: form::raw(record.default_port_count),
            connection_type: form::raw(record.connection_type.as_deref()),
            osi_level: form::raw(record.osi_level.as_deref()),
            description: form::raw(record.description.as_deref()),
        }
    }

    fn build_payload(form: &EquipmentTypeForm) -> Result<EquipmentTypePayload, ValidationError> {
        let type_name = form::required("typeName", &form.type_name)?;
        validate::check_max_len("typeName", Some(&type_name), 50)?;

        let manufacturer = form::text(&form.manufacturer);
        validate::check_max_len("manufacturer", manufacturer.as_deref(), 100)?;
        let model = form::text(&form.model);
        validate::check_max_len("model", model.as_deref(), 100)?;

        let default_port_count = form::parse_int("defaultPortCount", &form.default_port_count)?;
        validate::check_range("defaultPortCount", default_port_count, 0..=256)?;

        let connection_type = form::text(&form.connection_type);
        validate::check_max_len("connectionType", connection_type.as_deref(), 50)?;
        let osi_level = form::text(&form.osi_level);
        validate::check_max_len("osiLevel", osi_level.as_deref(), 20)?;

        Ok(EquipmentTypePayload {
            type_name,
            manufacturer,
            model,
            default_port_count,
            connection_type,
            osi_level,
            description: form::text(&form.description),
        })
    }

    fn uniqueness_probe(payload: &EquipmentTypePayload) -> Option<UniqueProbe> {
        Some(UniqueProbe::TypeName(payload.type_name.clone()))
    }

    fn delete_prompt(record: &EquipmentType) -> String {
        format!(
            "Delete equipment type \"{}\"?\n\nWARNING: this also deletes all equipment of this type!",
            record.type_name
        )
    }
}

impl EntityPage<EquipmentTypeSchema> {
    /// Server-side lookup by manufacturer and model. `None` when no type
    /// matches the pair.
    pub async fn search_by_manufacturer_model(
        &self,
        manufacturer: &str,
        model: &str,
    ) -> Result<Option<EquipmentType>, CoreError> {
        match self
            .client()
            .search_equipment_types(manufacturer.trim(), model.trim())
            .await
        {
            Ok(found) => Ok(Some(found)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::form::FormFields;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn record(id: Id, name: &str, manufacturer: Option<&str>, osi: Option<&str>) -> EquipmentType {
        EquipmentType {
            id,
            type_name: name.into(),
            manufacturer: manufacturer.map(Into::into),
            osi_level: osi.map(Into::into),
            ..EquipmentType::default()
        }
    }

    #[test]
    fn stats_and_facets() {
        let records = vec![
            record(1, "Switch", Some("Cisco"), Some("L2")),
            record(2, "Router", Some("Cisco"), Some("L3")),
            record(3, "Firewall", Some("Fortinet"), Some("L3")),
            record(4, "Patch panel", None, None),
        ];
        let stats = EquipmentTypeSchema::stats(&records, now());
        assert_eq!(stats.total, 4);
        assert_eq!(stats.manufacturers, 2);

        let facets = EquipmentTypeSchema::facets(&records, &ReferenceData::default());
        let osi: Vec<_> = facets[0].options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(osi, vec!["L2", "L3"]);

        let filter = EquipmentTypeFilter {
            osi_level: Some("L3".into()),
            manufacturer: Some("Cisco".into()),
        };
        let hits: Vec<_> = records
            .iter()
            .filter(|r| EquipmentTypeSchema::matches(&filter, r, now()))
            .map(|r| r.id)
            .collect();
        assert_eq!(hits, vec![2]);
    }

    #[test]
    fn payload_limits() {
        let mut form = EquipmentTypeSchema::new_form(now());
        assert_eq!(
            EquipmentTypeSchema::build_payload(&form).unwrap_err().field,
            "typeName"
        );

        form.set("typeName", "Core Switch").unwrap();
        form.set("defaultPortCount", "512").unwrap();
        assert_eq!(
            EquipmentTypeSchema::build_payload(&form).unwrap_err().field,
            "defaultPortCount"
        );

        form.set("defaultPortCount", "48").unwrap();
        form.set("osiLevel", " L2 ").unwrap();
        let payload = EquipmentTypeSchema::build_payload(&form).unwrap();
        assert_eq!(payload.default_port_count, Some(48));
        assert_eq!(payload.osi_level.as_deref(), Some("L2"));
        assert_eq!(payload.manufacturer, None);
        assert_eq!(
            EquipmentTypeSchema::uniqueness_probe(&payload),
            Some(UniqueProbe::TypeName("Core Switch".into()))
        );
    }
}
