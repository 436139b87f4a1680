// Device ports and the links between them.
//
// Link symmetry is the server's job: connect and disconnect are single
// PATCH calls and the collection is reloaded afterwards.

use chrono::NaiveDateTime;
use serde::Serialize;
use strum::{AsRefStr, Display, EnumIter, EnumString};

use netequip_api::{DevicePort, DevicePortPayload, Id, Lenient, PortStatus, paths};

use crate::config::DisplayOptions;
use crate::error::CoreError;
use crate::form::{self, form_fields};
use crate::page::{Confirm, EntityPage, NoticeLevel, Outcome};
use crate::schema::{EntitySchema, Facet, FacetOption, Reference, ReferenceData, Summary};
use crate::validate::{self, ValidationError};

pub struct DevicePortSchema;

pub type DevicePortPage = EntityPage<DevicePortSchema>;

form_fields! {
    pub struct DevicePortForm {
        equipment_id => "equipmentId",
        port_number => "portNumber",
        port_type => "portType",
        status => "status",
        speed => "speed",
        connected_to_equipment_id => "connectedToEquipmentId",
        connected_to_port_id => "connectedToPortId",
        description => "description",
    }
}

/// Whether a port is linked to another port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Connection {
    Connected,
    Available,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DevicePortFilter {
    pub equipment_id: Option<Id>,
    pub status: Option<PortStatus>,
    pub port_type: Option<String>,
    pub connection: Option<Connection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DevicePortStats {
    pub total: usize,
    pub active: usize,
    pub connected: usize,
}

impl Summary for DevicePortStats {
    fn entries(&self, _display: &DisplayOptions) -> Vec<(&'static str, String)> {
        vec![
            ("Total", self.total.to_string()),
            ("Active", self.active.to_string()),
            ("Connected", self.connected.to_string()),
        ]
    }
}

fn port_status(port: &DevicePort) -> Option<PortStatus> {
    port.status.as_ref().and_then(Lenient::known)
}

fn port_number(port: &DevicePort) -> String {
    port.port_number
        .map_or_else(|| "?".to_owned(), |n| n.to_string())
}

impl EntitySchema for DevicePortSchema {
    type Record = DevicePort;
    type Form = DevicePortForm;
    type Payload = DevicePortPayload;
    type Filter = DevicePortFilter;
    type Stats = DevicePortStats;

    const PATH: &'static str = paths::DEVICE_PORTS;
    const TITLE: &'static str = "Port";
    const REFERENCES: &'static [Reference] = &[Reference::Equipment];

    fn id(record: &DevicePort) -> Id {
        record.id
    }

    fn label(record: &DevicePort) -> String {
        match record.equipment_name.as_deref() {
            Some(equipment) => format!("{equipment} → Port {}", port_number(record)),
            None => format!("Port {}", port_number(record)),
        }
    }

    fn search_fields(record: &DevicePort) -> Vec<&str> {
        [
            record.equipment_name.as_deref(),
            record.description.as_deref(),
            record.connected_to_equipment_name.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    fn matches(filter: &DevicePortFilter, record: &DevicePort, _now: NaiveDateTime) -> bool {
        filter
            .equipment_id
            .is_none_or(|id| record.equipment_id == Some(id))
            && filter.status.is_none_or(|s| port_status(record) == Some(s))
            && filter
                .port_type
                .as_ref()
                .is_none_or(|t| record.port_type.as_deref() == Some(t.as_str()))
            && filter.connection.is_none_or(|c| match c {
                Connection::Connected => record.is_connected(),
                Connection::Available => !record.is_connected(),
            })
    }

    fn stats(records: &[DevicePort], _now: NaiveDateTime) -> DevicePortStats {
        DevicePortStats {
            total: records.len(),
            active: records
                .iter()
                .filter(|p| port_status(p) == Some(PortStatus::Active))
                .count(),
            connected: records.iter().filter(|p| p.is_connected()).count(),
        }
    }

    fn facets(records: &[DevicePort], references: &ReferenceData) -> Vec<Facet> {
        vec![
            Facet::new("equipmentId", references.equipment_options()),
            Facet::variants::<PortStatus>("status"),
            Facet::distinct("portType", records.iter().map(|p| p.port_type.as_deref())),
            Facet::variants::<Connection>("connection"),
        ]
    }

    fn new_form(_now: NaiveDateTime) -> DevicePortForm {
        DevicePortForm {
            status: PortStatus::Inactive.to_string(),
            ..DevicePortForm::default()
        }
    }

    fn form_from_record(record: &DevicePort) -> DevicePortForm {
        DevicePortForm {
            equipment_id: form::raw(record.equipment_id),
            port_number: form::raw(record.port_number),
            port_type: form::raw(record.port_type.as_deref()),
            status: form::raw(record.status.as_ref()),
            speed: form::raw(record.speed.as_deref()),
            connected_to_equipment_id: form::raw(record.connected_to_equipment_id),
            connected_to_port_id: form::raw(record.connected_to_port_id),
            description: form::raw(record.description.as_deref()),
        }
    }

    fn build_payload(form: &DevicePortForm) -> Result<DevicePortPayload, ValidationError> {
        let equipment_id = form::require(
            "equipmentId",
            form::parse_id("equipmentId", &form.equipment_id)?,
        )?;
        let port_number = form::require(
            "portNumber",
            form::parse_int("portNumber", &form.port_number)?,
        )?;
        validate::check_range("portNumber", Some(port_number), 1..=256)?;

        let description = form::text(&form.description);
        validate::check_max_len("description", description.as_deref(), 200)?;

        Ok(DevicePortPayload {
            equipment_id,
            port_number,
            port_type: form::text(&form.port_type),
            status: form::parse_enum("status", &form.status)?.unwrap_or(PortStatus::Inactive),
            speed: form::text(&form.speed),
            connected_to_equipment_id: form::parse_id(
                "connectedToEquipmentId",
                &form.connected_to_equipment_id,
            )?,
            connected_to_port_id: form::parse_id("connectedToPortId", &form.connected_to_port_id)?,
            description,
        })
    }

    fn delete_prompt(record: &DevicePort) -> String {
        format!(
            "Delete port {} of \"{}\"?",
            port_number(record),
            record.equipment_name.as_deref().unwrap_or("?")
        )
    }
}

impl EntityPage<DevicePortSchema> {
    /// Equipment a port may be connected to: everything except the
    /// port's own equipment. `None` if the port is not loaded.
    pub fn connect_candidates(&self, source_port: Id) -> Option<Vec<FacetOption>> {
        let source = self.find(source_port)?;
        Some(
            self.references()
                .equipment
                .iter()
                .filter(|e| Some(e.id) != source.equipment_id)
                .map(|e| FacetOption::new(e.id.to_string(), e.name.clone()))
                .collect(),
        )
    }

    /// Unconnected ports of one piece of equipment.
    pub async fn available_ports(&self, equipment_id: Id) -> Result<Vec<DevicePort>, CoreError> {
        Ok(self.client().available_ports(equipment_id).await?)
    }

    /// All ports of one piece of equipment.
    pub async fn ports_for_equipment(&self, equipment_id: Id) -> Result<Vec<DevicePort>, CoreError> {
        Ok(self.client().ports_for_equipment(equipment_id).await?)
    }

    /// Link `source_port` to `target_port` on `target_equipment`.
    ///
    /// The target equipment's available ports are fetched first; the
    /// target must be among them.
    pub async fn connect(
        &mut self,
        source_port: Id,
        target_equipment: Id,
        target_port: Id,
    ) -> Result<Outcome, CoreError> {
        if self.find(source_port).is_none() {
            return Ok(Outcome::NotInCache);
        }

        let available = self.available_ports(target_equipment).await?;
        if !available.iter().any(|p| p.id == target_port) {
            let err = CoreError::PortUnavailable {
                port_id: target_port,
                equipment_id: target_equipment,
            };
            self.notify(NoticeLevel::Error, err.to_string());
            return Err(err);
        }

        let result = self.client().connect_ports(source_port, target_port).await;
        self.finish_action(result, "Ports connected").await?;
        Ok(Outcome::Done)
    }

    /// Remove a port's link after confirmation.
    pub async fn disconnect(&mut self, port_id: Id, confirm: &dyn Confirm) -> Result<Outcome, CoreError> {
        let Some(port) = self.find(port_id) else {
            return Ok(Outcome::NotInCache);
        };
        let prompt = format!("Disconnect {}?", DevicePortSchema::label(port));
        if !confirm.confirm(&prompt)? {
            return Ok(Outcome::Declined);
        }

        let result = self.client().disconnect_port(port_id).await;
        self.finish_action(result, "Port disconnected").await?;
        Ok(Outcome::Done)
    }

    pub async fn set_status(&mut self, port_id: Id, status: PortStatus) -> Result<Outcome, CoreError> {
        if self.find(port_id).is_none() {
            return Ok(Outcome::NotInCache);
        }
        let result = self.client().set_port_status(port_id, status).await;
        self.finish_action(result, &format!("Port status changed to {status}"))
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

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn ports() -> Vec<DevicePort> {
        serde_json::from_value(json!([
            { "id": 1, "equipmentId": 1, "equipmentName": "core-sw", "portNumber": 1,
              "portType": "SFP+", "status": "Active",
              "connectedToPortId": 3, "connectedToEquipmentName": "edge-rtr", "connectedToPortNumber": 1 },
            { "id": 2, "equipmentId": 1, "equipmentName": "core-sw", "portNumber": 2,
              "portType": "RJ45", "status": "Inactive" },
            { "id": 3, "equipmentId": 2, "equipmentName": "edge-rtr", "portNumber": 1,
              "portType": "SFP+", "status": "Active", "connectedToPortId": 1 },
        ]))
        .unwrap()
    }

    #[test]
    fn stats_and_connection_filter() {
        let records = ports();
        let stats = DevicePortSchema::stats(&records, now());
        assert_eq!(
            stats,
            DevicePortStats {
                total: 3,
                active: 2,
                connected: 2
            }
        );

        let filter = DevicePortFilter {
            equipment_id: Some(1),
            connection: Some(Connection::Available),
            ..DevicePortFilter::default()
        };
        let hits: Vec<_> = records
            .iter()
            .filter(|p| DevicePortSchema::matches(&filter, p, now()))
            .map(|p| p.id)
            .collect();
        assert_eq!(hits, vec![2]);
    }

    #[test]
    fn facets_list_port_types_once() {
        let facets = DevicePortSchema::facets(&ports(), &ReferenceData::default());
        let types: Vec<_> = facets[2].options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(types, vec!["RJ45", "SFP+"]);
        assert_eq!(facets[3].options.len(), 2);
    }

    #[test]
    fn port_number_range() {
        let mut form = DevicePortSchema::new_form(now());
        form.set("equipmentId", "1").unwrap();
        form.set("portNumber", "0").unwrap();
        assert_eq!(
            DevicePortSchema::build_payload(&form).unwrap_err().field,
            "portNumber"
        );

        form.set("portNumber", "24").unwrap();
        let payload = DevicePortSchema::build_payload(&form).unwrap();
        assert_eq!(payload.status, PortStatus::Inactive);
        assert_eq!(payload.connected_to_port_id, None);
    }

    #[test]
    fn label_names_equipment() {
        assert_eq!(DevicePortSchema::label(&ports()[0]), "core-sw → Port 1");
        assert_eq!("available".parse::<Connection>().unwrap(), Connection::Available);
    }
}
