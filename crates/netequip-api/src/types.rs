// Wire types for the inventory API.
//
// Records mirror the backend's response DTOs (camelCase JSON). Every field
// the list projections may omit is optional so the same type decodes both
// list and single-entity responses.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Backend identifiers are 64-bit integers.
pub type Id = i64;

// ── Lenient enum wrapper ─────────────────────────────────────────────

/// An enum value that tolerates codes this client does not know.
///
/// Known codes decode into `Known(T)`; anything else is kept verbatim so
/// that it survives a round trip and can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lenient<T> {
    Known(T),
    Unknown(String),
}

impl<T: AsRef<str>> Lenient<T> {
    /// The wire representation.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(v) => v.as_ref(),
            Self::Unknown(raw) => raw,
        }
    }
}

impl<T: Copy> Lenient<T> {
    pub fn known(&self) -> Option<T> {
        match self {
            Self::Known(v) => Some(*v),
            Self::Unknown(_) => None,
        }
    }
}

impl<T> From<T> for Lenient<T> {
    fn from(value: T) -> Self {
        Self::Known(value)
    }
}

impl<T: FromStr> FromStr for Lenient<T> {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(T::from_str(s).map_or_else(|_| Self::Unknown(s.to_owned()), Self::Known))
    }
}

impl<T: AsRef<str>> fmt::Display for Lenient<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<T: AsRef<str>> Serialize for Lenient<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de, T: FromStr> Deserialize<'de> for Lenient<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match T::from_str(&raw) {
            Ok(v) => Self::Known(v),
            Err(_) => Self::Unknown(raw),
        })
    }
}

// ── Enumerations ─────────────────────────────────────────────────────

/// Lifecycle status of a piece of equipment.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, Serialize,
)]
pub enum EquipmentStatus {
    Active,
    Inactive,
    Maintenance,
    Retired,
}

/// Administrative status of a device port.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, Serialize,
)]
pub enum PortStatus {
    Active,
    Inactive,
    Reserved,
}

/// Kind of maintenance work performed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, AsRefStr, Serialize,
)]
pub enum MaintenanceType {
    Routine,
    Repair,
    Upgrade,
    Emergency,
    Preventive,
}

// ── Records ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Equipment {
    pub id: Id,
    pub type_id: Option<Id>,
    pub type_name: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub employee_id: Option<Id>,
    pub employee_full_name: Option<String>,
    pub name: String,
    pub serial_number: Option<String>,
    pub mac_address: Option<String>,
    pub ip_address: Option<String>,
    pub address: Option<String>,
    pub status: Option<Lenient<EquipmentStatus>>,
    pub date_added: Option<NaiveDate>,
    pub date_updated: Option<NaiveDate>,
    pub technical_params: Option<serde_json::Value>,
    pub ports_count: Option<i64>,
    pub ip_addresses_count: Option<i64>,
    pub maintenance_count: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentType {
    pub id: Id,
    pub type_name: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub default_port_count: Option<i32>,
    pub connection_type: Option<String>,
    pub osi_level: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevicePort {
    pub id: Id,
    pub equipment_id: Option<Id>,
    pub equipment_name: Option<String>,
    pub port_number: Option<i32>,
    pub port_type: Option<String>,
    pub status: Option<Lenient<PortStatus>>,
    pub speed: Option<String>,
    pub connected_to_equipment_id: Option<Id>,
    pub connected_to_equipment_name: Option<String>,
    pub connected_to_port_id: Option<Id>,
    pub connected_to_port_number: Option<i32>,
    pub description: Option<String>,
}

impl DevicePort {
    pub fn is_connected(&self) -> bool {
        self.connected_to_port_id.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IpAddress {
    pub id: Id,
    pub equipment_id: Option<Id>,
    pub equipment_name: Option<String>,
    pub ip_address: String,
    pub subnet_mask: Option<String>,
    pub gateway: Option<String>,
    pub network_type: Option<String>,
    pub is_primary: Option<bool>,
    pub assigned_date: Option<NaiveDate>,
}

impl IpAddress {
    pub fn primary(&self) -> bool {
        self.is_primary.unwrap_or(false)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employee {
    pub id: Id,
    pub full_name: String,
    pub position: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MaintenanceRecord {
    pub id: Id,
    pub equipment_id: Option<Id>,
    pub equipment_name: Option<String>,
    pub date: Option<NaiveDateTime>,
    #[serde(rename = "type")]
    pub kind: Option<Lenient<MaintenanceType>>,
    pub description: Option<String>,
    pub performed_by_id: Option<Id>,
    pub performed_by_name: Option<String>,
    pub cost: Option<Decimal>,
    pub next_maintenance_date: Option<NaiveDate>,
}

// ── Create / update payloads ─────────────────────────────────────────
//
// Optional fields serialize as explicit `null`, matching what the backend's
// create and update DTOs expect.

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentPayload {
    pub type_id: Id,
    pub employee_id: Option<Id>,
    pub name: String,
    pub serial_number: Option<String>,
    pub ip_address: Option<String>,
    pub mac_address: Option<String>,
    pub address: Option<String>,
    pub status: EquipmentStatus,
    pub technical_params: Option<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentTypePayload {
    pub type_name: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub default_port_count: Option<i32>,
    pub connection_type: Option<String>,
    pub osi_level: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePortPayload {
    pub equipment_id: Id,
    pub port_number: i32,
    pub port_type: Option<String>,
    pub status: PortStatus,
    pub speed: Option<String>,
    pub connected_to_equipment_id: Option<Id>,
    pub connected_to_port_id: Option<Id>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAddressPayload {
    pub equipment_id: Id,
    pub ip_address: String,
    pub subnet_mask: Option<String>,
    pub gateway: Option<String>,
    pub network_type: Option<String>,
    pub is_primary: bool,
    pub assigned_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePayload {
    pub full_name: String,
    pub position: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenancePayload {
    pub equipment_id: Id,
    pub date: NaiveDateTime,
    #[serde(rename = "type")]
    pub kind: MaintenanceType,
    pub description: Option<String>,
    pub performed_by_id: Option<Id>,
    pub cost: Option<Decimal>,
    pub next_maintenance_date: Option<NaiveDate>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn unknown_status_is_preserved() {
        let port: DevicePort = serde_json::from_value(json!({
            "id": 7,
            "status": "Disabled",
        }))
        .unwrap();

        assert_eq!(port.status, Some(Lenient::Unknown("Disabled".into())));
        assert_eq!(serde_json::to_value(&port).unwrap()["status"], "Disabled");
    }

    #[test]
    fn list_projection_decodes_with_missing_fields() {
        let eq: Equipment = serde_json::from_value(json!({
            "id": 1,
            "name": "core-sw-01",
            "status": "Maintenance",
            "dateAdded": "2024-03-01",
        }))
        .unwrap();

        assert_eq!(eq.status, Some(Lenient::Known(EquipmentStatus::Maintenance)));
        assert_eq!(eq.date_added, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert!(eq.technical_params.is_none());
    }

    #[test]
    fn maintenance_type_uses_wire_name() {
        let record: MaintenanceRecord = serde_json::from_value(json!({
            "id": 3,
            "type": "Emergency",
            "date": "2024-05-02T14:30:00",
            "cost": 1250.5,
        }))
        .unwrap();

        assert_eq!(record.kind.and_then(|k| k.known()), Some(MaintenanceType::Emergency));
        assert_eq!(record.cost, Some(Decimal::new(12505, 1)));
    }

    #[test]
    fn payload_keeps_explicit_nulls() {
        let payload = EmployeePayload {
            full_name: "Anna Petrova".into(),
            position: None,
            email: None,
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({ "fullName": "Anna Petrova", "position": null, "email": null })
        );
    }
}
