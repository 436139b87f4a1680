// Typed helpers for the entity-specific sub-resources.
//
// Plain CRUD goes through the generic verbs on ApiClient with the
// collection paths below; everything that is not CRUD lives here.

use chrono::NaiveDate;

use crate::client::ApiClient;
use crate::types::{
    DevicePort, Employee, Equipment, EquipmentStatus, EquipmentType, Id, IpAddress,
    MaintenanceRecord, PortStatus,
};
use crate::Error;

// ── Collection paths ─────────────────────────────────────────────────

pub mod paths {
    pub const EQUIPMENT: &str = "equipment";
    pub const EQUIPMENT_TYPES: &str = "equipment-types";
    pub const DEVICE_PORTS: &str = "device-ports";
    pub const EMPLOYEES: &str = "employees";
    pub const IP_ADDRESSES: &str = "ip-addresses";
    pub const MAINTENANCE: &str = "maintenance-history";
}

impl ApiClient {
    // ── Equipment ────────────────────────────────────────────────────

    /// `PATCH /equipment/{id}/status?status=`
    pub async fn set_equipment_status(
        &self,
        id: Id,
        status: EquipmentStatus,
    ) -> Result<Option<Equipment>, Error> {
        self.patch_with_params(
            &format!("{}/{id}/status", paths::EQUIPMENT),
            &[("status", status.to_string())],
        )
        .await
    }

    // ── Equipment types ──────────────────────────────────────────────

    /// `GET /equipment-types/exists?typeName=`
    pub async fn equipment_type_exists(&self, type_name: &str) -> Result<bool, Error> {
        self.get_with_params(
            &format!("{}/exists", paths::EQUIPMENT_TYPES),
            &[("typeName", type_name.to_owned())],
        )
        .await
    }

    /// `GET /equipment-types/search?manufacturer=&model=`: the single
    /// matching type, or a 404 when there is none.
    pub async fn search_equipment_types(
        &self,
        manufacturer: &str,
        model: &str,
    ) -> Result<EquipmentType, Error> {
        self.get_with_params(
            &format!("{}/search", paths::EQUIPMENT_TYPES),
            &[
                ("manufacturer", manufacturer.to_owned()),
                ("model", model.to_owned()),
            ],
        )
        .await
    }

    // ── Device ports ─────────────────────────────────────────────────

    /// `GET /device-ports/equipment/{id}`
    pub async fn ports_for_equipment(&self, equipment_id: Id) -> Result<Vec<DevicePort>, Error> {
        self.get(&format!("{}/equipment/{equipment_id}", paths::DEVICE_PORTS))
            .await
    }

    /// `GET /device-ports/equipment/{id}/available`: ports not connected yet.
    pub async fn available_ports(&self, equipment_id: Id) -> Result<Vec<DevicePort>, Error> {
        self.get(&format!(
            "{}/equipment/{equipment_id}/available",
            paths::DEVICE_PORTS
        ))
        .await
    }

    /// `PATCH /device-ports/{source}/connect/{target}`
    pub async fn connect_ports(
        &self,
        source_port_id: Id,
        target_port_id: Id,
    ) -> Result<Option<DevicePort>, Error> {
        self.patch(&format!(
            "{}/{source_port_id}/connect/{target_port_id}",
            paths::DEVICE_PORTS
        ))
        .await
    }

    /// `PATCH /device-ports/{id}/disconnect`
    pub async fn disconnect_port(&self, port_id: Id) -> Result<Option<DevicePort>, Error> {
        self.patch(&format!("{}/{port_id}/disconnect", paths::DEVICE_PORTS))
            .await
    }

    /// `PATCH /device-ports/{id}/status?status=`
    pub async fn set_port_status(
        &self,
        port_id: Id,
        status: PortStatus,
    ) -> Result<Option<DevicePort>, Error> {
        self.patch_with_params(
            &format!("{}/{port_id}/status", paths::DEVICE_PORTS),
            &[("status", status.to_string())],
        )
        .await
    }

    // ── IP addresses ─────────────────────────────────────────────────

    /// `PATCH /ip-addresses/{id}/set-primary`
    pub async fn set_primary_ip(&self, id: Id) -> Result<Option<IpAddress>, Error> {
        self.patch(&format!("{}/{id}/set-primary", paths::IP_ADDRESSES))
            .await
    }

    /// `PATCH /ip-addresses/{id}/unset-primary`
    pub async fn unset_primary_ip(&self, id: Id) -> Result<Option<IpAddress>, Error> {
        self.patch(&format!("{}/{id}/unset-primary", paths::IP_ADDRESSES))
            .await
    }

    /// `GET /ip-addresses/exists?ip=`
    pub async fn ip_address_exists(&self, ip: &str) -> Result<bool, Error> {
        self.get_with_params(
            &format!("{}/exists", paths::IP_ADDRESSES),
            &[("ip", ip.to_owned())],
        )
        .await
    }

    // ── Employees ────────────────────────────────────────────────────

    /// `GET /employees/exists/email?email=`
    pub async fn employee_email_exists(&self, email: &str) -> Result<bool, Error> {
        self.get_with_params(
            &format!("{}/exists/email", paths::EMPLOYEES),
            &[("email", email.to_owned())],
        )
        .await
    }

    /// `GET /employees/search?name=`
    pub async fn search_employees(&self, name: &str) -> Result<Vec<Employee>, Error> {
        self.get_with_params(
            &format!("{}/search", paths::EMPLOYEES),
            &[("name", name.to_owned())],
        )
        .await
    }

    // ── Maintenance ──────────────────────────────────────────────────

    /// `PATCH /maintenance-history/equipment/{id}/schedule-next?date=`
    pub async fn schedule_next_maintenance(
        &self,
        equipment_id: Id,
        date: NaiveDate,
    ) -> Result<Option<MaintenanceRecord>, Error> {
        self.patch_with_params(
            &format!("{}/equipment/{equipment_id}/schedule-next", paths::MAINTENANCE),
            &[("date", date.format("%Y-%m-%d").to_string())],
        )
        .await
    }
}
