// One schema per entity, plus the entity-specific page actions.

pub mod device_port;
pub mod employee;
pub mod equipment;
pub mod equipment_type;
pub mod ip_address;
pub mod maintenance;

pub use device_port::{Connection, DevicePortFilter, DevicePortPage, DevicePortSchema, DevicePortStats};
pub use employee::{EmployeeFilter, EmployeePage, EmployeeSchema, EmployeeStats};
pub use equipment::{EquipmentFilter, EquipmentPage, EquipmentSchema, EquipmentStats};
pub use equipment_type::{
    EquipmentTypeFilter, EquipmentTypePage, EquipmentTypeSchema, EquipmentTypeStats,
};
pub use ip_address::{IpAddressFilter, IpAddressPage, IpAddressSchema, IpAddressStats};
pub use maintenance::{MaintenanceFilter, MaintenancePage, MaintenanceSchema, MaintenanceStats};
