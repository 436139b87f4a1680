// netequip-core: page controllers between netequip-api and the CLI.

pub mod config;
pub mod entities;
pub mod error;
pub mod form;
pub mod inventory;
pub mod page;
pub mod present;
pub mod query;
pub mod schema;
pub mod validate;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConnectionConfig, DisplayOptions};
pub use error::CoreError;
pub use form::FormFields;
pub use inventory::Inventory;
pub use page::{
    Confirm, EntityPage, FormMode, Modal, Notice, NoticeLevel, Outcome, SubmitOutcome,
};
pub use present::DisplayLocale;
pub use query::{Query, filter_records};
pub use schema::{
    EntitySchema, Facet, FacetOption, Reference, ReferenceData, Summary, UniqueProbe,
};
pub use validate::ValidationError;

pub use entities::{
    Connection, DevicePortFilter, DevicePortPage, DevicePortSchema, DevicePortStats,
    EmployeeFilter, EmployeePage, EmployeeSchema, EmployeeStats, EquipmentFilter, EquipmentPage,
    EquipmentSchema, EquipmentStats, EquipmentTypeFilter, EquipmentTypePage, EquipmentTypeSchema,
    EquipmentTypeStats, IpAddressFilter, IpAddressPage, IpAddressSchema, IpAddressStats,
    MaintenanceFilter, MaintenancePage, MaintenanceSchema, MaintenanceStats,
};

// Wire types, so consumers need only this crate.
pub use netequip_api::{
    DevicePort, Employee, Equipment, EquipmentStatus, EquipmentType, Id, IpAddress, Lenient,
    MaintenanceRecord, MaintenanceType, PortStatus,
};
