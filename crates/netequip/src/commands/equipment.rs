//! Equipment command handlers.

use tabled::Tabled;

use netequip_core::present::{self, Badge};
use netequip_core::validate;
use netequip_core::{Equipment, EquipmentFilter, EquipmentSchema, EquipmentStatus, Inventory};

use crate::cli::{EquipmentArgs, EquipmentCommand, EquipmentStatusArg};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::crud::{self, Resource};
use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
pub struct EquipmentRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    type_name: String,
    #[tabled(rename = "Serial")]
    serial: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Owner")]
    owner: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<EquipmentStatusArg> for EquipmentStatus {
    fn from(arg: EquipmentStatusArg) -> Self {
        match arg {
            EquipmentStatusArg::Active => Self::Active,
            EquipmentStatusArg::Inactive => Self::Inactive,
            EquipmentStatusArg::Maintenance => Self::Maintenance,
            EquipmentStatusArg::Retired => Self::Retired,
        }
    }
}

fn type_label(e: &Equipment) -> String {
    match (&e.type_name, &e.manufacturer, &e.model) {
        (Some(name), Some(m), Some(model)) => format!("{name} ({m} {model})"),
        (Some(name), _, _) => name.clone(),
        _ => e.type_id.map(|id| format!("#{id}")).unwrap_or_default(),
    }
}

fn count(value: Option<i64>) -> String {
    value.unwrap_or(0).to_string()
}

impl Resource for EquipmentSchema {
    type Row = EquipmentRow;

    const LIST_COMMAND: &'static str = "equipment list";

    fn row(e: &Equipment, settings: &Settings) -> EquipmentRow {
        EquipmentRow {
            id: e.id,
            name: e.name.clone(),
            type_name: type_label(e),
            serial: e.serial_number.clone().unwrap_or_default(),
            ip: e.ip_address.clone().unwrap_or_default(),
            owner: e.employee_full_name.clone().unwrap_or_default(),
            status: output::paint(&present::equipment_status_badge(e.status.as_ref()), settings.color),
        }
    }

    fn detail(e: &Equipment, settings: &Settings) -> Vec<(&'static str, String)> {
        let locale = settings.display.locale;
        let date = |d: Option<chrono::NaiveDate>| {
            d.map(|d| present::format_date(d, locale)).unwrap_or_default()
        };
        vec![
            ("ID", e.id.to_string()),
            ("Name", e.name.clone()),
            ("Type", type_label(e)),
            ("Serial", e.serial_number.clone().unwrap_or_default()),
            ("MAC", e.mac_address.clone().unwrap_or_default()),
            ("IP", e.ip_address.clone().unwrap_or_default()),
            ("Address", e.address.clone().unwrap_or_default()),
            ("Owner", e.employee_full_name.clone().unwrap_or_default()),
            (
                "Status",
                output::paint(&present::equipment_status_badge(e.status.as_ref()), settings.color),
            ),
            ("Added", date(e.date_added)),
            ("Updated", date(e.date_updated)),
            ("Ports", count(e.ports_count)),
            ("IP addresses", count(e.ip_addresses_count)),
            ("Maintenance", count(e.maintenance_count)),
            (
                "Parameters",
                e.technical_params
                    .as_ref()
                    .map(serde_json::Value::to_string)
                    .unwrap_or_default(),
            ),
        ]
    }

    fn badge(e: &Equipment) -> Option<Badge> {
        Some(present::equipment_status_badge(e.status.as_ref()))
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    inventory: &Inventory,
    args: EquipmentArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    match args.command {
        EquipmentCommand::List {
            search,
            status,
            type_id,
            employee,
        } => {
            let filter = EquipmentFilter {
                status: status.map(Into::into),
                type_id,
                employee_id: employee,
            };
            crud::list::<EquipmentSchema>(inventory, search.search, filter, settings).await
        }

        EquipmentCommand::SetStatus { id, status } => {
            let mut page = crud::reload::<EquipmentSchema>(inventory, settings).await?;
            let outcome = page.set_status(id, status.into()).await?;
            crud::finish_outcome(outcome, id, &mut page, settings)
        }

        EquipmentCommand::ValidateParams { json } => {
            let raw = util::arg_or_stdin(json)?;
            let parsed = validate::technical_params("technicalParams", &raw).map_err(|e| {
                CliError::Validation {
                    field: e.field.into(),
                    reason: e.reason,
                }
            })?;
            let pretty = match parsed {
                Some(value) => serde_json::to_string_pretty(&value)?,
                None => "(empty)".into(),
            };
            output::print_output(&pretty, settings.quiet);
            Ok(())
        }

        EquipmentCommand::Crud(cmd) => crud::handle::<EquipmentSchema>(inventory, cmd, settings).await,
    }
}
