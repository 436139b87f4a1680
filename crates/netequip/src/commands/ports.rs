//! Device port command handlers.

use tabled::Tabled;

use netequip_core::present::{self, Badge};
use netequip_core::{
    Connection, DevicePort, DevicePortFilter, DevicePortSchema, Id, Inventory, PortStatus,
};

use crate::cli::{ConnectionArg, PortStatusArg, PortsArgs, PortsCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::crud::{self, Resource};
use super::util;

#[derive(Tabled)]
pub struct DevicePortRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Equipment")]
    equipment: String,
    #[tabled(rename = "Port")]
    number: String,
    #[tabled(rename = "Type")]
    port_type: String,
    #[tabled(rename = "Speed")]
    speed: String,
    #[tabled(rename = "Connected to")]
    connected_to: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<PortStatusArg> for PortStatus {
    fn from(arg: PortStatusArg) -> Self {
        match arg {
            PortStatusArg::Active => Self::Active,
            PortStatusArg::Inactive => Self::Inactive,
            PortStatusArg::Reserved => Self::Reserved,
        }
    }
}

impl From<ConnectionArg> for Connection {
    fn from(arg: ConnectionArg) -> Self {
        match arg {
            ConnectionArg::Connected => Self::Connected,
            ConnectionArg::Available => Self::Available,
        }
    }
}

fn port_number(p: &DevicePort) -> String {
    p.port_number.map(|n| n.to_string()).unwrap_or_default()
}

impl Resource for DevicePortSchema {
    type Row = DevicePortRow;

    const LIST_COMMAND: &'static str = "ports list";

    fn row(p: &DevicePort, settings: &Settings) -> DevicePortRow {
        DevicePortRow {
            id: p.id,
            equipment: p.equipment_name.clone().unwrap_or_default(),
            number: port_number(p),
            port_type: p.port_type.clone().unwrap_or_default(),
            speed: p.speed.clone().unwrap_or_default(),
            connected_to: present::connection_summary(p).unwrap_or_default(),
            status: output::paint(&present::port_status_badge(p.status.as_ref()), settings.color),
        }
    }

    fn detail(p: &DevicePort, settings: &Settings) -> Vec<(&'static str, String)> {
        vec![
            ("ID", p.id.to_string()),
            ("Equipment", p.equipment_name.clone().unwrap_or_default()),
            ("Port", port_number(p)),
            ("Type", p.port_type.clone().unwrap_or_default()),
            ("Speed", p.speed.clone().unwrap_or_default()),
            (
                "Status",
                output::paint(&present::port_status_badge(p.status.as_ref()), settings.color),
            ),
            ("Connected to", present::connection_summary(p).unwrap_or_default()),
            ("Description", p.description.clone().unwrap_or_default()),
        ]
    }

    fn badge(p: &DevicePort) -> Option<Badge> {
        Some(present::port_status_badge(p.status.as_ref()))
    }
}

fn port_choice(p: &DevicePort) -> String {
    match &p.port_type {
        Some(kind) => format!("Port {} ({kind})", port_number(p)),
        None => format!("Port {}", port_number(p)),
    }
}

/// Fill in the connection target, prompting for whatever was not given.
async fn connect(
    inventory: &Inventory,
    port: Id,
    to_equipment: Option<Id>,
    to_port: Option<Id>,
    settings: &Settings,
) -> Result<(), CliError> {
    if to_equipment.is_none() || to_port.is_none() {
        util::ensure_interactive(settings, "ports connect", "--to-equipment and --to-port")?;
    }

    let mut page = crud::load::<DevicePortSchema>(inventory, settings).await?;

    let equipment_id = match to_equipment {
        Some(id) => id,
        None => {
            let candidates = page
                .connect_candidates(port)
                .ok_or_else(|| CliError::NotFound {
                    resource: "Port".into(),
                    id: port,
                    list_command: DevicePortSchema::LIST_COMMAND.into(),
                })?;
            if candidates.is_empty() {
                return Err(CliError::Validation {
                    field: "to-equipment".into(),
                    reason: "no other equipment to connect to".into(),
                });
            }
            let labels: Vec<String> = candidates.iter().map(|c| c.label.clone()).collect();
            let picked = util::select("Connect to equipment", &labels)?;
            candidates[picked]
                .value
                .parse()
                .map_err(|_| CliError::Internal("bad equipment id in list".into()))?
        }
    };

    let target_port = match to_port {
        Some(id) => id,
        None => {
            let available = page.available_ports(equipment_id).await?;
            if available.is_empty() {
                return Err(CliError::Conflict {
                    message: format!("Equipment {equipment_id} has no available ports"),
                });
            }
            let labels: Vec<String> = available.iter().map(port_choice).collect();
            let picked = util::select("Target port", &labels)?;
            available[picked].id
        }
    };

    let outcome = page.connect(port, equipment_id, target_port).await?;
    crud::finish_outcome(outcome, port, &mut page, settings)
}

pub async fn handle(
    inventory: &Inventory,
    args: PortsArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    match args.command {
        PortsCommand::List {
            search,
            equipment,
            status,
            port_type,
            connection,
        } => {
            let filter = DevicePortFilter {
                equipment_id: equipment,
                status: status.map(Into::into),
                port_type,
                connection: connection.map(Into::into),
            };
            crud::list::<DevicePortSchema>(inventory, search.search, filter, settings).await
        }

        PortsCommand::Connect {
            port,
            to_equipment,
            to_port,
        } => connect(inventory, port, to_equipment, to_port, settings).await,

        PortsCommand::Disconnect { port } => {
            util::ensure_interactive(settings, "disconnect", "--yes to confirm")?;
            let mut page = crud::reload::<DevicePortSchema>(inventory, settings).await?;
            let outcome = page
                .disconnect(port, &util::Prompter::new(settings))
                .await?;
            crud::finish_outcome(outcome, port, &mut page, settings)
        }

        PortsCommand::Available { equipment } => {
            let ports = inventory
                .page::<DevicePortSchema>()
                .available_ports(equipment)
                .await?;
            crud::print_owned::<DevicePortSchema>(&ports, settings)
        }

        PortsCommand::ForEquipment { equipment } => {
            let ports = inventory
                .page::<DevicePortSchema>()
                .ports_for_equipment(equipment)
                .await?;
            crud::print_owned::<DevicePortSchema>(&ports, settings)
        }

        PortsCommand::SetStatus { port, status } => {
            let mut page = crud::reload::<DevicePortSchema>(inventory, settings).await?;
            let outcome = page.set_status(port, status.into()).await?;
            crud::finish_outcome(outcome, port, &mut page, settings)
        }

        PortsCommand::Crud(cmd) => crud::handle::<DevicePortSchema>(inventory, cmd, settings).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn choice_names_port_and_type() {
        let port: DevicePort =
            serde_json::from_value(json!({ "id": 9, "portNumber": 3, "portType": "SFP+" })).unwrap();
        assert_eq!(port_choice(&port), "Port 3 (SFP+)");
    }
}
