//! IP address command handlers.

use tabled::Tabled;

use netequip_core::present::{self, Badge};
use netequip_core::{Inventory, IpAddress, IpAddressFilter, IpAddressSchema};

use crate::cli::{IpsArgs, IpsCommand};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::crud::{self, Resource};

#[derive(Tabled)]
pub struct IpAddressRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Mask")]
    mask: String,
    #[tabled(rename = "Gateway")]
    gateway: String,
    #[tabled(rename = "Network")]
    network: String,
    #[tabled(rename = "Equipment")]
    equipment: String,
    #[tabled(rename = "Primary")]
    primary: String,
}

impl Resource for IpAddressSchema {
    type Row = IpAddressRow;

    const LIST_COMMAND: &'static str = "ips list";
    const BADGE_COLUMN: &'static str = "Primary";

    fn row(ip: &IpAddress, settings: &Settings) -> IpAddressRow {
        IpAddressRow {
            id: ip.id,
            address: ip.ip_address.clone(),
            mask: ip.subnet_mask.clone().unwrap_or_default(),
            gateway: ip.gateway.clone().unwrap_or_default(),
            network: ip.network_type.clone().unwrap_or_default(),
            equipment: ip.equipment_name.clone().unwrap_or_default(),
            primary: output::paint(&present::primary_badge(ip), settings.color),
        }
    }

    fn detail(ip: &IpAddress, settings: &Settings) -> Vec<(&'static str, String)> {
        vec![
            ("ID", ip.id.to_string()),
            ("Address", ip.ip_address.clone()),
            ("Subnet mask", ip.subnet_mask.clone().unwrap_or_default()),
            ("Gateway", ip.gateway.clone().unwrap_or_default()),
            ("Network type", ip.network_type.clone().unwrap_or_default()),
            ("Equipment", ip.equipment_name.clone().unwrap_or_default()),
            ("Primary", output::paint(&present::primary_badge(ip), settings.color)),
            (
                "Assigned",
                ip.assigned_date
                    .map(|d| present::format_date(d, settings.display.locale))
                    .unwrap_or_default(),
            ),
        ]
    }

    fn badge(ip: &IpAddress) -> Option<Badge> {
        Some(present::primary_badge(ip))
    }
}

pub async fn handle(inventory: &Inventory, args: IpsArgs, settings: &Settings) -> Result<(), CliError> {
    match args.command {
        IpsCommand::List {
            search,
            equipment,
            network_type,
            primary,
        } => {
            let filter = IpAddressFilter {
                equipment_id: equipment,
                network_type,
                primary,
            };
            crud::list::<IpAddressSchema>(inventory, search.search, filter, settings).await
        }

        IpsCommand::SetPrimary { id } => {
            let mut page = crud::reload::<IpAddressSchema>(inventory, settings).await?;
            let outcome = page.set_primary(id).await?;
            crud::finish_outcome(outcome, id, &mut page, settings)
        }

        IpsCommand::UnsetPrimary { id } => {
            let mut page = crud::reload::<IpAddressSchema>(inventory, settings).await?;
            let outcome = page.unset_primary(id).await?;
            crud::finish_outcome(outcome, id, &mut page, settings)
        }

        IpsCommand::Crud(cmd) => crud::handle::<IpAddressSchema>(inventory, cmd, settings).await,
    }
}
