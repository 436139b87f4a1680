//! Equipment type command handlers.

use tabled::Tabled;

use netequip_core::present;
use netequip_core::{EquipmentType, EquipmentTypeFilter, EquipmentTypeSchema, Inventory};

use crate::cli::{TypesArgs, TypesCommand};
use crate::config::Settings;
use crate::error::CliError;

use super::crud::{self, Resource};

#[derive(Tabled)]
pub struct EquipmentTypeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Type")]
    type_name: String,
    #[tabled(rename = "Manufacturer")]
    manufacturer: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Ports")]
    ports: String,
    #[tabled(rename = "Connection")]
    connection: String,
    #[tabled(rename = "OSI")]
    osi_level: String,
    #[tabled(rename = "Description")]
    description: String,
}

impl Resource for EquipmentTypeSchema {
    type Row = EquipmentTypeRow;

    const LIST_COMMAND: &'static str = "types list";

    fn row(t: &EquipmentType, _settings: &Settings) -> EquipmentTypeRow {
        EquipmentTypeRow {
            id: t.id,
            type_name: t.type_name.clone(),
            manufacturer: t.manufacturer.clone().unwrap_or_default(),
            model: t.model.clone().unwrap_or_default(),
            ports: t.default_port_count.map(|n| n.to_string()).unwrap_or_default(),
            connection: t.connection_type.clone().unwrap_or_default(),
            osi_level: t.osi_level.clone().unwrap_or_default(),
            description: present::truncate(t.description.as_deref().unwrap_or_default(), 50),
        }
    }

    fn detail(t: &EquipmentType, _settings: &Settings) -> Vec<(&'static str, String)> {
        vec![
            ("ID", t.id.to_string()),
            ("Type", t.type_name.clone()),
            ("Manufacturer", t.manufacturer.clone().unwrap_or_default()),
            ("Model", t.model.clone().unwrap_or_default()),
            (
                "Default ports",
                t.default_port_count.map(|n| n.to_string()).unwrap_or_default(),
            ),
            ("Connection", t.connection_type.clone().unwrap_or_default()),
            ("OSI level", t.osi_level.clone().unwrap_or_default()),
            ("Description", t.description.clone().unwrap_or_default()),
        ]
    }
}

pub async fn handle(
    inventory: &Inventory,
    args: TypesArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    match args.command {
        TypesCommand::List {
            search,
            osi_level,
            manufacturer,
        } => {
            let filter = EquipmentTypeFilter {
                osi_level,
                manufacturer,
            };
            crud::list::<EquipmentTypeSchema>(inventory, search.search, filter, settings).await
        }

        TypesCommand::Search {
            manufacturer,
            model,
        } => {
            let page = inventory.page::<EquipmentTypeSchema>();
            let found = page
                .search_by_manufacturer_model(&manufacturer, &model)
                .await?
                .ok_or_else(|| CliError::RemoteNotFound {
                    message: format!(
                        "No equipment type for manufacturer '{manufacturer}' and model '{model}'"
                    ),
                })?;
            crud::print_owned::<EquipmentTypeSchema>(&[found], settings)
        }

        TypesCommand::Crud(cmd) => {
            crud::handle::<EquipmentTypeSchema>(inventory, cmd, settings).await
        }
    }
}
