//! Employee command handlers.

use tabled::Tabled;

use netequip_core::{Employee, EmployeeFilter, EmployeeSchema, Inventory};

use crate::cli::{EmployeesArgs, EmployeesCommand};
use crate::config::Settings;
use crate::error::CliError;

use super::crud::{self, Resource};

#[derive(Tabled)]
pub struct EmployeeRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Full name")]
    full_name: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Email")]
    email: String,
}

impl Resource for EmployeeSchema {
    type Row = EmployeeRow;

    const LIST_COMMAND: &'static str = "employees list";

    fn row(e: &Employee, _settings: &Settings) -> EmployeeRow {
        EmployeeRow {
            id: e.id,
            full_name: e.full_name.clone(),
            position: e.position.clone().unwrap_or_default(),
            email: e.email.clone().unwrap_or_default(),
        }
    }

    fn detail(e: &Employee, _settings: &Settings) -> Vec<(&'static str, String)> {
        vec![
            ("ID", e.id.to_string()),
            ("Full name", e.full_name.clone()),
            ("Position", e.position.clone().unwrap_or_default()),
            ("Email", e.email.clone().unwrap_or_default()),
        ]
    }
}

pub async fn handle(
    inventory: &Inventory,
    args: EmployeesArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    match args.command {
        EmployeesCommand::List { search, position } => {
            let filter = EmployeeFilter { position };
            crud::list::<EmployeeSchema>(inventory, search.search, filter, settings).await
        }

        EmployeesCommand::Search { name } => {
            let found = inventory
                .page::<EmployeeSchema>()
                .search_by_name(&name)
                .await?;
            crud::print_owned::<EmployeeSchema>(&found, settings)
        }

        EmployeesCommand::Crud(cmd) => crud::handle::<EmployeeSchema>(inventory, cmd, settings).await,
    }
}
