//! Command dispatch: bridges CLI args -> page controllers -> output formatting.

pub mod config_cmd;
pub mod crud;
pub mod employees;
pub mod equipment;
pub mod ips;
pub mod maintenance;
pub mod ports;
pub mod types;
pub mod util;

use netequip_core::Inventory;

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

/// Dispatch an API-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    inventory: &Inventory,
    settings: &Settings,
) -> Result<(), CliError> {
    match cmd {
        Command::Equipment(args) => equipment::handle(inventory, args, settings).await,
        Command::Types(args) => types::handle(inventory, args, settings).await,
        Command::Ports(args) => ports::handle(inventory, args, settings).await,
        Command::Ips(args) => ips::handle(inventory, args, settings).await,
        Command::Employees(args) => employees::handle(inventory, args, settings).await,
        Command::Maintenance(args) => maintenance::handle(inventory, args, settings).await,
        Command::Config(_) | Command::Completions(_) => Err(CliError::Internal(
            "config and completions do not reach the API".into(),
        )),
    }
}
