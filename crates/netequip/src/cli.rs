//! Clap derive structures for the `netequip` CLI.
//!
//! Defines the command tree, global flags, and shared argument types.
//! Only clap and clap_complete may be used here: build.rs includes this
//! file to render man pages.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// netequip -- network equipment inventory from the command line
#[derive(Debug, Parser)]
#[command(
    name = "netequip",
    version,
    about = "Manage a network equipment inventory from the command line",
    long_about = "Browse and edit equipment, equipment types, device ports, IP addresses,\n\
        employees and maintenance history stored behind the inventory REST API.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "NETEQUIP_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Inventory API root (overrides profile)
    #[arg(long, short = 'a', env = "NETEQUIP_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Output format [default: table]
    #[arg(long, short = 'o', env = "NETEQUIP_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "NETEQUIP_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long, env = "NETEQUIP_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Display locale for dates and money: ru-RU or en-US
    #[arg(long, env = "NETEQUIP_LOCALE", global = true)]
    pub locale: Option<String>,

    /// ISO 4217 currency code for maintenance costs
    #[arg(long, env = "NETEQUIP_CURRENCY", global = true)]
    pub currency: Option<String>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
    /// HTML table fragment with escaped cells and status badges
    Html,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Domain value enums ───────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EquipmentStatusArg {
    Active,
    Inactive,
    Maintenance,
    Retired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PortStatusArg {
    Active,
    Inactive,
    Reserved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConnectionArg {
    /// Linked to another port
    Connected,
    /// Not linked
    Available,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MaintenanceTypeArg {
    Routine,
    Repair,
    Upgrade,
    Emergency,
    Preventive,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage network equipment
    #[command(alias = "eq")]
    Equipment(EquipmentArgs),

    /// Manage equipment types
    #[command(alias = "ty")]
    Types(TypesArgs),

    /// Manage device ports and their connections
    #[command(alias = "pt")]
    Ports(PortsArgs),

    /// Manage IP address assignments
    #[command(alias = "ip")]
    Ips(IpsArgs),

    /// Manage employees
    #[command(alias = "emp")]
    Employees(EmployeesArgs),

    /// Manage maintenance history
    #[command(alias = "mnt")]
    Maintenance(MaintenanceArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Free-text search shared by every list command.
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Case-insensitive text to look for in names, descriptions, addresses
    #[arg(long, short = 's')]
    pub search: Option<String>,
}

/// Form input for create and update.
#[derive(Debug, Args)]
pub struct FieldArgs {
    /// Form field as NAME=VALUE, repeatable (e.g. -f name=core-sw-01)
    #[arg(long = "field", short = 'f', value_name = "NAME=VALUE")]
    pub fields: Vec<String>,

    /// Read fields from a JSON object file; -f values win
    #[arg(long, short = 'F', value_name = "PATH")]
    pub from_file: Option<PathBuf>,
}

/// Subcommands every entity group has.
#[derive(Debug, Subcommand)]
pub enum CrudCommand {
    /// Show one record fetched fresh from the server
    Get {
        /// Record id
        id: i64,
    },

    /// Create a record from form fields
    Create(FieldArgs),

    /// Load a record, change the given fields and save it
    Update {
        /// Record id
        id: i64,

        #[command(flatten)]
        fields: FieldArgs,
    },

    /// Delete a record after confirmation
    #[command(alias = "rm")]
    Delete {
        /// Record id
        id: i64,
    },

    /// Summary counters over the whole collection
    Stats,

    /// Options available to the list filters
    Facets,

    /// Print the form field names accepted by create and update
    Fields,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EQUIPMENT
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EquipmentArgs {
    #[command(subcommand)]
    pub command: EquipmentCommand,
}

#[derive(Debug, Subcommand)]
pub enum EquipmentCommand {
    /// List equipment
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        search: SearchArgs,

        /// Only this status
        #[arg(long, value_enum)]
        status: Option<EquipmentStatusArg>,

        /// Only this equipment type id
        #[arg(long = "type")]
        type_id: Option<i64>,

        /// Only equipment owned by this employee id
        #[arg(long)]
        employee: Option<i64>,
    },

    /// Change the status of a piece of equipment
    SetStatus {
        /// Equipment id
        id: i64,

        #[arg(value_enum)]
        status: EquipmentStatusArg,
    },

    /// Check technical parameters JSON without saving anything
    ValidateParams {
        /// JSON object; read from stdin when omitted
        json: Option<String>,
    },

    #[command(flatten)]
    Crud(CrudCommand),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EQUIPMENT TYPES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct TypesArgs {
    #[command(subcommand)]
    pub command: TypesCommand,
}

#[derive(Debug, Subcommand)]
pub enum TypesCommand {
    /// List equipment types
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        search: SearchArgs,

        /// Only this OSI level
        #[arg(long)]
        osi_level: Option<String>,

        /// Only this manufacturer
        #[arg(long)]
        manufacturer: Option<String>,
    },

    /// Server-side search by manufacturer and model
    Search {
        #[arg(long, default_value = "")]
        manufacturer: String,

        #[arg(long, default_value = "")]
        model: String,
    },

    #[command(flatten)]
    Crud(CrudCommand),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICE PORTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct PortsArgs {
    #[command(subcommand)]
    pub command: PortsCommand,
}

#[derive(Debug, Subcommand)]
pub enum PortsCommand {
    /// List device ports
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        search: SearchArgs,

        /// Only ports of this equipment id
        #[arg(long)]
        equipment: Option<i64>,

        /// Only this status
        #[arg(long, value_enum)]
        status: Option<PortStatusArg>,

        /// Only this port type
        #[arg(long)]
        port_type: Option<String>,

        /// Only connected or only available ports
        #[arg(long, value_enum)]
        connection: Option<ConnectionArg>,
    },

    /// Link a port to a port on another piece of equipment
    Connect {
        /// Source port id
        port: i64,

        /// Target equipment id; prompted for when omitted
        #[arg(long)]
        to_equipment: Option<i64>,

        /// Target port id; prompted for when omitted
        #[arg(long)]
        to_port: Option<i64>,
    },

    /// Remove a port's link after confirmation
    Disconnect {
        /// Port id
        port: i64,
    },

    /// Ports of a piece of equipment that are not connected yet
    Available {
        /// Equipment id
        equipment: i64,
    },

    /// All ports of a piece of equipment
    ForEquipment {
        /// Equipment id
        equipment: i64,
    },

    /// Change the status of a port
    SetStatus {
        /// Port id
        port: i64,

        #[arg(value_enum)]
        status: PortStatusArg,
    },

    #[command(flatten)]
    Crud(CrudCommand),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  IP ADDRESSES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct IpsArgs {
    #[command(subcommand)]
    pub command: IpsCommand,
}

#[derive(Debug, Subcommand)]
pub enum IpsCommand {
    /// List IP addresses
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        search: SearchArgs,

        /// Only addresses of this equipment id
        #[arg(long)]
        equipment: Option<i64>,

        /// Only this network type
        #[arg(long)]
        network_type: Option<String>,

        /// Only primary (true) or only secondary (false) addresses
        #[arg(long)]
        primary: Option<bool>,
    },

    /// Make an address the primary one of its equipment
    SetPrimary {
        /// IP address id
        id: i64,
    },

    /// Clear the primary flag of an address
    UnsetPrimary {
        /// IP address id
        id: i64,
    },

    #[command(flatten)]
    Crud(CrudCommand),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  EMPLOYEES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct EmployeesArgs {
    #[command(subcommand)]
    pub command: EmployeesCommand,
}

#[derive(Debug, Subcommand)]
pub enum EmployeesCommand {
    /// List employees
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        search: SearchArgs,

        /// Only this position
        #[arg(long)]
        position: Option<String>,
    },

    /// Server-side search by name fragment
    Search {
        /// Part of the full name
        name: String,
    },

    #[command(flatten)]
    Crud(CrudCommand),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  MAINTENANCE
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct MaintenanceArgs {
    #[command(subcommand)]
    pub command: MaintenanceCommand,
}

#[derive(Debug, Subcommand)]
pub enum MaintenanceCommand {
    /// List maintenance records
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        search: SearchArgs,

        /// Only records for this equipment id
        #[arg(long)]
        equipment: Option<i64>,

        /// Only this maintenance type
        #[arg(long = "type", value_enum)]
        kind: Option<MaintenanceTypeArg>,

        /// Only work performed by this employee id
        #[arg(long)]
        performed_by: Option<i64>,

        /// Only records from the last N days (7, 30, 90 or 365)
        #[arg(long, value_parser = ["7", "30", "90", "365"])]
        within_days: Option<String>,
    },

    /// Plan the next maintenance date for a piece of equipment
    ScheduleNext {
        /// Equipment id
        equipment: i64,

        /// Date as YYYY-MM-DD
        date: String,
    },

    #[command(flatten)]
    Crud(CrudCommand),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create the config file with guided setup
    Init,

    /// Display the current configuration
    Show,

    /// Print the config file location
    Path,

    /// Set the API root of a profile, creating the profile if needed
    SetUrl {
        /// API root, e.g. http://inventory.local:8080/api
        url: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
