//! Maintenance history command handlers.

use chrono::{Local, NaiveDate};
use tabled::Tabled;

use netequip_core::entities::maintenance::DATE_RANGES;
use netequip_core::present::{self, Badge};
use netequip_core::{
    Inventory, MaintenanceFilter, MaintenanceRecord, MaintenanceSchema, MaintenanceType,
};

use crate::cli::{MaintenanceArgs, MaintenanceCommand, MaintenanceTypeArg};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::crud::{self, Resource};
use super::util;

#[derive(Tabled)]
pub struct MaintenanceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Equipment")]
    equipment: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Performed by")]
    performed_by: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Next")]
    next: String,
}

impl From<MaintenanceTypeArg> for MaintenanceType {
    fn from(arg: MaintenanceTypeArg) -> Self {
        match arg {
            MaintenanceTypeArg::Routine => Self::Routine,
            MaintenanceTypeArg::Repair => Self::Repair,
            MaintenanceTypeArg::Upgrade => Self::Upgrade,
            MaintenanceTypeArg::Emergency => Self::Emergency,
            MaintenanceTypeArg::Preventive => Self::Preventive,
        }
    }
}

fn cost(m: &MaintenanceRecord, settings: &Settings) -> String {
    m.cost
        .map(|c| present::format_currency(c, &settings.display.currency, settings.display.locale))
        .unwrap_or_default()
}

/// Planned date, flagged once it has passed.
fn next_date(m: &MaintenanceRecord, settings: &Settings) -> String {
    let Some(next) = m.next_maintenance_date else {
        return String::new();
    };
    let text = present::format_date(next, settings.display.locale);
    if present::is_overdue(Some(next), Local::now().naive_local()) {
        format!("{text} (overdue)")
    } else {
        text
    }
}

impl Resource for MaintenanceSchema {
    type Row = MaintenanceRow;

    const LIST_COMMAND: &'static str = "maintenance list";
    const BADGE_COLUMN: &'static str = "Type";

    fn row(m: &MaintenanceRecord, settings: &Settings) -> MaintenanceRow {
        MaintenanceRow {
            id: m.id,
            date: m
                .date
                .map(|d| present::format_datetime(d, settings.display.locale))
                .unwrap_or_default(),
            equipment: m.equipment_name.clone().unwrap_or_default(),
            kind: output::paint(&present::maintenance_type_badge(m.kind.as_ref()), settings.color),
            description: present::truncate(m.description.as_deref().unwrap_or_default(), 50),
            performed_by: m.performed_by_name.clone().unwrap_or_default(),
            cost: cost(m, settings),
            next: next_date(m, settings),
        }
    }

    fn detail(m: &MaintenanceRecord, settings: &Settings) -> Vec<(&'static str, String)> {
        vec![
            ("ID", m.id.to_string()),
            (
                "Date",
                m.date
                    .map(|d| present::format_datetime(d, settings.display.locale))
                    .unwrap_or_default(),
            ),
            ("Equipment", m.equipment_name.clone().unwrap_or_default()),
            (
                "Type",
                output::paint(&present::maintenance_type_badge(m.kind.as_ref()), settings.color),
            ),
            ("Description", m.description.clone().unwrap_or_default()),
            ("Performed by", m.performed_by_name.clone().unwrap_or_default()),
            ("Cost", cost(m, settings)),
            ("Next maintenance", next_date(m, settings)),
        ]
    }

    fn badge(m: &MaintenanceRecord) -> Option<Badge> {
        Some(present::maintenance_type_badge(m.kind.as_ref()))
    }
}

fn parse_days(raw: &str) -> Result<u32, CliError> {
    raw.parse::<u32>()
        .ok()
        .filter(|days| DATE_RANGES.contains(days))
        .ok_or_else(|| CliError::Validation {
            field: "within-days".into(),
            reason: format!("expected one of 7, 30, 90, 365, got '{raw}'"),
        })
}

fn parse_date(raw: &str) -> Result<NaiveDate, CliError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: "date".into(),
        reason: format!("expected YYYY-MM-DD, got '{raw}'"),
    })
}

pub async fn handle(
    inventory: &Inventory,
    args: MaintenanceArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    match args.command {
        MaintenanceCommand::List {
            search,
            equipment,
            kind,
            performed_by,
            within_days,
        } => {
            let filter = MaintenanceFilter {
                equipment_id: equipment,
                kind: kind.map(Into::into),
                performed_by_id: performed_by,
                within_days: within_days.as_deref().map(parse_days).transpose()?,
            };
            crud::list::<MaintenanceSchema>(inventory, search.search, filter, settings).await
        }

        MaintenanceCommand::ScheduleNext { equipment, date } => {
            let date = parse_date(&date)?;
            let mut page = crud::reload::<MaintenanceSchema>(inventory, settings).await?;
            page.schedule_next(equipment, date).await?;
            util::flush_notices(&mut page, settings);
            Ok(())
        }

        MaintenanceCommand::Crud(cmd) => {
            crud::handle::<MaintenanceSchema>(inventory, cmd, settings).await
        }
    }
}
