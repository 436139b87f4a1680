//! Handlers shared by every entity group: list, get, create, update,
//! delete, stats, facets, fields.

use std::borrow::Cow;

use serde::Serialize;
use tabled::Tabled;

use netequip_core::present::{Badge, escape_html};
use netequip_core::{
    CoreError, EntityPage, EntitySchema, FormFields, Id, Inventory, Outcome, SubmitOutcome,
    Summary,
};

use crate::cli::{CrudCommand, FieldArgs};
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

use super::util;

// ── Resource ────────────────────────────────────────────────────────

/// How one entity is shown on the command line.
pub trait Resource: EntitySchema {
    type Row: Tabled;

    /// The `netequip ...` list command, for hints.
    const LIST_COMMAND: &'static str;

    /// Column that renders as a badge in HTML output.
    const BADGE_COLUMN: &'static str = "Status";

    fn row(record: &Self::Record, settings: &Settings) -> Self::Row;

    fn detail(record: &Self::Record, settings: &Settings) -> Vec<(&'static str, String)>;

    fn badge(_record: &Self::Record) -> Option<Badge> {
        None
    }
}

fn not_found<R: Resource>(id: Id) -> CliError {
    CliError::NotFound {
        resource: R::TITLE.into(),
        id,
        list_command: R::LIST_COMMAND.into(),
    }
}

/// Turn a server 404 for `id` into a hint-bearing not-found error.
pub fn map_not_found<R: Resource>(id: Id) -> impl FnOnce(CoreError) -> CliError {
    move |err| match err {
        CoreError::NotFound { .. } => not_found::<R>(id),
        other => other.into(),
    }
}

/// Map a skipped action to an error or a message.
pub fn finish_outcome<R: Resource>(
    outcome: Outcome,
    id: Id,
    page: &mut EntityPage<R>,
    settings: &Settings,
) -> Result<(), CliError> {
    match outcome {
        Outcome::Done => {
            util::flush_notices(page, settings);
            Ok(())
        }
        Outcome::Declined => {
            if !settings.quiet {
                eprintln!("Cancelled");
            }
            Ok(())
        }
        Outcome::NotInCache => Err(not_found::<R>(id)),
    }
}

// ── Rendering ───────────────────────────────────────────────────────

/// HTML table of `records`: escaped cells, the badge column as a badge.
pub fn html_table<R: Resource>(records: &[&R::Record], settings: &Settings) -> String {
    let plain = Settings {
        color: false,
        ..settings.clone()
    };
    let headers: Vec<String> = R::Row::headers().into_iter().map(Cow::into_owned).collect();
    let badge_at = headers.iter().position(|h| h == R::BADGE_COLUMN);

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            let badge = R::badge(record);
            R::row(record, &plain)
                .fields()
                .iter()
                .enumerate()
                .map(|(i, cell)| match (&badge, badge_at) {
                    (Some(badge), Some(at)) if at == i => badge.to_html(),
                    _ => escape_html(cell),
                })
                .collect()
        })
        .collect();

    output::render_html_table(&headers, &rows)
}

/// Render records in the selected format and print them.
pub fn print_records<R: Resource>(records: &[&R::Record], settings: &Settings) -> Result<(), CliError> {
    let out = output::render_list(
        settings.output,
        records,
        |r| R::row(r, settings),
        |r| R::id(r).to_string(),
        |items| html_table::<R>(items, settings),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}

pub fn print_owned<R: Resource>(records: &[R::Record], settings: &Settings) -> Result<(), CliError> {
    let refs: Vec<&R::Record> = records.iter().collect();
    print_records::<R>(&refs, settings)
}

pub fn print_record<R: Resource>(record: &R::Record, settings: &Settings) -> Result<(), CliError> {
    let out = output::render_single(
        settings.output,
        record,
        |r| R::detail(r, settings),
        |r| R::id(r).to_string(),
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}

// ── Loading ─────────────────────────────────────────────────────────

/// Load the collection and its references behind a spinner.
pub async fn load<R: Resource>(
    inventory: &Inventory,
    settings: &Settings,
) -> Result<EntityPage<R>, CliError> {
    let spinner = util::spinner(settings, &format!("Loading {}...", R::PATH));
    let mut page = inventory.page::<R>();
    let result = page.load().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result?;
    util::flush_notices(&mut page, settings);
    Ok(page)
}

/// Fetch only the primary collection; enough for actions on loaded ids.
pub async fn reload<R: Resource>(
    inventory: &Inventory,
    settings: &Settings,
) -> Result<EntityPage<R>, CliError> {
    let spinner = util::spinner(settings, &format!("Loading {}...", R::PATH));
    let mut page = inventory.page::<R>();
    let result = page.reload().await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result?;
    Ok(page)
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list<R: Resource>(
    inventory: &Inventory,
    search: Option<String>,
    filter: R::Filter,
    settings: &Settings,
) -> Result<(), CliError> {
    let mut page = load::<R>(inventory, settings).await?;
    if let Some(search) = search {
        page.set_search(search);
    }
    page.set_filter(filter);
    print_records::<R>(&page.visible(), settings)
}

async fn submit<R: Resource>(page: &mut EntityPage<R>, settings: &Settings) -> Result<(), CliError> {
    match page.submit().await? {
        SubmitOutcome::Saved(record) => {
            util::flush_notices(page, settings);
            print_record::<R>(&record, settings)
        }
        SubmitOutcome::Invalid(invalid) => Err(CliError::Validation {
            field: invalid.field.into(),
            reason: invalid.reason,
        }),
        SubmitOutcome::Duplicate(message) => Err(CliError::Conflict { message }),
    }
}

async fn create<R: Resource>(
    inventory: &Inventory,
    args: &FieldArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    let fields = util::parse_fields(args)?;
    let mut page = inventory.page::<R>();
    page.open_create();
    util::apply_fields(&mut page, &fields)?;
    submit(&mut page, settings).await
}

async fn update<R: Resource>(
    inventory: &Inventory,
    id: Id,
    args: &FieldArgs,
    settings: &Settings,
) -> Result<(), CliError> {
    let fields = util::parse_fields(args)?;
    let mut page = inventory.page::<R>();
    page.open_edit(id).await.map_err(map_not_found::<R>(id))?;
    util::apply_fields(&mut page, &fields)?;
    submit(&mut page, settings).await
}

async fn delete<R: Resource>(
    inventory: &Inventory,
    id: Id,
    settings: &Settings,
) -> Result<(), CliError> {
    util::ensure_interactive(settings, "delete", "--yes to confirm")?;
    let mut page = reload::<R>(inventory, settings).await?;
    let outcome = page.delete(id, &util::Prompter::new(settings)).await?;
    finish_outcome(outcome, id, &mut page, settings)
}

async fn get<R: Resource>(inventory: &Inventory, id: Id, settings: &Settings) -> Result<(), CliError> {
    let mut page = inventory.page::<R>();
    let record = page.open_detail(id).await.map_err(map_not_found::<R>(id))?;
    print_record::<R>(record, settings)
}

async fn stats<R: Resource>(inventory: &Inventory, settings: &Settings) -> Result<(), CliError> {
    let page = load::<R>(inventory, settings).await?;
    let stats = page.stats();
    let out = output::render_single(
        settings.output,
        &stats,
        |s| s.entries(&settings.display),
        |s| {
            s.entries(&settings.display)
                .into_iter()
                .map(|(label, value)| format!("{label}\t{value}"))
                .collect::<Vec<_>>()
                .join("\n")
        },
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}

#[derive(Clone, Serialize, Tabled)]
struct FacetRow {
    #[tabled(rename = "Filter")]
    filter: &'static str,
    #[tabled(rename = "Value")]
    value: String,
    #[tabled(rename = "Label")]
    label: String,
}

async fn facets<R: Resource>(inventory: &Inventory, settings: &Settings) -> Result<(), CliError> {
    let page = load::<R>(inventory, settings).await?;
    let rows: Vec<FacetRow> = page
        .facets()
        .into_iter()
        .flat_map(|facet| {
            let filter = facet.name;
            facet.options.into_iter().map(move |option| FacetRow {
                filter,
                value: option.value,
                label: option.label,
            })
        })
        .collect();

    let out = output::render_list(
        settings.output,
        &rows,
        FacetRow::clone,
        |r| format!("{}={}", r.filter, r.value),
        |items| {
            let headers = FacetRow::headers().into_iter().map(Cow::into_owned).collect::<Vec<_>>();
            let cells: Vec<Vec<String>> = items
                .iter()
                .map(|r| r.fields().iter().map(|c| escape_html(c)).collect())
                .collect();
            output::render_html_table(&headers, &cells)
        },
    )?;
    output::print_output(&out, settings.quiet);
    Ok(())
}

fn fields<R: Resource>(settings: &Settings) {
    output::print_output(&<R::Form as FormFields>::FIELDS.join("\n"), settings.quiet);
}

/// Dispatch the subcommands every entity shares.
pub async fn handle<R: Resource>(
    inventory: &Inventory,
    cmd: CrudCommand,
    settings: &Settings,
) -> Result<(), CliError> {
    match cmd {
        CrudCommand::Get { id } => get::<R>(inventory, id, settings).await,
        CrudCommand::Create(args) => create::<R>(inventory, &args, settings).await,
        CrudCommand::Update { id, fields } => update::<R>(inventory, id, &fields, settings).await,
        CrudCommand::Delete { id } => delete::<R>(inventory, id, settings).await,
        CrudCommand::Stats => stats::<R>(inventory, settings).await,
        CrudCommand::Facets => facets::<R>(inventory, settings).await,
        CrudCommand::Fields => {
            fields::<R>(settings);
            Ok(())
        }
    }
}
