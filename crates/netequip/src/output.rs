//! Output formatting: table, JSON, YAML, plain, HTML.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one id per line, HTML emits
//! a table fragment whose cells are escaped.

use std::fmt::Write as _;
use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use serde::Serialize;
use tabled::{Table, Tabled, settings::Style};

use netequip_core::present::{Badge, Tone, escape_html};
use netequip_core::{Notice, NoticeLevel};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Badge label, colored by tone when enabled.
pub fn paint(badge: &Badge, color: bool) -> String {
    if !color {
        return badge.label.clone();
    }
    let label = badge.label.as_str();
    match badge.tone {
        Tone::Success => label.green().to_string(),
        Tone::Warning => label.yellow().to_string(),
        Tone::Danger => label.red().to_string(),
        Tone::Info => label.cyan().to_string(),
        Tone::Secondary => label.dimmed().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` rows from `to_row`
/// - `json` / `json-compact` / `yaml`: serializes the original data
/// - `plain`: one `id_fn` value per line
/// - `html`: whatever `to_html` builds from the items
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
    to_html: impl Fn(&[T]) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
    R: Tabled,
{
    Ok(match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            render_table(&rows)
        }
        OutputFormat::Json => render_json(data, false)?,
        OutputFormat::JsonCompact => render_json(data, true)?,
        OutputFormat::Yaml => render_yaml(data)?,
        OutputFormat::Plain => data.iter().map(&id_fn).collect::<Vec<_>>().join("\n"),
        OutputFormat::Html => to_html(data),
    })
}

/// Render a single item. Table and HTML show the label/value pairs from
/// `detail_fn`; structured formats serialize the item itself.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> Vec<(&'static str, String)>,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: Serialize,
{
    Ok(match format {
        OutputFormat::Table => render_pairs(&detail_fn(data)),
        OutputFormat::Json => render_json(data, false)?,
        OutputFormat::JsonCompact => render_json(data, true)?,
        OutputFormat::Yaml => render_yaml(data)?,
        OutputFormat::Plain => id_fn(data),
        OutputFormat::Html => render_html_pairs(&detail_fn(data)),
    })
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{output}");
}

/// Print a controller notice to stderr. Quiet mode keeps errors only.
pub fn print_notice(notice: &Notice, quiet: bool, color: bool) {
    let (marker, show) = match notice.level {
        NoticeLevel::Success => ("✓", !quiet),
        NoticeLevel::Warning => ("!", !quiet),
        NoticeLevel::Error => ("✗", true),
    };
    if !show {
        return;
    }
    let line = format!("{marker} {}", notice.message);
    if color {
        match notice.level {
            NoticeLevel::Success => eprintln!("{}", line.green()),
            NoticeLevel::Warning => eprintln!("{}", line.yellow()),
            NoticeLevel::Error => eprintln!("{}", line.red()),
        }
    } else {
        eprintln!("{line}");
    }
}

// ── Format-specific renderers ────────────────────────────────────────

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

/// `Label:  value` lines with the values aligned.
fn render_pairs(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0) + 1;
    pairs
        .iter()
        .map(|(k, v)| {
            let value = if v.is_empty() { "-" } else { v.as_str() };
            format!("{:<width$} {value}", format!("{k}:"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_html_pairs(pairs: &[(&str, String)]) -> String {
    let mut out = String::from("<dl>\n");
    for (k, v) in pairs {
        let _ = writeln!(
            out,
            "  <dt>{}</dt><dd>{}</dd>",
            escape_html(k),
            escape_html(v)
        );
    }
    out.push_str("</dl>");
    out
}

/// An HTML table. `rows` hold cells that are already safe HTML.
pub fn render_html_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let mut out = String::from("<table class=\"table\">\n  <thead>\n    <tr>");
    for h in headers {
        let _ = write!(out, "<th>{}</th>", escape_html(h));
    }
    out.push_str("</tr>\n  </thead>\n  <tbody>\n");
    if rows.is_empty() {
        let _ = writeln!(
            out,
            "    <tr><td colspan=\"{}\" class=\"text-center\">No records found</td></tr>",
            headers.len().max(1)
        );
    }
    for row in rows {
        out.push_str("    <tr>");
        for cell in row {
            let _ = write!(out, "<td>{cell}</td>");
        }
        out.push_str("</tr>\n");
    }
    out.push_str("  </tbody>\n</table>");
    out
}

/// Pretty-printed JSON.
fn render_json<T: Serialize + ?Sized>(data: &T, compact: bool) -> Result<String, CliError> {
    let out = if compact {
        serde_json::to_string(data)?
    } else {
        serde_json::to_string_pretty(data)?
    };
    Ok(out)
}

fn render_yaml<T: Serialize + ?Sized>(data: &T) -> Result<String, CliError> {
    serde_yaml::to_string(data).map_err(|e| CliError::Internal(format!("YAML output failed: {e}")))
}
