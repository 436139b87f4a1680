//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use netequip_core::{Confirm, CoreError, EntityPage, EntitySchema, FormFields};

use crate::cli::FieldArgs;
use crate::config::Settings;
use crate::error::CliError;
use crate::output;

// ── Confirmation ────────────────────────────────────────────────────

/// Confirmation through a terminal prompt, auto-approved by `--yes`.
pub struct Prompter {
    yes: bool,
}

impl Prompter {
    pub fn new(settings: &Settings) -> Self {
        Self { yes: settings.yes }
    }
}

impl Confirm for Prompter {
    fn confirm(&self, prompt: &str) -> Result<bool, CoreError> {
        if self.yes {
            return Ok(true);
        }
        dialoguer::Confirm::new()
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(|e| CoreError::Internal(format!("prompt failed: {e}")))
    }
}

/// Fail early when a prompt would be needed but nobody can answer it.
pub fn ensure_interactive(settings: &Settings, action: &str, hint: &str) -> Result<(), CliError> {
    if settings.yes || std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(CliError::NonInteractive {
            action: action.into(),
            hint: hint.into(),
        })
    }
}

/// Pick one of `items`; returns its index.
pub fn select(prompt: &str, items: &[String]) -> Result<usize, CliError> {
    dialoguer::Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|e| CliError::Internal(format!("prompt failed: {e}")))
}

// ── Progress ────────────────────────────────────────────────────────

/// A spinner on stderr while something loads, only on a terminal.
pub fn spinner(settings: &Settings, message: &str) -> Option<ProgressBar> {
    if settings.quiet || !std::io::stderr().is_terminal() {
        return None;
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_owned());
    bar.enable_steady_tick(Duration::from_millis(100));
    Some(bar)
}

// ── Notices ─────────────────────────────────────────────────────────

/// Print and drain the page's queued notices.
pub fn flush_notices<S: EntitySchema>(page: &mut EntityPage<S>, settings: &Settings) {
    for notice in page.take_notices() {
        output::print_notice(&notice, settings.quiet, settings.color);
    }
}

// ── Form input ──────────────────────────────────────────────────────

/// Field assignments from `--from-file` then `--field`, in that order.
pub fn parse_fields(args: &FieldArgs) -> Result<Vec<(String, String)>, CliError> {
    let mut fields = Vec::new();

    if let Some(path) = &args.from_file {
        let contents = std::fs::read_to_string(path)?;
        let value: serde_json::Value = serde_json::from_str(&contents)?;
        let serde_json::Value::Object(map) = value else {
            return Err(CliError::Validation {
                field: "from-file".into(),
                reason: "expected a JSON object of field names to values".into(),
            });
        };
        for (name, value) in map {
            fields.push((name, json_to_raw(value)));
        }
    }

    for pair in &args.fields {
        let Some((name, value)) = pair.split_once('=') else {
            return Err(CliError::Validation {
                field: "field".into(),
                reason: format!("expected NAME=VALUE, got '{pair}'"),
            });
        };
        fields.push((name.trim().to_owned(), value.to_owned()));
    }

    Ok(fields)
}

/// Raw form text for a JSON value. Nested values stay JSON.
fn json_to_raw(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Write field assignments into the page's open form.
pub fn apply_fields<S: EntitySchema>(
    page: &mut EntityPage<S>,
    fields: &[(String, String)],
) -> Result<(), CliError> {
    for (name, value) in fields {
        page.set_field(name, value).map_err(|e| match e {
            CoreError::UnknownField(name) => CliError::UnknownField {
                name,
                valid: <S::Form as FormFields>::FIELDS.join(", "),
            },
            other => other.into(),
        })?;
    }
    Ok(())
}

/// The positional argument, or all of stdin when it is absent.
pub fn arg_or_stdin(arg: Option<String>) -> Result<String, CliError> {
    if let Some(arg) = arg {
        return Ok(arg);
    }
    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn fields_from_flags_and_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"name": "core-sw", "typeId": 3, "technicalParams": {{"ports": 48}}, "address": null}}"#
        )
        .unwrap();

        let args = FieldArgs {
            fields: vec!["name=edge = 2".into()],
            from_file: Some(file.path().to_owned()),
        };
        let fields = parse_fields(&args).unwrap();

        let get = |name: &str| {
            fields
                .iter()
                .rev()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("name"), Some("edge = 2"));
        assert_eq!(get("typeId"), Some("3"));
        assert_eq!(get("technicalParams"), Some(r#"{"ports":48}"#));
        assert_eq!(get("address"), Some(""));
    }

    #[test]
    fn rejects_pair_without_equals() {
        let args = FieldArgs {
            fields: vec!["name".into()],
            from_file: None,
        };
        assert!(matches!(
            parse_fields(&args),
            Err(CliError::Validation { .. })
        ));
    }
}
