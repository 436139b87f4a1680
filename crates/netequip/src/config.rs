//! CLI configuration: thin wrapper around `netequip_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides. Precedence
//! is flag / env > profile > `[defaults]` > built-in.

use clap::ValueEnum;

use netequip_core::{ConnectionConfig, DisplayOptions};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

pub use netequip_config::{
    Config, DEFAULT_API_URL, Profile, config_path, load_config, load_config_or_default,
    save_config, validate_api_url,
};

/// Everything a command handler needs besides the API connection.
#[derive(Debug, Clone)]
pub struct Settings {
    pub output: OutputFormat,
    pub color: bool,
    pub quiet: bool,
    pub yes: bool,
    pub display: DisplayOptions,
}

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .unwrap_or_else(|| config.active_profile_name().to_owned())
}

/// The active profile. Asking for a missing profile by name is an error;
/// a missing default profile just means "built-in settings".
pub fn active_profile<'a>(
    global: &GlobalOpts,
    config: &'a Config,
) -> Result<Option<&'a Profile>, CliError> {
    let name = active_profile_name(global, config);
    match config.profile(&name) {
        Some(profile) => Ok(Some(profile)),
        None if global.profile.is_some() => Err(CliError::ProfileNotFound {
            name,
            available: available_profiles(config),
        }),
        None => Ok(None),
    }
}

pub fn available_profiles(config: &Config) -> String {
    if config.profiles.is_empty() {
        "(none)".into()
    } else {
        config.profiles.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

fn parse_value_enum<T: ValueEnum>(field: &str, raw: &str) -> Result<T, CliError> {
    T::from_str(raw, true).map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("unsupported value '{raw}'"),
    })
}

/// Output and display settings.
pub fn resolve_settings(
    global: &GlobalOpts,
    config: &Config,
    profile: Option<&Profile>,
) -> Result<Settings, CliError> {
    let output = match global.output {
        Some(format) => format,
        None => parse_value_enum("defaults.output", &config.defaults.output)?,
    };
    let color_mode = match global.color {
        Some(mode) => mode,
        None => parse_value_enum::<ColorMode>("defaults.color", &config.defaults.color)?,
    };

    let mut display = netequip_config::display_options(&config.defaults, profile)?;
    if let Some(locale) = global.locale.as_deref() {
        display.locale = netequip_config::parse_locale(locale)?;
    }
    if let Some(currency) = global.currency.as_deref() {
        display.currency = netequip_config::parse_currency(currency)?;
    }

    Ok(Settings {
        output,
        color: output::should_color(color_mode),
        quiet: global.quiet,
        yes: global.yes,
        display,
    })
}

/// Connection settings for the API.
pub fn resolve_connection(
    global: &GlobalOpts,
    config: &Config,
    profile: Option<&Profile>,
) -> Result<ConnectionConfig, CliError> {
    let base = profile.cloned().unwrap_or_else(|| Profile::new(DEFAULT_API_URL));
    let mut connection = netequip_config::profile_to_connection(&base, &config.defaults)?;

    if let Some(url) = global.api_url.as_deref() {
        validate_api_url(url)?;
        url.clone_into(&mut connection.base_url);
    }
    if let Some(secs) = global.timeout {
        connection.timeout = netequip_config::timeout_from_secs(secs);
    }
    connection.accept_invalid_certs |= global.insecure;

    Ok(connection)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["netequip"];
        argv.extend_from_slice(args);
        argv.extend_from_slice(&["config", "path"]);
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config() -> Config {
        let mut config = Config::default();
        let mut lab = Profile::new("http://lab.local:8080/api");
        lab.timeout = Some(15);
        lab.locale = Some("en-US".into());
        config.profiles.insert("lab".into(), lab);
        config.default_profile = Some("lab".into());
        config
    }

    #[test]
    fn flags_override_profile() {
        let config = config();
        let global = global(&["--api-url", "http://other:9000/api", "--timeout", "0"]);
        let profile = active_profile(&global, &config).unwrap();
        let connection = resolve_connection(&global, &config, profile).unwrap();
        assert_eq!(connection.base_url, "http://other:9000/api");
        assert_eq!(connection.timeout, None);

        let global = self::global(&[]);
        let connection = resolve_connection(&global, &config, profile).unwrap();
        assert_eq!(connection.base_url, "http://lab.local:8080/api");
        assert_eq!(connection.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn missing_named_profile_is_an_error() {
        let config = config();
        let global = global(&["--profile", "prod"]);
        assert!(matches!(
            active_profile(&global, &config),
            Err(CliError::ProfileNotFound { .. })
        ));
    }

    #[test]
    fn defaults_feed_settings() {
        let mut config = Config::default();
        config.defaults.output = "json".into();
        config.defaults.color = "never".into();
        let settings = resolve_settings(&global(&["--currency", "eur"]), &config, None).unwrap();
        assert_eq!(settings.output, OutputFormat::Json);
        assert!(!settings.color);
        assert_eq!(settings.display.currency, "EUR");

        config.defaults.output = "xml".into();
        assert!(resolve_settings(&global(&[]), &config, None).is_err());
    }

    #[test]
    fn no_profile_uses_builtin_url() {
        let config = Config::default();
        let global = global(&[]);
        let profile = active_profile(&global, &config).unwrap();
        assert!(profile.is_none());
        let connection = resolve_connection(&global, &config, profile).unwrap();
        assert_eq!(connection.base_url, DEFAULT_API_URL);
    }
}
