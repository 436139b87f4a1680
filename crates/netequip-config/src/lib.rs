//! Configuration for the netequip CLI.
//!
//! TOML profiles naming an API root, global display defaults, and
//! translation to `netequip_core::{ConnectionConfig, DisplayOptions}`.
//! The CLI layers its flags on top of what this crate resolves.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use netequip_core::{ConnectionConfig, DisplayLocale, DisplayOptions};

/// API root used when no profile names one.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("profile '{0}' not found in config")]
    UnknownProfile(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    /// Named API endpoints.
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Name of the profile to use when none is requested.
    pub fn active_profile_name(&self) -> &str {
        self.default_profile.as_deref().unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default)]
    pub insecure: bool,

    /// Seconds; 0 waits indefinitely.
    #[serde(default)]
    pub timeout: u64,

    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: false,
            timeout: 0,
            locale: default_locale(),
            currency: default_currency(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_locale() -> String {
    "ru-RU".into()
}
fn default_currency() -> String {
    "RUB".into()
}

/// A named API endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// API root, e.g. "http://inventory.local:8080/api".
    pub api_url: String,

    /// Override timeout (seconds).
    pub timeout: Option<u64>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    pub locale: Option<String>,

    pub currency: Option<String>,
}

impl Profile {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            timeout: None,
            insecure: None,
            locale: None,
            currency: None,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("org", "netequip", "netequip").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("netequip");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path`, then `NETEQUIP_*` variables.
///
/// Nested keys use a double underscore: `NETEQUIP_DEFAULTS__OUTPUT=json`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("NETEQUIP_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Translation to core types ───────────────────────────────────────

/// Check that `raw` is an absolute http(s) URL.
pub fn validate_api_url(raw: &str) -> Result<(), ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "api_url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(ConfigError::Validation {
            field: "api_url".into(),
            reason: format!("expected http or https, got '{other}'"),
        }),
    }
}

/// `0` means no timeout.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

/// Build a `ConnectionConfig` from a profile and the global defaults.
pub fn profile_to_connection(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ConnectionConfig, ConfigError> {
    validate_api_url(&profile.api_url)?;

    Ok(ConnectionConfig {
        base_url: profile.api_url.clone(),
        timeout: timeout_from_secs(profile.timeout.unwrap_or(defaults.timeout)),
        accept_invalid_certs: profile.insecure.unwrap_or(defaults.insecure),
    })
}

pub fn parse_locale(raw: &str) -> Result<DisplayLocale, ConfigError> {
    DisplayLocale::from_str(raw.trim()).map_err(|_| ConfigError::Validation {
        field: "locale".into(),
        reason: format!("expected 'ru-RU' or 'en-US', got '{raw}'"),
    })
}

pub fn parse_currency(raw: &str) -> Result<String, ConfigError> {
    let code = raw.trim().to_ascii_uppercase();
    if code.len() == 3 && code.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(code)
    } else {
        Err(ConfigError::Validation {
            field: "currency".into(),
            reason: format!("expected a three-letter ISO 4217 code, got '{raw}'"),
        })
    }
}

/// Resolve display settings; profile values win over defaults.
pub fn display_options(
    defaults: &Defaults,
    profile: Option<&Profile>,
) -> Result<DisplayOptions, ConfigError> {
    let locale = profile
        .and_then(|p| p.locale.as_deref())
        .unwrap_or(&defaults.locale);
    let currency = profile
        .and_then(|p| p.currency.as_deref())
        .unwrap_or(&defaults.currency);

    Ok(DisplayOptions {
        locale: parse_locale(locale)?,
        currency: parse_currency(currency)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.active_profile_name(), "default");
        assert_eq!(config.defaults.locale, "ru-RU");
        assert_eq!(config.defaults.timeout, 0);
        assert!(config.profiles.is_empty());
    }

    #[test]
    fn reads_profiles_and_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
default_profile = "lab"

[defaults]
output = "json"
currency = "usd"

[profiles.lab]
api_url = "http://lab.local:8080/api"
timeout = 10
locale = "en-US"
"#,
        )
        .unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.active_profile_name(), "lab");
        assert_eq!(config.defaults.output, "json");
        assert_eq!(config.defaults.color, "auto");

        let lab = config.profile("lab").unwrap();
        let connection = profile_to_connection(lab, &config.defaults).unwrap();
        assert_eq!(connection.base_url, "http://lab.local:8080/api");
        assert_eq!(connection.timeout, Some(Duration::from_secs(10)));

        let display = display_options(&config.defaults, Some(lab)).unwrap();
        assert_eq!(display.locale, DisplayLocale::EnUs);
        assert_eq!(display.currency, "USD");
    }

    #[test]
    fn saved_config_reloads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config
            .profiles
            .insert("default".into(), Profile::new(DEFAULT_API_URL));
        save_config_to(&config, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), config);
    }

    #[test]
    fn zero_timeout_means_none() {
        let connection =
            profile_to_connection(&Profile::new(DEFAULT_API_URL), &Defaults::default()).unwrap();
        assert_eq!(connection.timeout, None);
        assert!(!connection.accept_invalid_certs);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            validate_api_url("ftp://files.local/api"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(validate_api_url("not a url").is_err());
        assert!(parse_locale("de-DE").is_err());
        assert!(parse_currency("RUBLE").is_err());
        assert_eq!(parse_locale("en").unwrap(), DisplayLocale::EnUs);
    }
}
