//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::{Input, Select};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn config_pairs(cfg: &Config) -> Vec<(&'static str, String)> {
    let mut pairs = vec![
        (
            "Default profile",
            cfg.default_profile.clone().unwrap_or_default(),
        ),
        ("Output", cfg.defaults.output.clone()),
        ("Color", cfg.defaults.color.clone()),
        ("Insecure", cfg.defaults.insecure.to_string()),
        ("Timeout", cfg.defaults.timeout.to_string()),
        ("Locale", cfg.defaults.locale.clone()),
        ("Currency", cfg.defaults.currency.clone()),
    ];
    for (name, profile) in &cfg.profiles {
        let mut line = profile.api_url.clone();
        if let Some(timeout) = profile.timeout {
            let _ = write!(line, " timeout={timeout}");
        }
        if let Some(insecure) = profile.insecure {
            let _ = write!(line, " insecure={insecure}");
        }
        if let Some(locale) = &profile.locale {
            let _ = write!(line, " locale={locale}");
        }
        if let Some(currency) = &profile.currency {
            let _ = write!(line, " currency={currency}");
        }
        pairs.push(("Profile", format!("{name}: {line}")));
    }
    pairs
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            eprintln!("netequip configuration");
            eprintln!("   Config path: {}\n", config_path.display());

            let profile_name: String = Input::new()
                .with_prompt("Profile name")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let api_url: String = Input::new()
                .with_prompt("Inventory API URL")
                .default(config::DEFAULT_API_URL.into())
                .validate_with(|input: &String| {
                    config::validate_api_url(input).map_err(|e| e.to_string())
                })
                .interact_text()
                .map_err(prompt_err)?;

            let locales = ["ru-RU", "en-US"];
            let locale = Select::new()
                .with_prompt("Display locale")
                .items(&locales)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let mut cfg = config::load_config_or_default();
            let mut profile = Profile::new(api_url);
            profile.locale = Some(locales[locale].into());
            cfg.profiles.insert(profile_name.clone(), profile);
            cfg.default_profile = Some(profile_name.clone());

            let path = config::save_config(&cfg)?;
            eprintln!("\n✓ Configuration written to {}", path.display());
            eprintln!("  Active profile: {profile_name}");
            eprintln!("\n  Test it: netequip equipment list");
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let format = global.output.unwrap_or(OutputFormat::Table);
            let out = output::render_single(format, &cfg, config_pairs, |c| {
                c.active_profile_name().to_owned()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), false);
            Ok(())
        }

        // ── SetUrl <url> ────────────────────────────────────────────
        ConfigCommand::SetUrl { url } => {
            config::validate_api_url(&url)?;
            let mut cfg = config::load_config_or_default();
            let profile_name = config::active_profile_name(global, &cfg);

            cfg.profiles
                .entry(profile_name.clone())
                .and_modify(|p| p.api_url.clone_from(&url))
                .or_insert_with(|| Profile::new(url.clone()));
            if cfg.default_profile.is_none() {
                cfg.default_profile = Some(profile_name.clone());
            }

            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ API URL of profile '{profile_name}' set to {url}");
            }
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg.active_profile_name();
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: netequip config init");
            } else {
                for name in cfg.profiles.keys() {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        // ── Use <name> ─────────────────────────────────────────────
        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config()?;
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }

            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_list_profiles() {
        let mut cfg = Config::default();
        let mut lab = Profile::new("http://lab:8080/api");
        lab.timeout = Some(5);
        cfg.profiles.insert("lab".into(), lab);
        let pairs = config_pairs(&cfg);
        assert!(pairs.contains(&("Profile", "lab: http://lab:8080/api timeout=5".into())));
        assert!(pairs.contains(&("Locale", "ru-RU".into())));
    }
}
