//! Config subcommand handlers.

use std::fmt::Write as _;

use dialoguer::Input;
use sdnboard_core::StalePolicy;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, DEFAULT_CONTROLLER_URL, Profile};
use crate::error::CliError;
use crate::output;

// ── Helpers ─────────────────────────────────────────────────────────

/// Format config for display as TOML-like text.
fn format_config(cfg: &Config) -> String {
    let mut out = String::new();

    if let Some(ref default) = cfg.default_profile {
        let _ = writeln!(out, "default_profile = \"{default}\"");
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[defaults]");
    let _ = writeln!(out, "output = \"{}\"", cfg.defaults.output);
    let _ = writeln!(out, "color = \"{}\"", cfg.defaults.color);
    let _ = writeln!(out, "insecure = {}", cfg.defaults.insecure);
    if let Some(timeout) = cfg.defaults.timeout {
        let _ = writeln!(out, "timeout = {timeout}");
    }
    let _ = writeln!(out, "stale_policy = \"{}\"", cfg.defaults.stale_policy);

    for (name, p) in &cfg.profiles {
        let _ = writeln!(out);
        let _ = writeln!(out, "[profiles.{name}]");
        let _ = writeln!(out, "controller = \"{}\"", p.controller);
        if let Some(ref ca) = p.ca_cert {
            let _ = writeln!(out, "ca_cert = \"{}\"", ca.display());
        }
        if let Some(insecure) = p.insecure {
            let _ = writeln!(out, "insecure = {insecure}");
        }
        if let Some(timeout) = p.timeout {
            let _ = writeln!(out, "timeout = {timeout}");
        }
        if let Some(policy) = p.stale_policy {
            let _ = writeln!(out, "stale_policy = \"{policy}\"");
        }
    }

    out
}

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn invalid(field: &str, reason: &str) -> CliError {
    CliError::Validation {
        field: field.into(),
        reason: reason.into(),
    }
}

/// Apply `key = value` to a profile.
fn set_key(profile: &mut Profile, key: &str, value: String) -> Result<(), CliError> {
    match key {
        "controller" => {
            sdnboard_config::parse_controller_url(&value)?;
            profile.controller = value;
        }
        "insecure" => {
            profile.insecure = Some(
                value
                    .parse()
                    .map_err(|_| invalid("insecure", "must be 'true' or 'false'"))?,
            );
        }
        "timeout" => {
            profile.timeout = Some(
                value
                    .parse()
                    .map_err(|_| invalid("timeout", "must be a number (seconds)"))?,
            );
        }
        "ca_cert" | "ca-cert" => profile.ca_cert = Some(value.into()),
        "stale_policy" | "stale-policy" => {
            let policy: StalePolicy = value.parse().map_err(|_| {
                invalid(
                    "stale_policy",
                    "must be 'last-completed-wins' or 'discard-superseded'",
                )
            })?;
            profile.stale_policy = Some(policy);
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!(
                    "unknown config key '{other}'. Valid keys: controller, insecure, \
                     timeout, ca_cert, stale_policy"
                ),
            });
        }
    }
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init => {
            let config_path = config::config_path();
            let suggested = global
                .controller
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTROLLER_URL.into());

            let (profile_name, controller) = if global.yes {
                (
                    global.profile.clone().unwrap_or_else(|| "default".into()),
                    suggested,
                )
            } else {
                eprintln!("sdnboard configuration");
                eprintln!("   Config path: {}\n", config_path.display());

                let name: String = Input::new()
                    .with_prompt("Profile name")
                    .default("default".into())
                    .interact_text()
                    .map_err(prompt_err)?;
                let url: String = Input::new()
                    .with_prompt("Controller URL")
                    .default(suggested)
                    .interact_text()
                    .map_err(prompt_err)?;
                (name, url)
            };

            sdnboard_config::parse_controller_url(&controller)?;

            let mut cfg = config::load_config_or_default();
            cfg.profiles
                .insert(profile_name.clone(), Profile::new(controller));
            cfg.default_profile = Some(profile_name.clone());

            let path = config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Configuration written to {}", path.display());
                eprintln!("  Active profile: {profile_name}");
                eprintln!("\n  Test it: sdnboard dashboard");
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let out = output::render_single(&global.output, &cfg, format_config, |_| {
                config::config_path().display().to_string()
            })?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_config()?;
            let profile_name = config::active_profile_name(global, &cfg);

            let profile = cfg
                .profiles
                .entry(profile_name.clone())
                .or_insert_with(|| Profile::new(DEFAULT_CONTROLLER_URL));
            set_key(profile, &key, value)?;

            config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }

        // ── Profiles ────────────────────────────────────────────────
        ConfigCommand::Profiles => {
            let cfg = config::load_config()?;
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: sdnboard config init");
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
                    name,
                    available: cfg.profile_names(),
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
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn set_key_parses_typed_values() {
        let mut profile = Profile::new(DEFAULT_CONTROLLER_URL);

        set_key(&mut profile, "timeout", "5".into()).unwrap();
        set_key(&mut profile, "insecure", "true".into()).unwrap();
        set_key(&mut profile, "stale-policy", "discard-superseded".into()).unwrap();
        set_key(&mut profile, "controller", "http://10.0.0.254:8080".into()).unwrap();

        assert_eq!(profile.timeout, Some(5));
        assert_eq!(profile.insecure, Some(true));
        assert_eq!(profile.stale_policy, Some(StalePolicy::DiscardSuperseded));
        assert_eq!(profile.controller, "http://10.0.0.254:8080");
    }

    #[test]
    fn set_key_rejects_bad_input() {
        let mut profile = Profile::new(DEFAULT_CONTROLLER_URL);

        assert!(set_key(&mut profile, "timeout", "soon".into()).is_err());
        assert!(set_key(&mut profile, "controller", "nope".into()).is_err());
        assert!(set_key(&mut profile, "site", "default".into()).is_err());
        assert_eq!(profile, Profile::new(DEFAULT_CONTROLLER_URL));
    }

    #[test]
    fn format_config_lists_profiles() {
        let mut cfg = Config::default();
        cfg.profiles
            .insert("lab".into(), Profile::new("http://10.0.0.254:8080"));

        let text = format_config(&cfg);
        assert!(text.contains("[profiles.lab]"));
        assert!(text.contains("controller = \"http://10.0.0.254:8080\""));
        assert!(text.contains("stale_policy = \"last-completed-wins\""));
    }
}
