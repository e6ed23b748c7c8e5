//! CLI configuration -- thin wrapper around `sdnboard_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--controller, --insecure, --timeout).

use std::time::Duration;

use sdnboard_core::{ControllerConfig, TlsVerification};
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use sdnboard_config::{
    Config, DEFAULT_CONTROLLER_URL, Defaults, Profile, config_path, load_config,
    load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build a `ControllerConfig` from the config file, profile, and CLI
/// overrides.
///
/// An explicitly requested profile must exist. Without one, a missing
/// default profile falls back to the controller's standard local address.
pub fn build_controller_config(global: &GlobalOpts) -> Result<ControllerConfig, CliError> {
    let cfg = load_config()?;
    let profile_name = active_profile_name(global, &cfg);

    let profile = match cfg.profiles.get(&profile_name) {
        Some(profile) => profile.clone(),
        None if global.profile.is_some() => {
            return Err(CliError::ProfileNotFound {
                name: profile_name,
                available: cfg.profile_names(),
            });
        }
        None => {
            debug!(profile = %profile_name, "profile not configured, using defaults");
            Profile::new(DEFAULT_CONTROLLER_URL)
        }
    };

    resolve_profile(&profile, &cfg.defaults, global)
}

/// Translate a `Profile` + global flags into a `ControllerConfig`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_profile(
    profile: &Profile,
    defaults: &Defaults,
    global: &GlobalOpts,
) -> Result<ControllerConfig, CliError> {
    let mut profile = profile.clone();
    if let Some(ref url) = global.controller {
        profile.controller.clone_from(url);
    }

    let mut config = sdnboard_config::profile_to_controller_config(&profile, defaults)?;

    if global.insecure {
        config.tls = TlsVerification::DangerAcceptInvalid;
    }
    if let Some(secs) = global.timeout {
        config.timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }

    Ok(config)
}
