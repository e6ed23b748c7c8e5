//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError`, `ConfigError`, and failed store outcomes into
//! user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use sdnboard_config::ConfigError;
use sdnboard_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const REJECTED: i32 = 6;
    pub const CONNECTION: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Controller ───────────────────────────────────────────────────
    #[error("{message}")]
    #[diagnostic(
        code(sdnboard::request_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Override the address with --controller, or run: sdnboard config show"
        )
    )]
    RequestFailed { message: String },

    #[error("{message}")]
    #[diagnostic(
        code(sdnboard::rejected),
        help("The controller refused the change. Run: sdnboard whitelist list")
    )]
    Rejected { message: String },

    #[error("{failed} of 3 resources failed to load")]
    #[diagnostic(code(sdnboard::partial_load), help("{details}"))]
    PartialLoad { failed: usize, details: String },

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(sdnboard::not_found),
        help("Run: sdnboard {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(sdnboard::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(sdnboard::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: sdnboard config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error(transparent)]
    #[diagnostic(code(sdnboard::config))]
    Config(Box<ConfigError>),

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(sdnboard::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to render YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(Box::new(other)),
        }
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::RequestFailed { .. } | Self::PartialLoad { .. } => exit_code::CONNECTION,
            Self::Rejected { .. } => exit_code::REJECTED,
            Self::NotFound { .. } | Self::ProfileNotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Network { .. } => Self::RequestFailed {
                message: err.to_string(),
            },
            CoreError::Rejected { .. } => Self::Rejected {
                message: err.to_string(),
            },
            CoreError::Config { message } => Self::Validation {
                field: "controller".into(),
                reason: message,
            },
        }
    }
}
