//! Shared helpers for command handlers.

use std::io::IsTerminal;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use sdnboard_core::Outcome;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

/// Turn a failed store outcome into the matching CLI error.
pub fn check(outcome: &Outcome) -> Result<(), CliError> {
    match outcome {
        Outcome::Failed(message) => Err(CliError::RequestFailed {
            message: message.clone(),
        }),
        Outcome::Rejected(message) => Err(CliError::Rejected {
            message: message.clone(),
        }),
        Outcome::Applied | Outcome::Skipped | Outcome::Discarded => Ok(()),
    }
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(std::io::Error::other)?;
    Ok(confirmed)
}

/// Spinner on stderr while a request is in flight. Hidden for quiet,
/// structured output, or a non-terminal stderr.
pub fn spinner(message: &str, global: &GlobalOpts) -> ProgressBar {
    let visible = !global.quiet
        && matches!(global.output, OutputFormat::Table)
        && std::io::stderr().is_terminal();
    if !visible {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_owned());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

/// Print a status line on stderr unless quiet.
pub fn note(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}
