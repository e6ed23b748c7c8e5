//! Command dispatch: bridges CLI args -> controller operations -> output formatting.

pub mod config_cmd;
pub mod dashboard;
pub mod stats;
pub mod topology;
pub mod util;
pub mod whitelist;

use sdnboard_core::Controller;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Dispatch a controller-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    controller: &Controller,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Whitelist(args) => whitelist::handle(controller, args, global).await,
        Command::Topology(args) => topology::handle(controller, args, global).await,
        Command::Stats => stats::handle(controller, global).await,
        Command::Dashboard => dashboard::handle(controller, global).await,
        Command::Config(args) => config_cmd::handle(args, global),
        Command::Completions(_) => Ok(()),
    }
}
