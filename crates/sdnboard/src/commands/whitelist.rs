//! Whitelist command handlers.

use sdnboard_core::{Controller, Outcome, ResourceKind, WhitelistRule};
use tabled::Tabled;

use crate::cli::{GlobalOpts, WhitelistArgs, WhitelistCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct RuleRow {
    #[tabled(rename = "Source")]
    src: String,
    #[tabled(rename = "Destination")]
    dst: String,
}

impl From<&WhitelistRule> for RuleRow {
    fn from(r: &WhitelistRule) -> Self {
        Self {
            src: r.src.clone(),
            dst: r.dst.clone(),
        }
    }
}

/// Rules in controller order; plain output is `SRC DST` per line.
fn render_rules(rules: &[WhitelistRule], global: &GlobalOpts) -> Result<String, CliError> {
    output::render_list(&global.output, rules, |r| RuleRow::from(r), |r| {
        format!("{} {}", r.src, r.dst)
    })
}

async fn list(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let pb = util::spinner("Fetching whitelist", global);
    let outcome = controller.refresh(ResourceKind::Whitelist).await;
    pb.finish_and_clear();
    util::check(&outcome)?;

    let out = render_rules(&controller.whitelist_snapshot(), global)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: WhitelistArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        WhitelistCommand::List => list(controller, global).await,

        WhitelistCommand::Add { src, dst } => {
            let pb = util::spinner("Adding rule", global);
            let outcome = controller.add_rule(&src, &dst).await;
            pb.finish_and_clear();

            if outcome == Outcome::Skipped {
                util::note(global, "Skipped: source and destination must both be non-empty");
                return Ok(());
            }
            util::check(&outcome)?;

            util::note(global, &format!("Added {} -> {}", src.trim(), dst.trim()));
            let out = render_rules(&controller.whitelist_snapshot(), global)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        WhitelistCommand::Remove { src, dst } => {
            let (src, dst) = (src.trim(), dst.trim());
            if !util::confirm(&format!("Remove whitelist rule {src} -> {dst}?"), global.yes)? {
                return Ok(());
            }

            let pb = util::spinner("Removing rule", global);
            let outcome = controller.remove_rule(src, dst).await;
            pb.finish_and_clear();
            util::check(&outcome)?;

            util::note(global, &format!("Removed {src} -> {dst}"));
            let out = render_rules(&controller.whitelist_snapshot(), global)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
