//! Statistics command handler.

use sdnboard_core::{Controller, ResourceKind, Stats};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::util;

pub(crate) fn detail(stats: &Stats) -> String {
    format!(
        "Hosts:            {}\nSwitches:         {}\nWhitelist rules:  {}",
        stats.total_hosts, stats.total_switches, stats.whitelist_rules
    )
}

pub(crate) fn render(stats: &Stats, format: &OutputFormat) -> Result<String, CliError> {
    output::render_single(format, stats, detail, |s| {
        format!(
            "total_hosts={}\ntotal_switches={}\nwhitelist_rules={}",
            s.total_hosts, s.total_switches, s.whitelist_rules
        )
    })
}

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let pb = util::spinner("Fetching stats", global);
    let outcome = controller.refresh(ResourceKind::Stats).await;
    pb.finish_and_clear();
    util::check(&outcome)?;

    let out = render(&controller.stats_snapshot(), &global.output)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_lists_all_counters() {
        let stats = Stats {
            total_hosts: 4,
            total_switches: 2,
            whitelist_rules: 1,
        };
        let text = detail(&stats);
        assert!(text.contains("Hosts:            4"));
        assert!(text.contains("Switches:         2"));
        assert!(text.contains("Whitelist rules:  1"));
    }
}
