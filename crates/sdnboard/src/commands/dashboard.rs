//! Dashboard: initial load of all three resources and a combined view.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::Local;
use sdnboard_core::{
    Controller, RefreshReport, ResourceKind, ResourceStatus, Stats, Topology, WhitelistRule,
};
use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::{stats, topology, util};

// ── View model ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct DashboardView {
    stats: Arc<Stats>,
    whitelist: Arc<Vec<WhitelistRule>>,
    topology: Arc<Topology>,
    status: Vec<KindStatus>,
}

#[derive(Serialize)]
struct KindStatus {
    kind: ResourceKind,
    #[serde(flatten)]
    status: ResourceStatus,
}

#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Resource")]
    kind: String,
    #[tabled(rename = "State")]
    phase: String,
    #[tabled(rename = "Updated")]
    updated: String,
    #[tabled(rename = "Error")]
    error: String,
}

impl StatusRow {
    fn new(entry: &KindStatus, color: bool) -> Self {
        Self {
            kind: entry.kind.to_string(),
            phase: output::phase_label(entry.status.phase, color),
            updated: entry
                .status
                .last_success
                .map(|ts| ts.with_timezone(&Local).format("%H:%M:%S").to_string())
                .unwrap_or_default(),
            error: entry.status.error.clone().unwrap_or_default(),
        }
    }
}

fn snapshot(controller: &Controller) -> DashboardView {
    DashboardView {
        stats: controller.stats_snapshot(),
        whitelist: controller.whitelist_snapshot(),
        topology: controller.topology_snapshot(),
        status: ResourceKind::iter()
            .map(|kind| KindStatus {
                kind,
                status: controller.resource_status(kind),
            })
            .collect(),
    }
}

fn render_overview(view: &DashboardView, global: &GlobalOpts) -> Result<String, CliError> {
    let color = output::should_color(&global.color);
    let table = OutputFormat::Table;
    let status_rows: Vec<StatusRow> = view
        .status
        .iter()
        .map(|s| StatusRow::new(s, color))
        .collect();

    let mut out = String::new();
    let _ = writeln!(out, "{}\n", stats::detail(&view.stats));
    let _ = writeln!(out, "{}\n", output::render_table(&status_rows));
    let _ = writeln!(out, "Whitelist ({} rules)", view.whitelist.len());
    for rule in view.whitelist.as_slice() {
        let _ = writeln!(out, "  {rule}");
    }
    let _ = writeln!(out, "\nHosts");
    let _ = writeln!(out, "{}", topology::render_hosts(&view.topology.hosts, &table)?);
    let _ = writeln!(out, "\nSwitches");
    let _ = write!(
        out,
        "{}",
        topology::render_switches(&view.topology.switches, &table)?
    );
    Ok(out)
}

fn report_error(report: &RefreshReport) -> Result<(), CliError> {
    let failures: Vec<String> = report
        .errors()
        .map(|(_, message)| message.to_owned())
        .collect();
    if failures.is_empty() {
        return Ok(());
    }
    Err(CliError::PartialLoad {
        failed: failures.len(),
        details: failures.join("\n"),
    })
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(controller: &Controller, global: &GlobalOpts) -> Result<(), CliError> {
    let pb = util::spinner("Loading whitelist, topology, and stats", global);
    let report = controller.initialize().await;
    pb.finish_and_clear();

    // Render whatever loaded, then report the kinds that did not.
    let view = snapshot(controller);
    let out = match global.output {
        OutputFormat::Table => render_overview(&view, global)?,
        OutputFormat::Plain => view
            .status
            .iter()
            .map(|s| format!("{} {}", s.kind, s.status.phase))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => output::render_single(&global.output, &view, |_| String::new(), |_| String::new())?,
    };
    output::print_output(&out, global.quiet);

    report_error(&report)
}
