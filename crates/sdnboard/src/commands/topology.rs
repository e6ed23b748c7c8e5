//! Topology command handlers.

use sdnboard_core::{Controller, Host, ResourceKind, Switch, Topology};
use tabled::Tabled;

use crate::cli::{GlobalOpts, OutputFormat, TopologyArgs, TopologyCommand};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct HostRow {
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "MAC")]
    mac: String,
    #[tabled(rename = "Switch")]
    switch: String,
    #[tabled(rename = "Port")]
    port: u32,
}

impl From<&Host> for HostRow {
    fn from(h: &Host) -> Self {
        Self {
            ip: h.ip.clone(),
            mac: h.mac.to_string(),
            switch: h.switch.clone(),
            port: h.port,
        }
    }
}

#[derive(Tabled)]
struct SwitchRow {
    #[tabled(rename = "Switch")]
    id: String,
    #[tabled(rename = "Ports")]
    ports: usize,
    #[tabled(rename = "Port MACs")]
    macs: String,
}

impl From<&Switch> for SwitchRow {
    fn from(s: &Switch) -> Self {
        Self {
            id: s.switch_id.clone(),
            ports: s.ports.len(),
            macs: s
                .ports
                .iter()
                .map(|p| format!("{}={}", p.port, p.mac))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

// ── Renderers ───────────────────────────────────────────────────────

pub(crate) fn render_hosts(hosts: &[Host], format: &OutputFormat) -> Result<String, CliError> {
    output::render_list(format, hosts, |h| HostRow::from(h), |h| h.ip.clone())
}

pub(crate) fn render_switches(
    switches: &[Switch],
    format: &OutputFormat,
) -> Result<String, CliError> {
    output::render_list(format, switches, |s| SwitchRow::from(s), |s| s.switch_id.clone())
}

fn render_host(host: &Host, format: &OutputFormat) -> Result<String, CliError> {
    output::render_single(
        format,
        host,
        |h| {
            format!(
                "IP:      {}\nMAC:     {}\nSwitch:  {}\nPort:    {}",
                h.ip, h.mac, h.switch, h.port
            )
        },
        |h| format!("{} {} {}", h.ip, h.switch, h.port),
    )
}

fn render_topology(topology: &Topology, format: &OutputFormat) -> Result<String, CliError> {
    match format {
        OutputFormat::Table => Ok(format!(
            "Hosts\n{}\n\nSwitches\n{}",
            render_hosts(&topology.hosts, format)?,
            render_switches(&topology.switches, format)?
        )),
        OutputFormat::Plain => {
            let hosts = topology.hosts.iter().map(|h| format!("host {}", h.ip));
            let switches = topology
                .switches
                .iter()
                .map(|s| format!("switch {}", s.switch_id));
            Ok(hosts.chain(switches).collect::<Vec<_>>().join("\n"))
        }
        _ => output::render_single(format, topology, |_| String::new(), |_| String::new()),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    controller: &Controller,
    args: TopologyArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let pb = util::spinner("Fetching topology", global);
    let outcome = controller.refresh(ResourceKind::Topology).await;
    pb.finish_and_clear();
    util::check(&outcome)?;

    let topology = controller.topology_snapshot();
    let out = match args.command {
        None => render_topology(&topology, &global.output)?,
        Some(TopologyCommand::Hosts { switch: None }) => {
            render_hosts(&topology.hosts, &global.output)?
        }
        Some(TopologyCommand::Hosts {
            switch: Some(switch),
        }) => {
            let hosts: Vec<Host> = topology.hosts_on_switch(&switch).cloned().collect();
            render_hosts(&hosts, &global.output)?
        }
        Some(TopologyCommand::Switches) => render_switches(&topology.switches, &global.output)?,
        Some(TopologyCommand::Host { ip }) => {
            let host = topology.host_by_ip(&ip).ok_or_else(|| CliError::NotFound {
                resource_type: "host".into(),
                identifier: ip.clone(),
                list_command: "topology hosts".into(),
            })?;
            render_host(host, &global.output)?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
