// ── Wire → domain conversion ──
//
// Maps `sdnboard_api` response types into the canonical model. Sequences
// have already been defaulted by the wire layer; this only reshapes.

use sdnboard_api::models::{
    HostEntry, PortEntry, StatsResponse, SwitchEntry, TopologyResponse, WhitelistEntry,
};

use crate::model::{Host, MacAddress, Stats, Switch, SwitchPort, Topology, WhitelistRule};

impl From<WhitelistEntry> for WhitelistRule {
    fn from(entry: WhitelistEntry) -> Self {
        Self {
            src: entry.src,
            dst: entry.dst,
        }
    }
}

impl From<HostEntry> for Host {
    fn from(entry: HostEntry) -> Self {
        Self {
            ip: entry.ip,
            mac: MacAddress::new(entry.mac),
            switch: entry.switch,
            port: entry.port,
        }
    }
}

impl From<PortEntry> for SwitchPort {
    fn from(entry: PortEntry) -> Self {
        Self {
            port: entry.port,
            mac: MacAddress::new(entry.mac),
        }
    }
}

impl From<SwitchEntry> for Switch {
    fn from(entry: SwitchEntry) -> Self {
        Self {
            switch_id: entry.switch_id,
            ports: entry.ports.into_iter().map(SwitchPort::from).collect(),
        }
    }
}

impl From<TopologyResponse> for Topology {
    fn from(resp: TopologyResponse) -> Self {
        Self {
            hosts: resp.hosts.into_iter().map(Host::from).collect(),
            switches: resp.switches.into_iter().map(Switch::from).collect(),
        }
    }
}

impl From<StatsResponse> for Stats {
    fn from(resp: StatsResponse) -> Self {
        Self {
            total_hosts: resp.total_hosts,
            total_switches: resp.total_switches,
            whitelist_rules: resp.whitelist_rules,
        }
    }
}
