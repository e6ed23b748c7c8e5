// ── Topology domain types ──

use serde::{Deserialize, Serialize};

use super::mac::MacAddress;

/// A discovered end-station, attached to exactly one switch port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Host {
    pub ip: String,
    pub mac: MacAddress,
    pub switch: String,
    pub port: u32,
}

/// One switch port and the MAC address last seen on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwitchPort {
    pub port: u32,
    pub mac: MacAddress,
}

/// A switch and its learned ports, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub switch_id: String,
    pub ports: Vec<SwitchPort>,
}

/// Full-replace topology snapshot. Never merged with a previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub hosts: Vec<Host>,
    pub switches: Vec<Switch>,
}

impl Topology {
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty() && self.switches.is_empty()
    }

    pub fn host_by_ip(&self, ip: &str) -> Option<&Host> {
        self.hosts.iter().find(|h| h.ip == ip)
    }

    /// Hosts attached to `switch_id`, in server order.
    pub fn hosts_on_switch<'a>(&'a self, switch_id: &'a str) -> impl Iterator<Item = &'a Host> {
        self.hosts.iter().filter(move |h| h.switch == switch_id)
    }
}
