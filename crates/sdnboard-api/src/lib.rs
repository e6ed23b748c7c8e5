// sdnboard-api: Async Rust client for the SDN controller REST API

pub mod client;
pub mod error;
pub mod models;
pub mod resource;
pub mod stats;
pub mod topology;
pub mod transport;
pub mod whitelist;

pub use client::ControllerClient;
pub use error::Error;
pub use models::{
    Ack, HostEntry, PortEntry, StatsResponse, SwitchEntry, TopologyResponse, WhitelistEntry,
};
pub use resource::{ResourceKind, ResourcePayload};
pub use transport::{TlsMode, TransportConfig};
