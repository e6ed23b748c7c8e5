// sdnboard-core: Resource store and sync controller between sdnboard-api and consumers.

pub mod command;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::{Command, CommandResult};
pub use config::{ControllerConfig, StalePolicy, TlsVerification};
pub use controller::{Controller, RefreshReport};
pub use error::CoreError;
pub use store::ResourceStore;
pub use stream::{SnapshotStream, SnapshotWatchStream};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Resources
    Host, MacAddress, Stats, Switch, SwitchPort, Topology, WhitelistRule,
    // Sync status
    Operation, Outcome, ResourceKind, ResourceStatus, SyncPhase, SyncState,
};
