//! Clap derive structures for the `sdnboard` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// sdnboard -- dashboard for an SDN controller
#[derive(Debug, Parser)]
#[command(
    name = "sdnboard",
    version,
    about = "Inspect and manage an SDN controller from the command line",
    long_about = "Reads the host whitelist, network topology, and summary statistics\n\
        from an SDN controller's REST API, and adds or removes whitelist rules.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "SDNBOARD_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL (overrides profile)
    #[arg(long, short = 'c', env = "SDNBOARD_CONTROLLER", global = true)]
    pub controller: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "SDNBOARD_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "SDNBOARD_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (0 waits indefinitely)
    #[arg(long, env = "SDNBOARD_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage the host-pair whitelist
    #[command(alias = "wl")]
    Whitelist(WhitelistArgs),

    /// Show hosts and switches discovered by the controller
    #[command(alias = "topo")]
    Topology(TopologyArgs),

    /// Show summary statistics
    Stats,

    /// Load everything at once and show an overview
    #[command(alias = "dash")]
    Dashboard,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Whitelist ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct WhitelistArgs {
    #[command(subcommand)]
    pub command: WhitelistCommand,
}

#[derive(Debug, Subcommand)]
pub enum WhitelistCommand {
    /// List whitelist rules in controller order
    #[command(alias = "ls")]
    List,

    /// Allow traffic from SRC to DST
    Add {
        /// Source host IP
        src: String,
        /// Destination host IP
        dst: String,
    },

    /// Remove the rule allowing SRC to DST
    #[command(alias = "rm")]
    Remove {
        /// Source host IP
        src: String,
        /// Destination host IP
        dst: String,
    },
}

// ── Topology ─────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct TopologyArgs {
    #[command(subcommand)]
    pub command: Option<TopologyCommand>,
}

#[derive(Debug, Subcommand)]
pub enum TopologyCommand {
    /// List discovered hosts
    Hosts {
        /// Only hosts attached to this switch (datapath id)
        #[arg(long, short = 's')]
        switch: Option<String>,
    },

    /// List switches and their ports
    Switches,

    /// Show where a host is attached
    Host {
        /// Host IP address
        ip: String,
    },
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file (prompts unless --yes)
    Init,

    /// Display current resolved configuration
    Show,

    /// Set a value on the active profile
    Set {
        /// Config key: controller, insecure, timeout, ca_cert, stale_policy
        key: String,

        /// Value to set
        value: String,
    },

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
