//! Clap derive structures for the `airgo` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// airgo -- node-side client for the AirGo panel
#[derive(Debug, Parser)]
#[command(
    name = "airgo",
    version,
    about = "Poll an AirGo panel for node config and users, and report node telemetry",
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
    /// Config file (defaults to the platform config dir)
    #[arg(long, env = "AIRGO_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Node profile to use
    #[arg(long, short = 'p', env = "AIRGO_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Panel base URL (overrides profile)
    #[arg(long, env = "AIRGO_API_HOST", global = true)]
    pub api_host: Option<String>,

    /// Panel key
    #[arg(long, env = "AIRGO_KEY", global = true, hide_env_values = true)]
    pub key: Option<String>,

    /// Node id assigned by the panel (overrides profile)
    #[arg(long, env = "AIRGO_NODE_ID", global = true)]
    pub node_id: Option<u32>,

    /// Inbound kind: V2ray, Trojan, Shadowsocks, Shadowsocks-Plugin
    #[arg(long, env = "AIRGO_NODE_TYPE", global = true)]
    pub node_type: Option<String>,

    /// Output format
    #[arg(long, short = 'o', default_value = "table", global = true)]
    pub output: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid panel TLS certificates
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides config)
    #[arg(long, env = "AIRGO_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Log line format
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,
}

// ── Output & Log Enums ───────────────────────────────────────────────

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

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch and show the node's inbound configuration
    Node,

    /// Fetch and list the users allowed on this node
    #[command(alias = "u")]
    Users,

    /// Show the local detection rules
    Rules,

    /// Show the session identity (panel, node, key source)
    Describe,

    /// Send telemetry to the panel
    Report(ReportArgs),

    /// Fetch node config and users periodically until interrupted
    Poll(PollArgs),

    /// Inspect configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Report ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportArgs {
    #[command(subcommand)]
    pub command: ReportCommand,
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Report host resource usage
    Status {
        /// CPU usage percent
        #[arg(long, default_value = "0")]
        cpu: f64,
        /// Memory usage percent
        #[arg(long, default_value = "0")]
        mem: f64,
        /// Disk usage percent
        #[arg(long, default_value = "0")]
        disk: f64,
        /// Seconds since the node started
        #[arg(long, default_value = "0")]
        uptime: u64,
    },

    /// Report per-user traffic deltas from a JSON file
    Traffic {
        /// JSON array of `{"uid", "email", "upload", "download"}`
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Report online users as `<uid>=<ip>` pairs
    Online {
        #[arg(required = true, value_name = "UID=IP")]
        entries: Vec<String>,
    },
}

// ── Poll ─────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PollArgs {
    /// Seconds between rounds (overrides `defaults.poll_interval`)
    #[arg(long, short = 'i')]
    pub interval: Option<u64>,

    /// Run a single round and exit
    #[arg(long)]
    pub once: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Display current resolved configuration (keys masked)
    Show,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
