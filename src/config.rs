//! CLI arguments and environment handling.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

/// Agent desk backend: serves and inspects the agent dashboard data.
#[derive(Parser, Debug, Clone)]
#[command(name = "agent_desk", version)]
pub struct Config {
    /// Serve from the in-process mock instead of a remote backend
    #[arg(long, env = "USE_MOCK_API", default_value_t = true, action = ArgAction::Set, global = true)]
    pub use_mock_api: bool,

    /// Base URL of the remote backend (without the /api suffix)
    #[arg(long, env = "API_BASE_URL", default_value = "http://127.0.0.1:3001", global = true)]
    pub api_base_url: String,

    /// Simulated latency of every mock call
    #[arg(long = "latency-ms", env = "MOCK_LATENCY_MS", default_value_t = 300, global = true)]
    pub mock_latency_ms: u64,

    /// Directory holding persisted collections; in-memory when absent
    #[arg(long, env = "DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP API over the mock backend
    Serve {
        /// Address to listen on
        #[arg(long, env = "LISTEN", default_value = "127.0.0.1:3001")]
        listen: SocketAddr,
    },
    /// Print one resource as JSON
    Show { resource: Resource },
    /// Write the wallet ledger as CSV to stdout
    ExportLedger,
    /// Replace the persisted collections with fresh seed data
    Reset,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Wallet,
    Health,
    Ledger,
    Players,
    Invites,
    Invitations,
    Payouts,
    Escalations,
    Deposits,
    Statements,
    Goals,
    Wars,
    Alerts,
    Dashboard,
}
