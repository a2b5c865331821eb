pub mod devices;
pub mod probe;
pub mod status;

use std::net::IpAddr;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use lanwatch_common::config::DEFAULT_CONCURRENCY;
use lanwatch_common::network::registry::DeviceRegistry;
use lanwatch_common::success;

#[derive(Parser)]
#[command(name = "lanwatch")]
#[command(about = "Reachability and service dashboard for a home network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Device registry (JSON array). Defaults to the built-in inventory.
    #[arg(short, long, global = true)]
    pub registry: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe every registered device once and print the dashboard
    #[command(alias = "s")]
    Status {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
        /// Devices probed at the same time
        #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,
        /// Per-check timeout in milliseconds
        #[arg(long, default_value_t = 1_000)]
        timeout_ms: u64,
    },
    /// List the registered devices
    #[command(alias = "d")]
    Devices,
    /// Check a single host and optionally some of its TCP ports
    #[command(alias = "p")]
    Probe {
        host: IpAddr,
        #[arg(short, long)]
        port: Vec<u16>,
        /// Per-check timeout in milliseconds
        #[arg(long, default_value_t = 1_000)]
        timeout_ms: u64,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

pub fn load_registry(path: Option<&Path>) -> anyhow::Result<DeviceRegistry> {
    let Some(path) = path else {
        return Ok(DeviceRegistry::builtin());
    };

    let registry = DeviceRegistry::from_json_file(path)
        .with_context(|| format!("loading device registry from {}", path.display()))?;

    let len: usize = registry.len();
    let unit: &str = if len == 1 { "device has been" } else { "devices have been" };
    success!("{len} {unit} loaded from {}", path.display());

    Ok(registry)
}
