mod commands;
mod terminal;

use std::time::Duration;

use commands::{CommandLine, Commands, devices, probe, status};
use lanwatch_common::config::Config;
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init(commands.verbose);

    match commands.command {
        Commands::Status { json, concurrency, timeout_ms } => {
            let registry = commands::load_registry(commands.registry.as_deref())?;
            let cfg = Config {
                concurrency,
                probe_timeout: Duration::from_millis(timeout_ms),
                ..Config::default()
            };
            status::status(registry, cfg, json).await
        }
        Commands::Devices => {
            let registry = commands::load_registry(commands.registry.as_deref())?;
            devices::devices(&registry);
            Ok(())
        }
        Commands::Probe { host, port, timeout_ms } => {
            probe::probe(host, &port, Duration::from_millis(timeout_ms)).await
        }
    }
}
