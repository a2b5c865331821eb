use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use lanwatch_common::config::Config;
use lanwatch_common::network::registry::DeviceRegistry;
use lanwatch_common::snapshot::Snapshot;
use lanwatch_core::clients::Collaborators;
use lanwatch_core::dashboard::DashboardService;
use lanwatch_core::network::probe::SystemProber;

use crate::lprint;
use crate::terminal::{colors, format, print, spinner};

pub async fn status(registry: DeviceRegistry, cfg: Config, json: bool) -> anyhow::Result<()> {
    let prober = Arc::new(SystemProber::new(cfg.probe_timeout));
    let service = DashboardService::start(registry, cfg, prober, Collaborators::default()).await;

    let pb = (!json).then(|| spinner::start("Probing devices..."));
    let start_time: Instant = Instant::now();
    let snapshot: Snapshot = service.refresh().await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    print_snapshot(&snapshot, start_time.elapsed());
    Ok(())
}

fn print_snapshot(snapshot: &Snapshot, total_time: Duration) {
    print::header("dashboard");

    if snapshot.is_empty() {
        print::no_results();
        return;
    }

    for (idx, entry) in snapshot.entries().enumerate() {
        print::tree_head(idx, &entry.name, format::status_badge(entry.reachable));
        print::as_tree_one_level(format::entry_to_details(entry));
        if idx + 1 != snapshot.len() {
            lprint!();
        }
    }

    let online: ColoredString = format!("{}/{} online", snapshot.online_count(), snapshot.len())
        .bold()
        .green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let built_at: String = snapshot.built_at().format("%H:%M:%S").to_string();

    print::fat_separator();
    print::centerln(
        &format!("{online} in {total_time} at {built_at}")
            .color(colors::TEXT_DEFAULT)
            .to_string(),
    );
}
