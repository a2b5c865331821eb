use std::net::IpAddr;
use std::time::Duration;

use colored::*;
use lanwatch_core::network::probe;

use crate::terminal::{colors, format, print};

pub async fn probe(host: IpAddr, ports: &[u16], wait: Duration) -> anyhow::Result<()> {
    print::header("probing host");

    let reachable: bool = probe::ping_once(host, wait).await;
    print::aligned_line("Host", host.to_string());
    print::aligned_line("Echo", format::status_badge(reachable));

    for port in ports {
        let open: bool = probe::port_open(host, *port, wait).await;
        let value: ColoredString = if open {
            "open".color(colors::ONLINE).bold()
        } else {
            "closed".color(colors::OFFLINE).bold()
        };
        print::aligned_line(&format!("tcp/{port}"), value);
    }

    Ok(())
}
