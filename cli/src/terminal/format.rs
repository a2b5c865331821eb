use std::net::IpAddr;

use colored::*;
use lanwatch_common::network::device::Device;
use lanwatch_common::snapshot::DeviceEntry;
use lanwatch_common::status::Connectivity;

use crate::terminal::colors;

type Detail = (String, ColoredString);

pub fn status_badge(reachable: bool) -> ColoredString {
    if reachable {
        "online".color(colors::ONLINE).bold()
    } else {
        "offline".color(colors::OFFLINE).bold()
    }
}

pub fn ip_to_detail(ip: &IpAddr) -> Detail {
    match ip {
        IpAddr::V4(v4) => ("IPv4".to_string(), v4.to_string().color(colors::IPV4_ADDR)),
        IpAddr::V6(v6) => ("IPv6".to_string(), v6.to_string().color(colors::IPV6_ADDR)),
    }
}

pub fn entry_to_details(entry: &DeviceEntry) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![ip_to_detail(&entry.ip)];

    if let Some(url) = &entry.url {
        details.push(("URL".to_string(), url.as_str().normal()));
    }

    for (service, up) in &entry.services {
        let value: ColoredString = if *up {
            "up".color(colors::ONLINE)
        } else {
            "down".color(colors::OFFLINE)
        };
        details.push((service.clone(), value));
    }

    if let Some(wan) = &entry.wan_details {
        details.push(("WAN IP".to_string(), wan.ip_address.as_str().color(colors::IPV4_ADDR)));
        if !wan.gateways.is_empty() {
            details.push(("Gateways".to_string(), wan.gateways.join(", ").normal()));
        }
    }

    if let Some(connectivity) = &entry.connectivity {
        let value: ColoredString = match connectivity {
            Connectivity::State { state } => state.as_str().color(colors::ACCENT),
            Connectivity::Unavailable { reason } => format!("unavailable ({reason})").color(colors::MUTED),
        };
        details.push(("Link".to_string(), value));
    }

    if let Some(log) = &entry.update_log {
        let tail: &str = log.trim_end().lines().last().unwrap_or("");
        if !tail.is_empty() {
            details.push(("Update".to_string(), tail.color(colors::MUTED)));
        }
    }

    details
}

pub fn device_to_details(device: &Device) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![ip_to_detail(&device.ip)];
    details.push(("Role".to_string(), format!("{:?}", device.role).to_lowercase().normal()));

    if let Some(url) = &device.url {
        details.push(("URL".to_string(), url.as_str().normal()));
    }

    for (service, port) in &device.services {
        let value: ColoredString = match port {
            Some(port) => format!("tcp/{port}").color(colors::ACCENT),
            None => "external".color(colors::MUTED),
        };
        details.push((service.clone(), value));
    }

    details
}
