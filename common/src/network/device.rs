//! # Device Model
//!
//! A [`Device`] is one entry of the static inventory the dashboard watches,
//! and a [`ProbeResult`] is what a single probing pass learned about it.

use std::collections::BTreeMap;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Name of the informational service that is resolved from the router's WAN
/// interface status instead of a port probe.
pub const WAN_STATUS_SERVICE: &str = "WAN Status";

/// The part a device plays in the network.
///
/// Collaborator data is attached by role: the firmware log lands on the
/// [`DeviceRole::Router`] entry and the connectivity state on the
/// [`DeviceRole::Modem`] entry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceRole {
    #[default]
    Host,
    Router,
    Modem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub name: String,
    pub ip: IpAddr,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Service name to TCP port. A `None` port marks an informational service
    /// that is filled in from an external source.
    #[serde(default)]
    pub services: BTreeMap<String, Option<u16>>,
    #[serde(default)]
    pub role: DeviceRole,
}

impl Device {
    pub fn new(name: impl Into<String>, ip: IpAddr) -> Self {
        Self {
            name: name.into(),
            ip,
            url: None,
            services: BTreeMap::new(),
            role: DeviceRole::Host,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_service(mut self, name: impl Into<String>, port: Option<u16>) -> Self {
        self.services.insert(name.into(), port);
        self
    }

    pub fn with_role(mut self, role: DeviceRole) -> Self {
        self.role = role;
        self
    }

    /// Services backed by a real TCP port.
    pub fn port_services(&self) -> impl Iterator<Item = (&str, u16)> {
        self.services
            .iter()
            .filter_map(|(name, port)| port.map(|p| (name.as_str(), p)))
    }

    /// Whether the device carries the port-less WAN summary service.
    pub fn has_wan_service(&self) -> bool {
        matches!(self.services.get(WAN_STATUS_SERVICE), Some(None))
    }
}

/// Outcome of probing one device.
///
/// `services` only ever holds entries when `reachable` is true, and its keys
/// are always a subset of the device's declared services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbeResult {
    pub device: String,
    pub reachable: bool,
    pub services: BTreeMap<String, bool>,
}

impl ProbeResult {
    pub fn unreachable(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            reachable: false,
            services: BTreeMap::new(),
        }
    }

    pub fn reachable(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            reachable: true,
            services: BTreeMap::new(),
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
