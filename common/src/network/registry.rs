//! # Device Registry
//!
//! The static inventory of watched devices.
//!
//! A registry is built once (either [`DeviceRegistry::builtin`] or loaded from a
//! JSON file) and is read-only afterwards. Construction enforces the
//! invariants every other component relies on:
//! * device names are unique,
//! * at most one device is the router and at most one is the modem.

use std::net::{IpAddr, Ipv4Addr};
use std::path::Path;

use crate::error::RegistryError;
use crate::network::device::{Device, DeviceRole, WAN_STATUS_SERVICE};

#[derive(Debug, Clone, Default)]
pub struct DeviceRegistry {
    devices: Vec<Device>,
}

impl DeviceRegistry {
    /// Validates and wraps a list of devices, preserving declaration order.
    pub fn new(devices: Vec<Device>) -> Result<Self, RegistryError> {
        for (idx, device) in devices.iter().enumerate() {
            let earlier = &devices[..idx];

            if earlier.iter().any(|d| d.name == device.name) {
                return Err(RegistryError::DuplicateDevice(device.name.clone()));
            }

            if device.role != DeviceRole::Host {
                if let Some(first) = earlier.iter().find(|d| d.role == device.role) {
                    return Err(RegistryError::DuplicateRole {
                        role: device.role,
                        first: first.name.clone(),
                        second: device.name.clone(),
                    });
                }
            }
        }

        Ok(Self { devices })
    }

    /// Parses a JSON array of devices.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let devices: Vec<Device> = serde_json::from_str(json)?;
        Self::new(devices)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, RegistryError> {
        let json = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Default home network layout.
    pub fn builtin() -> Self {
        let lan = |d: u8| IpAddr::V4(Ipv4Addr::new(192, 168, 1, d));

        let devices = vec![
            Device::new("Arris Modem", IpAddr::V4(Ipv4Addr::new(192, 168, 100, 1)))
                .with_url("https://192.168.100.1/Login.html")
                .with_service("Web Interface", Some(80))
                .with_role(DeviceRole::Modem),
            Device::new("OpnSense Router", lan(1))
                .with_url("https://192.168.1.1/")
                .with_service(WAN_STATUS_SERVICE, None)
                .with_role(DeviceRole::Router),
            Device::new("Pi-hole DNS", lan(2))
                .with_url("http://192.168.1.2/admin/")
                .with_service("DNS", Some(53))
                .with_service("Web Interface", Some(80)),
            Device::new("TP-Link AP1", lan(3)).with_url("http://192.168.1.3/"),
            Device::new("TP-Link AP2", lan(4)).with_url("http://192.168.1.4/"),
            Device::new("TP-Link Extender", lan(5)).with_url("http://192.168.1.5/"),
            Device::new("Proxmox", lan(21))
                .with_url("https://192.168.1.21:8006/")
                .with_service("Web Interface", Some(8006)),
            Device::new("Plex Server", lan(22)).with_service("Plex Web", Some(32400)),
        ];

        Self { devices }
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn get(&self, name: &str) -> Option<&Device> {
        self.devices.iter().find(|d| d.name == name)
    }

    pub fn by_role(&self, role: DeviceRole) -> Option<&Device> {
        self.devices.iter().find(|d| d.role == role)
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
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
