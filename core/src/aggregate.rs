//! # Snapshot Aggregation
//!
//! Turns a complete batch of probe results and the data fetched from the
//! router and modem into one [`Snapshot`].
//!
//! The merge is keyed by device name and walks the registry, so the outcome
//! does not depend on the order in which probes finished. It performs no I/O.
//! Being handed a batch that does not match the registry is a bug in the
//! caller and panics.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use lanwatch_common::network::device::{DeviceRole, ProbeResult, WAN_STATUS_SERVICE};
use lanwatch_common::network::registry::DeviceRegistry;
use lanwatch_common::snapshot::{DeviceEntry, Snapshot};
use lanwatch_common::status::{Connectivity, WanStatus};

/// Data supplied by collaborators rather than probes.
#[derive(Debug, Clone, Default)]
pub struct ExternalFields {
    pub wan: Option<WanStatus>,
    pub firmware_log: Option<String>,
    pub modem: Option<Connectivity>,
}

pub struct Aggregator<'a> {
    registry: &'a DeviceRegistry,
}

impl<'a> Aggregator<'a> {
    pub fn new(registry: &'a DeviceRegistry) -> Self {
        Self { registry }
    }

    pub fn build(&self, results: BTreeMap<String, ProbeResult>, external: ExternalFields) -> Snapshot {
        self.build_at(results, external, Utc::now())
    }

    /// Same as [`build`](Self::build) with an explicit timestamp.
    ///
    /// # Panics
    /// If `results` lacks an entry for a registered device or holds one for
    /// a device the registry does not know.
    pub fn build_at(
        &self,
        mut results: BTreeMap<String, ProbeResult>,
        external: ExternalFields,
        built_at: DateTime<Utc>,
    ) -> Snapshot {
        let mut entries: BTreeMap<String, DeviceEntry> = BTreeMap::new();

        for device in self.registry.devices() {
            let probe: ProbeResult = results.remove(&device.name).unwrap_or_else(|| {
                panic!("no probe result for registered device '{}'", device.name)
            });

            let mut entry = DeviceEntry {
                name: device.name.clone(),
                ip: device.ip,
                url: device.url.clone(),
                reachable: probe.reachable,
                services: if probe.reachable { probe.services } else { BTreeMap::new() },
                wan_details: None,
                update_log: None,
                connectivity: None,
            };

            if entry.reachable && device.has_wan_service() {
                let wan_up: bool = external.wan.as_ref().is_some_and(WanStatus::is_up);
                entry.services.insert(WAN_STATUS_SERVICE.to_string(), wan_up);
                entry.wan_details = external.wan.clone();
            }

            match device.role {
                DeviceRole::Router => entry.update_log = external.firmware_log.clone(),
                DeviceRole::Modem => entry.connectivity = external.modem.clone(),
                DeviceRole::Host => {}
            }

            entries.insert(device.name.clone(), entry);
        }

        if let Some(stray) = results.keys().next() {
            panic!("probe result for unregistered device '{stray}'");
        }

        Snapshot::new(entries, built_at)
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

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTER: &str = "OpnSense Router";
    const MODEM: &str = "Arris Modem";

    fn wan(status: &str) -> WanStatus {
        WanStatus {
            status: status.to_string(),
            ip_address: "203.0.113.7".to_string(),
            gateways: vec!["203.0.113.1".to_string()],
        }
    }

    /// Every builtin device online with its port services open.
    fn all_online(registry: &DeviceRegistry) -> BTreeMap<String, ProbeResult> {
        registry
            .devices()
            .iter()
            .map(|device| {
                let mut result = ProbeResult::reachable(&device.name);
                for (service, _) in device.port_services() {
                    result.services.insert(service.to_string(), true);
                }
                (device.name.clone(), result)
            })
            .collect()
    }

    #[test]
    fn wan_up_marks_router_service_and_attaches_record() {
        let registry = DeviceRegistry::builtin();
        let external = ExternalFields { wan: Some(wan("up")), ..Default::default() };

        let snapshot = Aggregator::new(&registry).build(all_online(&registry), external);
        let router = snapshot.get(ROUTER).unwrap();

        assert_eq!(router.services.get(WAN_STATUS_SERVICE), Some(&true));
        assert_eq!(router.wan_details, Some(wan("up")));
    }

    #[test]
    fn wan_down_or_unknown_marks_service_false() {
        let registry = DeviceRegistry::builtin();

        for external_wan in [Some(wan("down")), None] {
            let external = ExternalFields { wan: external_wan.clone(), ..Default::default() };
            let snapshot = Aggregator::new(&registry).build(all_online(&registry), external);
            let router = snapshot.get(ROUTER).unwrap();

            assert_eq!(router.services.get(WAN_STATUS_SERVICE), Some(&false));
            assert_eq!(router.wan_details, external_wan);
        }
    }

    #[test]
    fn unreachable_router_gets_log_but_no_services() {
        let registry = DeviceRegistry::builtin();
        let mut results = all_online(&registry);
        results.insert(ROUTER.to_string(), ProbeResult::unreachable(ROUTER));

        let external = ExternalFields {
            wan: Some(wan("up")),
            firmware_log: Some("checking for updates\n***DONE***".to_string()),
            modem: None,
        };
        let snapshot = Aggregator::new(&registry).build(results, external);
        let router = snapshot.get(ROUTER).unwrap();

        assert!(!router.reachable);
        assert!(router.services.is_empty());
        assert!(router.wan_details.is_none());
        assert_eq!(router.update_log.as_deref(), Some("checking for updates\n***DONE***"));
    }

    #[test]
    fn collaborator_fields_land_on_their_role_only() {
        let registry = DeviceRegistry::builtin();
        let external = ExternalFields {
            wan: Some(wan("up")),
            firmware_log: Some("log".to_string()),
            modem: Some(Connectivity::State { state: "Connected".to_string() }),
        };

        let snapshot = Aggregator::new(&registry).build(all_online(&registry), external);

        assert_eq!(snapshot.len(), registry.len());
        for entry in snapshot.entries() {
            assert_eq!(entry.update_log.is_some(), entry.name == ROUTER);
            assert_eq!(entry.wan_details.is_some(), entry.name == ROUTER);
            assert_eq!(entry.connectivity.is_some(), entry.name == MODEM);
        }
    }

    #[test]
    fn merge_is_independent_of_result_order() {
        let registry = DeviceRegistry::builtin();
        let built_at = Utc::now();

        let forward: BTreeMap<String, ProbeResult> = all_online(&registry);
        let mut reversed: BTreeMap<String, ProbeResult> = BTreeMap::new();
        for (name, result) in all_online(&registry).into_iter().rev() {
            reversed.insert(name, result);
        }

        let aggregator = Aggregator::new(&registry);
        let a = aggregator.build_at(forward, ExternalFields::default(), built_at);
        let b = aggregator.build_at(reversed, ExternalFields::default(), built_at);
        assert_eq!(a, b);
    }

    #[test]
    #[should_panic(expected = "no probe result for registered device")]
    fn missing_device_is_fatal() {
        let registry = DeviceRegistry::builtin();
        let mut results = all_online(&registry);
        results.remove("Proxmox");

        Aggregator::new(&registry).build(results, ExternalFields::default());
    }

    #[test]
    #[should_panic(expected = "unregistered device")]
    fn stray_result_is_fatal() {
        let registry = DeviceRegistry::builtin();
        let mut results = all_online(&registry);
        results.insert("Toaster".to_string(), ProbeResult::unreachable("Toaster"));

        Aggregator::new(&registry).build(results, ExternalFields::default());
    }
}
