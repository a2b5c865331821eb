#![cfg(test)]
use std::collections::HashSet;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use lanwatch_common::config::Config;
use lanwatch_common::error::ClientError;
use lanwatch_common::network::device::{Device, DeviceRole, WAN_STATUS_SERVICE};
use lanwatch_common::network::registry::DeviceRegistry;
use lanwatch_common::poll::PollStatus;
use lanwatch_common::status::{Connectivity, ModemStatus, UpdateReport};
use lanwatch_core::clients::Collaborators;
use lanwatch_core::dashboard::DashboardService;
use lanwatch_core::reboot::RebootTarget;
use tokio::net::TcpListener;

use crate::fakes::{wan_up, FakeModem, FakeRouter, LoopbackProber};

const ROUTER: &str = "OpnSense Router";
const MODEM: &str = "Arris Modem";

fn loopback(last: u8) -> IpAddr {
    IpAddr::V4(Ipv4Addr::new(127, 0, 0, last))
}

fn connected_modem() -> FakeModem {
    FakeModem {
        status: Ok(ModemStatus {
            connectivity_state: Some("Connected".to_string()),
        }),
    }
}

fn fast_poll_config() -> Config {
    Config {
        poll_interval: Duration::ZERO,
        poll_timeout: Duration::from_secs(5),
        ..Config::default()
    }
}

async fn builtin_service(
    prober: LoopbackProber,
    router: FakeRouter,
    modem: FakeModem,
) -> (DashboardService, Arc<FakeRouter>) {
    let router = Arc::new(router);
    let service = DashboardService::start(
        DeviceRegistry::builtin(),
        fast_poll_config(),
        Arc::new(prober),
        Collaborators {
            router: Some(router.clone()),
            modem: Some(Arc::new(modem)),
        },
    )
    .await;
    (service, router)
}

/// Every builtin device is marked down so that no real connections leave the
/// machine; only the collaborator data is asserted.
fn all_builtin_down() -> LoopbackProber {
    LoopbackProber {
        down: DeviceRegistry::builtin().devices().iter().map(|d| d.ip).collect(),
        panics: HashSet::new(),
    }
}

#[tokio::test]
async fn refresh_checks_real_ports_on_loopback() {
    let open = TcpListener::bind((loopback(1), 0)).await.unwrap();
    let open_port = open.local_addr().unwrap().port();
    let closed = TcpListener::bind((loopback(1), 0)).await.unwrap();
    let closed_port = closed.local_addr().unwrap().port();
    drop(closed);

    let registry = DeviceRegistry::new(vec![
        Device::new("gateway", loopback(1))
            .with_service("Admin", Some(open_port))
            .with_service("Legacy", Some(closed_port))
            .with_service(WAN_STATUS_SERVICE, None)
            .with_role(DeviceRole::Router),
        Device::new("printer", loopback(2)).with_service("IPP", Some(631)),
    ])
    .unwrap();

    let prober = LoopbackProber {
        down: HashSet::from([loopback(2)]),
        panics: HashSet::new(),
    };
    let router = FakeRouter::new(Some(wan_up()))
        .with_updates(vec![Ok(UpdateReport::new("done", "fetching\n***DONE***"))]);

    let service = DashboardService::start(
        registry,
        Config::default(),
        Arc::new(prober),
        Collaborators {
            router: Some(Arc::new(router)),
            modem: None,
        },
    )
    .await;

    let snapshot = service.refresh().await;
    assert_eq!(snapshot.len(), 2);

    let gateway = snapshot.get("gateway").unwrap();
    assert!(gateway.reachable);
    assert_eq!(gateway.services.get("Admin"), Some(&true));
    assert_eq!(gateway.services.get("Legacy"), Some(&false));
    assert_eq!(gateway.services.get(WAN_STATUS_SERVICE), Some(&true));
    assert_eq!(gateway.wan_details, Some(wan_up()));
    assert_eq!(gateway.update_log.as_deref(), Some("fetching\n***DONE***"));

    let printer = snapshot.get("printer").unwrap();
    assert!(!printer.reachable);
    assert!(printer.services.is_empty());

    drop(open);
}

#[tokio::test]
async fn collaborator_data_lands_on_builtin_roles() {
    let router = FakeRouter::new(Some(wan_up()))
        .with_updates(vec![Ok(UpdateReport::new("running", "downloading base"))]);
    let (service, _) = builtin_service(all_builtin_down(), router, connected_modem()).await;

    let snapshot = service.refresh().await;

    assert_eq!(snapshot.len(), 8);
    assert_eq!(snapshot.online_count(), 0);
    for entry in snapshot.entries() {
        assert!(entry.services.is_empty(), "{} is offline but has services", entry.name);
    }

    let router = snapshot.get(ROUTER).unwrap();
    assert_eq!(router.update_log.as_deref(), Some("downloading base"));
    assert!(router.connectivity.is_none());

    let modem = snapshot.get(MODEM).unwrap();
    assert_eq!(
        modem.connectivity,
        Some(Connectivity::State {
            state: "Connected".to_string()
        })
    );
    assert!(modem.update_log.is_none());
}

#[tokio::test]
async fn failing_collaborators_degrade_without_failing_refresh() {
    let router = FakeRouter::new(None)
        .with_updates(vec![Err(ClientError::Transport("no route to host".to_string()))]);
    let modem = FakeModem {
        status: Err(ClientError::Malformed("status table missing".to_string())),
    };
    let (service, _) = builtin_service(all_builtin_down(), router, modem).await;

    let snapshot = service.refresh().await;

    assert!(snapshot.get(ROUTER).unwrap().update_log.is_none());
    match &snapshot.get(MODEM).unwrap().connectivity {
        Some(Connectivity::Unavailable { reason }) => assert!(reason.contains("status table missing")),
        other => panic!("unexpected connectivity {other:?}"),
    }
}

#[tokio::test]
async fn panicking_probe_still_yields_full_snapshot() {
    let devices: Vec<Device> = (1..=50)
        .map(|i| Device::new(format!("host-{i:02}"), IpAddr::V4(Ipv4Addr::new(10, 9, 0, i))))
        .collect();
    let registry = DeviceRegistry::new(devices).unwrap();

    let prober = LoopbackProber {
        down: HashSet::new(),
        panics: HashSet::from([IpAddr::V4(Ipv4Addr::new(10, 9, 0, 17))]),
    };
    let service = DashboardService::start(
        registry,
        Config::default(),
        Arc::new(prober),
        Collaborators::default(),
    )
    .await;

    let snapshot = service.refresh().await;

    assert_eq!(snapshot.len(), 50);
    assert_eq!(snapshot.online_count(), 49);
    assert!(!snapshot.get("host-17").unwrap().reachable);
}

#[tokio::test]
async fn update_watch_reaches_done_and_is_remembered() {
    let router = FakeRouter::new(Some(wan_up())).with_updates(vec![
        Ok(UpdateReport::new("running", "fetching")),
        Ok(UpdateReport::new("done", "fetching\nextracting")),
        Ok(UpdateReport::new("done", "fetching\nextracting\n***DONE***")),
    ]);
    let (service, router) = builtin_service(all_builtin_down(), router, connected_modem()).await;
    assert!(service.last_update_state().await.is_none());

    let state = service.watch_update().unwrap().await.unwrap();

    assert_eq!(state.status, PollStatus::Done);
    assert_eq!(state.attempts, 3);
    assert_eq!(router.update_calls.load(Ordering::SeqCst), 3);
    assert_eq!(service.last_update_state().await, Some(state));
}

#[tokio::test]
async fn update_watch_surfaces_transport_error() {
    let router = FakeRouter::new(Some(wan_up()))
        .with_updates(vec![Err(ClientError::Transport("tls handshake failed".to_string()))]);
    let (service, _) = builtin_service(all_builtin_down(), router, connected_modem()).await;

    let state = service.watch_update().unwrap().await.unwrap();

    assert_eq!(state.status, PollStatus::Error);
    assert_eq!(state.attempts, 1);
}

#[tokio::test]
async fn update_watch_needs_a_router() {
    let service = DashboardService::start(
        DeviceRegistry::builtin(),
        Config::default(),
        Arc::new(all_builtin_down()),
        Collaborators::default(),
    )
    .await;

    assert!(service.watch_update().is_none());
}

#[tokio::test]
async fn reboots_report_outcomes_per_device() {
    let (service, router) =
        builtin_service(all_builtin_down(), FakeRouter::new(None), connected_modem()).await;

    let modem = service.reboot(RebootTarget::Modem);
    let router_ticket = service.reboot(RebootTarget::Router);

    assert!(matches!(modem.outcome().await, Err(ClientError::Rejected(_))));
    assert_eq!(router_ticket.outcome().await, Ok(()));
    assert_eq!(router.reboots.load(Ordering::SeqCst), 1);
}
