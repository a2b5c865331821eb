use std::collections::{HashSet, VecDeque};
use std::net::IpAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lanwatch_common::error::ClientError;
use lanwatch_common::status::{ModemStatus, UpdateReport, WanStatus};
use lanwatch_core::clients::{ModemClient, RouterClient};
use lanwatch_core::network::probe::{self, Prober};

/// Treats every address as reachable except `down`, and checks ports for real.
#[derive(Default)]
pub struct LoopbackProber {
    pub down: HashSet<IpAddr>,
    pub panics: HashSet<IpAddr>,
}

#[async_trait]
impl Prober for LoopbackProber {
    async fn reachable(&self, ip: IpAddr) -> bool {
        if self.panics.contains(&ip) {
            panic!("prober crashed on {ip}");
        }
        !self.down.contains(&ip)
    }

    async fn port_open(&self, ip: IpAddr, port: u16) -> bool {
        probe::port_open(ip, port, Duration::from_millis(500)).await
    }
}

pub struct FakeRouter {
    pub wan: Option<WanStatus>,
    pub updates: Mutex<VecDeque<Result<UpdateReport, ClientError>>>,
    pub update_calls: AtomicU32,
    pub reboots: AtomicU32,
}

impl FakeRouter {
    pub fn new(wan: Option<WanStatus>) -> Self {
        Self {
            wan,
            updates: Mutex::new(VecDeque::new()),
            update_calls: AtomicU32::new(0),
            reboots: AtomicU32::new(0),
        }
    }

    pub fn with_updates(self, updates: Vec<Result<UpdateReport, ClientError>>) -> Self {
        *self.updates.lock().unwrap() = updates.into();
        self
    }
}

#[async_trait]
impl RouterClient for FakeRouter {
    async fn interface_status(&self, name: &str) -> Result<Option<WanStatus>, ClientError> {
        match name {
            "wan" => Ok(self.wan.clone()),
            _ => Ok(None),
        }
    }

    async fn reboot(&self) -> Result<(), ClientError> {
        self.reboots.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Replays the queued answers; once they run out the last one sticks.
    async fn update_status(&self) -> Result<UpdateReport, ClientError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut updates = self.updates.lock().unwrap();
        if updates.len() > 1 {
            updates.pop_front().unwrap()
        } else {
            updates
                .front()
                .cloned()
                .unwrap_or_else(|| Ok(UpdateReport::new("none", "")))
        }
    }
}

pub struct FakeModem {
    pub status: Result<ModemStatus, ClientError>,
}

#[async_trait]
impl ModemClient for FakeModem {
    async fn status(&self) -> Result<ModemStatus, ClientError> {
        self.status.clone()
    }

    async fn reboot(&self) -> Result<(), ClientError> {
        Err(ClientError::Rejected("alert dialog did not appear".to_string()))
    }
}

pub fn wan_up() -> WanStatus {
    WanStatus {
        status: "up".to_string(),
        ip_address: "203.0.113.7".to_string(),
        gateways: vec!["203.0.113.1".to_string()],
    }
}
