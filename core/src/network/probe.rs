//! Single-device checks.
//!
//! Every check is one attempt under a short timeout and answers with a plain
//! `bool`. Timeouts, refusals, missing binaries and permission problems all
//! read as "not available"; the next refresh gets another chance.

use std::net::{IpAddr, SocketAddr};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use lanwatch_common::config::DEFAULT_PROBE_TIMEOUT;
use lanwatch_common::network::device::{Device, ProbeResult};
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::{debug, trace};

/// Defines how a device is checked.
#[async_trait]
pub trait Prober: Send + Sync {
    /// One reachability attempt against `ip`.
    async fn reachable(&self, ip: IpAddr) -> bool;

    /// Whether a TCP connection to `ip:port` can be established.
    async fn port_open(&self, ip: IpAddr, port: u16) -> bool;
}

/// Probes the real network: one ICMP echo through the system `ping` binary
/// and plain TCP connects.
#[derive(Debug, Clone)]
pub struct SystemProber {
    timeout: Duration,
}

impl SystemProber {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemProber {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

#[async_trait]
impl Prober for SystemProber {
    async fn reachable(&self, ip: IpAddr) -> bool {
        ping_once(ip, self.timeout).await
    }

    async fn port_open(&self, ip: IpAddr, port: u16) -> bool {
        port_open(ip, port, self.timeout).await
    }
}

/// Checks `device` and collects the state of its port-backed services.
///
/// Services are only looked at once the device answered; port-less services
/// are left out for the aggregator to fill.
pub async fn probe_device(prober: &dyn Prober, device: &Device) -> ProbeResult {
    if !prober.reachable(device.ip).await {
        debug!(device = %device.name, ip = %device.ip, "device unreachable");
        return ProbeResult::unreachable(&device.name);
    }

    let mut result = ProbeResult::reachable(&device.name);
    for (service, port) in device.port_services() {
        let open = prober.port_open(device.ip, port).await;
        trace!(device = %device.name, service, port, open, "service checked");
        result.services.insert(service.to_string(), open);
    }
    result
}

/// Sends a single echo request and waits at most `wait` for the reply.
///
/// `ping` only takes whole seconds, so the process is killed once `wait` runs
/// out even if its own timer has not fired yet.
pub async fn ping_once(ip: IpAddr, wait: Duration) -> bool {
    let mut child = match Command::new("ping")
        .args(ping_args(ip, wait))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
    {
        Ok(child) => child,
        Err(e) => {
            debug!(%ip, "cannot run ping: {e}");
            return false;
        }
    };

    match timeout(wait, child.wait()).await {
        Ok(Ok(status)) => status.success(),
        Ok(Err(e)) => {
            debug!(%ip, "ping did not finish cleanly: {e}");
            false
        }
        Err(_elapsed) => {
            debug!(%ip, "ping overran its deadline");
            false
        }
    }
}

fn ping_args(ip: IpAddr, wait: Duration) -> Vec<String> {
    let secs: u64 = wait.as_secs().max(1);

    // BSD ping takes the reply wait in milliseconds
    #[cfg(target_os = "macos")]
    let wait_arg: String = (secs * 1_000).to_string();
    #[cfg(not(target_os = "macos"))]
    let wait_arg: String = secs.to_string();

    vec![
        "-c".to_string(),
        "1".to_string(),
        "-W".to_string(),
        wait_arg,
        ip.to_string(),
    ]
}

/// Connects to `ip:port`, closes the connection right away and reports
/// whether the connect succeeded within `wait`.
pub async fn port_open(ip: IpAddr, port: u16, wait: Duration) -> bool {
    let socket_addr: SocketAddr = SocketAddr::new(ip, port);

    match timeout(wait, TcpStream::connect(socket_addr)).await {
        Ok(Ok(mut stream)) => {
            let _ = stream.shutdown().await;
            true
        }
        Ok(Err(e)) => {
            trace!(%socket_addr, "connect failed: {e}");
            false
        }
        Err(_elapsed) => {
            trace!(%socket_addr, "connect timed out");
            false
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
