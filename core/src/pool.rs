//! Bounded fan-out of device probes.
//!
//! [`WorkerPool::run`] spawns one task per device, lets at most `concurrency`
//! of them probe at the same time and joins every task before returning. The
//! returned map therefore always holds exactly one entry per device, keyed by
//! name, no matter in which order the tasks finished.

use std::collections::BTreeMap;
use std::sync::Arc;

use lanwatch_common::network::device::{Device, ProbeResult};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::network::probe::{self, Prober};

pub struct WorkerPool {
    prober: Arc<dyn Prober>,
    concurrency: usize,
}

impl WorkerPool {
    pub fn new(prober: Arc<dyn Prober>, concurrency: usize) -> Self {
        Self {
            prober,
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probes every device and waits for all of them.
    ///
    /// A task that panics is logged and reported as unreachable; its siblings
    /// are not affected.
    pub async fn run(&self, devices: &[Device]) -> BTreeMap<String, ProbeResult> {
        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut handles: Vec<(String, JoinHandle<ProbeResult>)> = Vec::with_capacity(devices.len());

        for device in devices {
            let name: String = device.name.clone();
            let device: Device = device.clone();
            let prober = Arc::clone(&self.prober);
            let semaphore = Arc::clone(&semaphore);

            let handle = tokio::spawn(async move {
                // Held until the probe is done; the semaphore is never closed.
                let _permit = semaphore.acquire_owned().await;
                probe::probe_device(prober.as_ref(), &device).await
            });
            handles.push((name, handle));
        }

        let mut results: BTreeMap<String, ProbeResult> = BTreeMap::new();
        for (name, handle) in handles {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    error!(device = %name, "probe task failed: {e}");
                    ProbeResult::unreachable(&name)
                }
            };
            results.insert(name, result);
        }

        debug!(
            devices = results.len(),
            online = results.values().filter(|r| r.reachable).count(),
            "probe batch complete"
        );
        results
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
