//! # Dashboard Service
//!
//! Implements the "refresh the dashboard" use case.
//!
//! One [`DashboardService`] is created at start-up and shared by all request
//! handlers. Each [`refresh`](DashboardService::refresh) probes every device,
//! asks the collaborators for their side of the picture and returns a fully
//! built [`Snapshot`].

use std::sync::Arc;

use lanwatch_common::config::Config;
use lanwatch_common::network::registry::DeviceRegistry;
use lanwatch_common::poll::PollState;
use lanwatch_common::snapshot::Snapshot;
use lanwatch_common::status::{Connectivity, WanStatus};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::aggregate::{Aggregator, ExternalFields};
use crate::clients::Collaborators;
use crate::network::probe::Prober;
use crate::poll::PollLoop;
use crate::pool::WorkerPool;
use crate::reboot::{RebootDispatcher, RebootTarget, RebootTicket};

pub struct DashboardService {
    registry: DeviceRegistry,
    config: Config,
    pool: WorkerPool,
    collaborators: Collaborators,
    reboots: RebootDispatcher,
    /// Last WAN status the router reported.
    wan: RwLock<Option<WanStatus>>,
    last_update: Arc<Mutex<Option<PollState>>>,
}

impl DashboardService {
    /// Builds the service and fetches the initial WAN status.
    pub async fn start(
        registry: DeviceRegistry,
        config: Config,
        prober: Arc<dyn Prober>,
        collaborators: Collaborators,
    ) -> Self {
        let service = Self {
            pool: WorkerPool::new(prober, config.concurrency),
            reboots: RebootDispatcher::spawn(collaborators.clone()),
            registry,
            config,
            collaborators,
            wan: RwLock::new(None),
            last_update: Arc::new(Mutex::new(None)),
        };

        service.refresh_wan().await;
        info!(devices = service.registry.len(), "dashboard service ready");
        service
    }

    /// Probes all devices and merges in router and modem data.
    pub async fn refresh(&self) -> Snapshot {
        let (results, wan, firmware_log, modem) = tokio::join!(
            self.pool.run(self.registry.devices()),
            self.refresh_wan(),
            self.fetch_update_log(),
            self.fetch_modem_connectivity(),
        );

        let snapshot = Aggregator::new(&self.registry).build(
            results,
            ExternalFields {
                wan,
                firmware_log,
                modem,
            },
        );
        debug!(
            online = snapshot.online_count(),
            total = snapshot.len(),
            "dashboard refreshed"
        );
        snapshot
    }

    /// WAN status as of the last successful router query.
    pub async fn wan_status(&self) -> Option<WanStatus> {
        self.wan.read().await.clone()
    }

    /// Re-reads the WAN status; keeps the cached one if the router cannot be reached.
    async fn refresh_wan(&self) -> Option<WanStatus> {
        let router = self.collaborators.router.as_ref()?;
        let interface: &str = &self.config.wan_interface;

        match router.interface_status(interface).await {
            Ok(status) => {
                if status.is_none() {
                    warn!(interface, "router does not know the WAN interface");
                }
                *self.wan.write().await = status.clone();
                status
            }
            Err(e) => {
                warn!(interface, "cannot refresh WAN status, using last known: {e}");
                self.wan.read().await.clone()
            }
        }
    }

    async fn fetch_update_log(&self) -> Option<String> {
        let router = self.collaborators.router.as_ref()?;

        match router.update_status().await {
            Ok(report) => Some(report.log),
            Err(e) => {
                warn!("cannot read firmware update log: {e}");
                None
            }
        }
    }

    async fn fetch_modem_connectivity(&self) -> Option<Connectivity> {
        let modem = self.collaborators.modem.as_ref()?;

        let connectivity = match modem.status().await {
            Ok(status) => Connectivity::from(status),
            Err(e) => {
                warn!("cannot read modem status: {e}");
                Connectivity::Unavailable {
                    reason: e.to_string(),
                }
            }
        };
        Some(connectivity)
    }

    /// Starts watching the router's firmware update on its own task.
    ///
    /// Returns `None` when no router client is configured. The final state is
    /// also kept for [`last_update_state`](Self::last_update_state).
    pub fn watch_update(&self) -> Option<JoinHandle<PollState>> {
        let router = self.collaborators.router.clone()?;
        let poller = PollLoop::from_config(&self.config);
        let last_update = Arc::clone(&self.last_update);

        let handle = tokio::spawn(async move {
            let state = poller
                .poll(|| {
                    let router = Arc::clone(&router);
                    async move { router.update_status().await }
                })
                .await;

            info!(status = %state.status, attempts = state.attempts, "firmware update watch ended");
            *last_update.lock().await = Some(state.clone());
            state
        });
        Some(handle)
    }

    pub async fn last_update_state(&self) -> Option<PollState> {
        self.last_update.lock().await.clone()
    }

    /// Queues a reboot; see [`RebootDispatcher`].
    pub fn reboot(&self, target: RebootTarget) -> RebootTicket {
        self.reboots.dispatch(target)
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
