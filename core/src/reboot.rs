//! Reboot queue.
//!
//! Reboots are slow and may never answer, so a request handler only enqueues
//! them. A single background worker runs the queued reboots one at a time,
//! logs how each one went and reports the outcome on a [`RebootTicket`] that
//! the caller is free to await or drop.

use std::fmt;

use lanwatch_common::error::ClientError;
use lanwatch_common::{error, success};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::clients::Collaborators;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RebootTarget {
    Modem,
    Router,
}

impl fmt::Display for RebootTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RebootTarget::Modem => f.write_str("modem"),
            RebootTarget::Router => f.write_str("router"),
        }
    }
}

pub type RebootOutcome = Result<(), ClientError>;

struct RebootRequest {
    target: RebootTarget,
    reply: oneshot::Sender<RebootOutcome>,
}

/// Handle on a queued reboot.
pub struct RebootTicket {
    target: RebootTarget,
    rx: oneshot::Receiver<RebootOutcome>,
}

impl RebootTicket {
    pub fn target(&self) -> RebootTarget {
        self.target
    }

    /// Waits for the worker to report on this reboot.
    pub async fn outcome(self) -> RebootOutcome {
        self.rx.await.unwrap_or_else(|_| {
            Err(ClientError::Aborted(format!(
                "{} reboot was dropped before it ran",
                self.target
            )))
        })
    }
}

#[derive(Clone)]
pub struct RebootDispatcher {
    tx: mpsc::UnboundedSender<RebootRequest>,
}

impl RebootDispatcher {
    /// Starts the worker on the current tokio runtime.
    pub fn spawn(collaborators: Collaborators) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run_worker(rx, collaborators));
        Self { tx }
    }

    /// Queues a reboot of `target` and returns without waiting for it.
    pub fn dispatch(&self, target: RebootTarget) -> RebootTicket {
        let (reply, rx) = oneshot::channel();

        if let Err(mpsc::error::SendError(request)) = self.tx.send(RebootRequest { target, reply }) {
            let _ = request
                .reply
                .send(Err(ClientError::Aborted("reboot worker is not running".to_string())));
        }

        debug!(%target, "reboot queued");
        RebootTicket { target, rx }
    }
}

async fn run_worker(mut rx: mpsc::UnboundedReceiver<RebootRequest>, collaborators: Collaborators) {
    while let Some(RebootRequest { target, reply }) = rx.recv().await {
        let outcome: RebootOutcome = execute(target, &collaborators).await;

        match &outcome {
            Ok(()) => success!("{target} accepted the reboot command"),
            Err(e) => error!("{target} reboot failed: {e}"),
        }

        // The ticket may already be gone.
        let _ = reply.send(outcome);
    }
    debug!("reboot queue closed");
}

/// Runs one reboot in its own task so a panicking client cannot take the
/// worker down with it.
async fn execute(target: RebootTarget, collaborators: &Collaborators) -> RebootOutcome {
    let handle: JoinHandle<RebootOutcome> = match target {
        RebootTarget::Modem => {
            let Some(modem) = collaborators.modem.clone() else {
                return Err(ClientError::Unavailable(target.to_string()));
            };
            tokio::spawn(async move { modem.reboot().await })
        }
        RebootTarget::Router => {
            let Some(router) = collaborators.router.clone() else {
                return Err(ClientError::Unavailable(target.to_string()));
            };
            tokio::spawn(async move { router.reboot().await })
        }
    };

    handle
        .await
        .unwrap_or_else(|e| Err(ClientError::Aborted(format!("{target} reboot task failed: {e}"))))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
