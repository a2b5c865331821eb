//! Contracts for the router and modem clients.
//!
//! The dashboard never talks HTTP or scrapes pages itself; it depends on these
//! traits and leaves the concrete clients to the embedding application.

use std::sync::Arc;

use async_trait::async_trait;
use lanwatch_common::error::ClientError;
use lanwatch_common::status::{ModemStatus, UpdateReport, WanStatus};

#[async_trait]
pub trait ModemClient: Send + Sync {
    async fn status(&self) -> Result<ModemStatus, ClientError>;

    async fn reboot(&self) -> Result<(), ClientError>;
}

#[async_trait]
pub trait RouterClient: Send + Sync {
    /// State of the interface called `name`, or `None` if the router has no
    /// such interface.
    async fn interface_status(&self, name: &str) -> Result<Option<WanStatus>, ClientError>;

    async fn reboot(&self) -> Result<(), ClientError>;

    /// One reading of the firmware update progress.
    async fn update_status(&self) -> Result<UpdateReport, ClientError>;
}

/// The clients available to a dashboard. Either may be missing.
#[derive(Clone, Default)]
pub struct Collaborators {
    pub router: Option<Arc<dyn RouterClient>>,
    pub modem: Option<Arc<dyn ModemClient>>,
}

impl Collaborators {
    pub fn new(router: Arc<dyn RouterClient>, modem: Arc<dyn ModemClient>) -> Self {
        Self {
            router: Some(router),
            modem: Some(modem),
        }
    }
}
