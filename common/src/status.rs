//! Records handed over by the router and modem clients.

use serde::{Deserialize, Serialize};

/// State of one router interface, as reported by the router API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WanStatus {
    pub status: String,
    pub ip_address: String,
    #[serde(default)]
    pub gateways: Vec<String>,
}

impl WanStatus {
    pub fn is_up(&self) -> bool {
        self.status == "up"
    }
}

/// One reading of the router's firmware update progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateReport {
    pub status: String,
    #[serde(default)]
    pub log: String,
}

impl UpdateReport {
    pub fn new(status: impl Into<String>, log: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            log: log.into(),
        }
    }
}

/// Whatever the modem status page exposed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModemStatus {
    pub connectivity_state: Option<String>,
}

/// Connectivity as shown on the modem's dashboard entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Connectivity {
    State { state: String },
    Unavailable { reason: String },
}

impl From<ModemStatus> for Connectivity {
    fn from(status: ModemStatus) -> Self {
        match status.connectivity_state {
            Some(state) => Connectivity::State { state },
            None => Connectivity::Unavailable {
                reason: "modem reported no connectivity state".to_string(),
            },
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
