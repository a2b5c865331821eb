use std::path::PathBuf;

use thiserror::Error;

use crate::network::device::DeviceRole;

/// Reasons a device registry is rejected at load time.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("device name '{0}' is declared more than once")]
    DuplicateDevice(String),

    #[error("devices '{first}' and '{second}' both claim the {role:?} role")]
    DuplicateRole {
        role: DeviceRole,
        first: String,
        second: String,
    },

    #[error("cannot read registry file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("registry is not valid JSON")]
    Parse(#[from] serde_json::Error),
}

/// Classified failure of a call into the modem or router client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The endpoint could not be reached at all.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The endpoint answered but refused the command.
    #[error("request rejected: {0}")]
    Rejected(String),

    /// The endpoint answered with something that could not be understood.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The request was dropped before it produced an answer.
    #[error("request aborted: {0}")]
    Aborted(String),

    /// No client is configured for the device.
    #[error("no client configured for {0}")]
    Unavailable(String),
}
