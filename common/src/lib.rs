//! # lanwatch common
//!
//! Shared vocabulary of the workspace: the device registry, probe and status
//! records, the dashboard [`snapshot`], the update [`poll`] state machine types,
//! typed errors and runtime configuration.
//!
//! Nothing in here performs I/O besides loading a registry file.

pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod poll;
pub mod snapshot;
pub mod status;

#[doc(hidden)]
pub use tracing as __tracing;
