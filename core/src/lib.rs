//! # lanwatch core
//!
//! The engine behind the dashboard:
//!
//! * **[`network::probe`]**: single reachability and TCP port checks.
//! * **[`pool`]**: bounded fan-out of one probe task per device, joined before returning.
//! * **[`aggregate`]**: merges probe results and collaborator data into a [`Snapshot`](lanwatch_common::snapshot::Snapshot).
//! * **[`poll`]**: waits for the router's firmware update to reach a terminal state.
//! * **[`dashboard`]**: wires the above into one refresh per request.
//!
//! Router and modem access is abstracted behind the traits in [`clients`];
//! reboots go through the queue in [`reboot`].

pub mod aggregate;
pub mod clients;
pub mod dashboard;
pub mod network;
pub mod poll;
pub mod pool;
pub mod reboot;
