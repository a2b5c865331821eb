//! # Update Poll State
//!
//! States of the firmware update watch.
//!
//! ```text
//! Pending ──► InProgress ──► Done
//!    │            │  ▲
//!    │            └──┘ (retry)
//!    ├────────────┴────────► TimedOut
//!    └────────────┴────────► Error
//! ```
//!
//! `Done`, `TimedOut` and `Error` are terminal. [`PollState::advance`] never
//! leaves a terminal state.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PollStatus {
    Pending,
    InProgress,
    Done,
    TimedOut,
    Error,
}

impl PollStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, PollStatus::Done | PollStatus::TimedOut | PollStatus::Error)
    }
}

impl fmt::Display for PollStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PollStatus::Pending => "pending",
            PollStatus::InProgress => "in progress",
            PollStatus::Done => "done",
            PollStatus::TimedOut => "timed out",
            PollStatus::Error => "error",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PollState {
    pub status: PollStatus,
    /// Last log seen from the remote operation.
    pub log: String,
    pub elapsed: Duration,
    /// Number of fetches performed.
    pub attempts: u32,
    /// Transport failure that ended the watch, when `status` is `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Default for PollState {
    fn default() -> Self {
        Self::new()
    }
}

impl PollState {
    pub fn new() -> Self {
        Self {
            status: PollStatus::Pending,
            log: String::new(),
            elapsed: Duration::ZERO,
            attempts: 0,
            error: None,
        }
    }

    /// Moves to `next`. Returns `false` and leaves the state untouched when
    /// the current status is already terminal.
    pub fn advance(&mut self, next: PollStatus) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        self.status = next;
        true
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
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
