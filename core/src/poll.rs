//! # Firmware Update Watch
//!
//! Repeatedly asks the router how its firmware update is doing until the
//! operation finishes, the transport fails or the wall-clock budget runs out.
//!
//! An update only counts as finished once the status reads `done` **and** the
//! log carries [`DONE_SENTINEL`]. The status flips before the log has been
//! fully written, so the status alone is not trusted.

use std::future::Future;
use std::time::Duration;

use lanwatch_common::config::Config;
use lanwatch_common::error::ClientError;
use lanwatch_common::poll::{PollState, PollStatus};
use lanwatch_common::status::UpdateReport;
use tokio::time::Instant;
use tracing::{debug, info, warn};

/// Marker the router appends to the update log once it is really done.
pub const DONE_SENTINEL: &str = "***DONE***";

#[derive(Debug, Clone, Copy)]
pub struct PollLoop {
    interval: Duration,
    timeout: Duration,
}

impl PollLoop {
    pub fn new(interval: Duration, timeout: Duration) -> Self {
        Self { interval, timeout }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.poll_interval, cfg.poll_timeout)
    }

    /// Drives `fetch` until a terminal state is reached.
    ///
    /// A transport error ends the watch immediately with [`PollStatus::Error`].
    /// Running past the timeout ends it with [`PollStatus::TimedOut`] and the
    /// last log that was seen.
    pub async fn poll<F, Fut>(&self, mut fetch: F) -> PollState
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<UpdateReport, ClientError>>,
    {
        let started: Instant = Instant::now();
        let mut state: PollState = PollState::new();

        loop {
            state.attempts += 1;
            let outcome = fetch().await;
            state.elapsed = started.elapsed();

            let UpdateReport { status, log } = match outcome {
                Ok(report) => report,
                Err(e) => {
                    warn!(attempt = state.attempts, "update status unavailable: {e}");
                    state.error = Some(e.to_string());
                    state.advance(PollStatus::Error);
                    return state;
                }
            };
            state.log = log;

            if is_finished(&status, &state.log) {
                state.advance(PollStatus::Done);
                info!(attempts = state.attempts, elapsed = ?state.elapsed, "firmware update finished");
                return state;
            }

            if state.elapsed > self.timeout {
                state.advance(PollStatus::TimedOut);
                warn!(attempts = state.attempts, "gave up waiting for firmware update after {:?}", self.timeout);
                return state;
            }

            state.advance(PollStatus::InProgress);
            debug!(%status, tail = last_line(&state.log), "firmware update still running");

            tokio::time::sleep(self.interval).await;
        }
    }
}

fn is_finished(status: &str, log: &str) -> bool {
    status.eq_ignore_ascii_case("done") && log.contains(DONE_SENTINEL)
}

fn last_line(log: &str) -> &str {
    log.trim_end().lines().last().unwrap_or("<no log>")
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
