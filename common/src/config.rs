use std::time::Duration;

pub const DEFAULT_CONCURRENCY: usize = 8;
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_POLL_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on devices probed at the same time.
    pub concurrency: usize,
    /// Budget for a single reachability or port check.
    pub probe_timeout: Duration,
    /// Pause between two firmware update status fetches.
    pub poll_interval: Duration,
    /// Wall-clock budget for a firmware update watch.
    pub poll_timeout: Duration,
    /// Router interface whose state feeds the WAN service.
    pub wan_interface: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_timeout: DEFAULT_POLL_TIMEOUT,
            wan_interface: "wan".to_string(),
        }
    }
}
