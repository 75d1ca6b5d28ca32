//! Planner configuration.

use chrono::Duration;

/// Configuration parameters for path and ETA queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Maximum number of segments in a returned path.
    /// `None` searches the whole network.
    pub max_hops: Option<usize>,

    /// Age after which telemetry is flagged as stale (seconds).
    /// `None` never flags telemetry as stale.
    pub stale_after_secs: Option<i64>,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(max_hops: Option<usize>, stale_after_secs: Option<i64>) -> Self {
        Self {
            max_hops,
            stale_after_secs,
        }
    }

    /// Returns the staleness threshold as a Duration.
    ///
    /// A threshold too large to represent never flags telemetry as stale.
    pub fn stale_after(&self) -> Option<Duration> {
        self.stale_after_secs.and_then(Duration::try_seconds)
    }
}
