//! Run metrics and structured logging setup.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Counters shared by every worker of a run.
pub struct Metrics {
    builds: AtomicU64,
    collisions: AtomicU64,
    mutations: AtomicU64,
    offspring: AtomicU64,
    start_time: Instant,
}

/// Point-in-time copy of [`Metrics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub builds: u64,
    pub collisions: u64,
    pub mutations: u64,
    pub offspring: u64,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builds: AtomicU64::new(0),
            collisions: AtomicU64::new(0),
            mutations: AtomicU64::new(0),
            offspring: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_build(&self) {
        self.builds.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_collision(&self) {
        self.collisions.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_mutations(&self, count: usize) {
        self.mutations.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_offspring(&self) {
        self.offspring.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            builds: self.builds.load(Ordering::Relaxed),
            collisions: self.collisions.load(Ordering::Relaxed),
            mutations: self.mutations.load(Ordering::Relaxed),
            offspring: self.offspring.load(Ordering::Relaxed),
        }
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs a summary of all metrics.
    pub fn log_summary(&self) {
        let snap = self.snapshot();
        tracing::info!(
            builds = snap.builds,
            collisions = snap.collisions,
            mutations = snap.mutations,
            offspring = snap.offspring,
            elapsed_ms = self.elapsed().as_millis() as u64,
            "Run summary"
        );
    }
}

/// Initializes the tracing subscriber for structured logging.
pub fn init_logging() {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(tracing::Level::INFO)
            .finish(),
    )
    .ok();
}
