//! Run metrics and structured logging setup.
//!
//! [`Metrics`] keeps cheap atomic counters that the world bumps while it
//! steps; every `log_interval` ticks it emits one `info!` summary line.

use pasture_data::PopulationStats;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Counter names used by the world.
pub mod counters {
    pub const BIRTHS: &str = "births";
    pub const DEATHS: &str = "deaths";
    pub const STARVATIONS: &str = "starvations";
    pub const KILLS: &str = "kills";
    pub const GRAZES: &str = "grazes";
    pub const FLEES: &str = "flees";
    pub const WILD_SPROUTS: &str = "wild_sprouts";
}

pub struct Metrics {
    tick_count: AtomicU64,
    growers: AtomicU64,
    grazers: AtomicU64,
    hunters: AtomicU64,
    total_tick_micros: AtomicU64,
    log_interval: u64,
    counters: Mutex<HashMap<String, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            growers: AtomicU64::new(0),
            grazers: AtomicU64::new(0),
            hunters: AtomicU64::new(0),
            total_tick_micros: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            counters: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick and logs a summary on every interval boundary.
    pub fn record_tick(&self, duration: Duration, stats: &PopulationStats) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.growers.store(stats.growers as u64, Ordering::Relaxed);
        self.grazers.store(stats.grazers as u64, Ordering::Relaxed);
        self.hunters.store(stats.hunters as u64, Ordering::Relaxed);
        self.total_tick_micros
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);

        if tick % self.log_interval == 0 {
            tracing::info!(
                tick = stats.tick,
                growers = stats.growers,
                grazers = stats.grazers,
                hunters = stats.hunters,
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn increment_counter(&self, name: &str) {
        self.add_to_counter(name, 1);
    }

    pub fn add_to_counter(&self, name: &str, amount: u64) {
        if amount == 0 {
            return;
        }
        let mut counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        *counters.entry(name.to_string()).or_insert(0) += amount;
    }

    #[must_use]
    pub fn counter(&self, name: &str) -> u64 {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        counters.get(name).copied().unwrap_or(0)
    }

    /// Sorted copy of every named counter.
    #[must_use]
    pub fn counters(&self) -> Vec<(String, u64)> {
        let counters = self.counters.lock().unwrap_or_else(|e| e.into_inner());
        let mut out: Vec<_> = counters.iter().map(|(k, v)| (k.clone(), *v)).collect();
        out.sort();
        out
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn population(&self) -> u64 {
        self.growers.load(Ordering::Relaxed)
            + self.grazers.load(Ordering::Relaxed)
            + self.hunters.load(Ordering::Relaxed)
    }

    /// Mean wall-clock time per recorded tick.
    #[must_use]
    pub fn mean_tick_duration(&self) -> Duration {
        let ticks = self.tick_count();
        if ticks == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(self.total_tick_micros.load(Ordering::Relaxed) / ticks)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs the global `tracing` subscriber.
///
/// An explicit `level` (e.g. from `--log-level`) wins over `RUST_LOG`; with
/// neither, `info` is used. Calling it twice is harmless.
pub fn init_logging(level: Option<&str>) {
    let directive = level
        .map(str::to_owned)
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| "info".into());

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(directive))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .ok();
}
