use crate::model::config::AppConfig;
use pasture_core::Metrics;
use pasture_core::roster::Roster;
use pasture_data::{Agent, PopulationStats};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

pub mod init;
pub mod update;

/// Headless simulation world: owns the roster and drives it one tick at a time.
pub struct World {
    pub width: f64,
    pub height: f64,
    /// Completed ticks.
    pub tick: u64,
    pub roster: Roster,
    pub pop_stats: PopulationStats,
    pub config: AppConfig,
    pub metrics: Metrics,
    pub rng: ChaCha8Rng,
}

impl World {
    #[must_use]
    pub fn agent(&self, id: Uuid) -> Option<&Agent> {
        self.roster.get(id)
    }

    pub fn agent_mut(&mut self, id: Uuid) -> Option<&mut Agent> {
        self.roster.get_mut(id)
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        self.roster.agents()
    }

    #[must_use]
    pub fn population(&self) -> PopulationStats {
        self.pop_stats
    }

    /// No live agent of any species remains.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pop_stats.total() == 0
    }
}
