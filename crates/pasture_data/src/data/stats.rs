use super::agent::Species;
use serde::{Deserialize, Serialize};

/// Live head-count per species, refreshed after every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationStats {
    /// Number of completed ticks.
    pub tick: u64,
    pub growers: usize,
    pub grazers: usize,
    pub hunters: usize,
}

impl PopulationStats {
    #[must_use]
    pub fn count(&self, species: Species) -> usize {
        match species {
            Species::Grower => self.growers,
            Species::Grazer => self.grazers,
            Species::Hunter => self.hunters,
        }
    }

    pub fn count_mut(&mut self, species: Species) -> &mut usize {
        match species {
            Species::Grower => &mut self.growers,
            Species::Grazer => &mut self.grazers,
            Species::Hunter => &mut self.hunters,
        }
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.growers + self.grazers + self.hunters
    }
}
