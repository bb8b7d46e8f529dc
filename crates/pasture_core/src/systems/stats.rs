use crate::roster::Roster;
use pasture_data::PopulationStats;

/// Recounts live agents per species into `stats`.
pub fn update_population_stats(stats: &mut PopulationStats, roster: &Roster, tick: u64) {
    stats.tick = tick;
    stats.growers = 0;
    stats.grazers = 0;
    stats.hunters = 0;
    for agent in roster.live() {
        *stats.count_mut(agent.species) += 1;
    }
}

#[must_use]
pub fn census(roster: &Roster, tick: u64) -> PopulationStats {
    let mut stats = PopulationStats::default();
    update_population_stats(&mut stats, roster, tick);
    stats
}
