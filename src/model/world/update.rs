use crate::model::world::World;
use pasture_core::history::{DeathCause, LiveEvent};
use pasture_core::lifecycle;
use pasture_core::metrics::counters;
use pasture_core::systems::stats::update_population_stats;
use pasture_core::systems::{step_agent, StepContext, StepOutput};
use pasture_data::{PopulationStats, Species};
use rand::Rng;
use std::time::Instant;

impl World {
    /// Advances the simulation by one tick and returns what happened.
    ///
    /// Every agent alive at the start of the tick is stepped once, in roster
    /// order. Agents that die mid-tick are skipped from then on but only
    /// removed after the last step; offspring join the roster at the same
    /// point, so neither is visible to perception until the next tick.
    pub fn update(&mut self) -> Vec<LiveEvent> {
        let start = Instant::now();
        self.tick += 1;
        let before = self.pop_stats;

        let mut out = StepOutput::default();
        {
            let mut ctx = StepContext {
                config: &self.config,
                rng: &mut self.rng,
                tick: self.tick,
            };
            for idx in 0..self.roster.len() {
                step_agent(idx, &mut self.roster, &mut ctx, &mut out);
            }
        }
        self.sprout_wild_grower(&mut out);

        let dead = self.roster.purge_dead();
        let births = out.offspring.len();
        for child in out.offspring.drain(..) {
            self.roster.push(child);
        }

        update_population_stats(&mut self.pop_stats, &self.roster, self.tick);
        self.report_extinctions(&before, &mut out.events);
        self.count_events(&out, births, dead.len());
        self.metrics.record_tick(start.elapsed(), &self.pop_stats);

        out.events
    }

    /// Runs `ticks` updates, collecting every event.
    pub fn run(&mut self, ticks: u64) -> Vec<LiveEvent> {
        let mut events = Vec::new();
        for _ in 0..ticks {
            events.extend(self.update());
        }
        events
    }

    fn sprout_wild_grower(&mut self, out: &mut StepOutput) {
        let chance = self.config.world.grower_spawn_chance;
        if chance <= 0.0 || self.rng.gen::<f64>() >= chance {
            return;
        }
        let growers = self.roster.count_live(Species::Grower) + out.pending(Species::Grower);
        if growers >= self.config.grower.population_cap {
            return;
        }
        let position = self.random_position();
        let grower =
            lifecycle::create_agent_with_rng(Species::Grower, position, &self.config, &mut self.rng);
        self.metrics.increment_counter(counters::WILD_SPROUTS);
        out.events.push(LiveEvent::birth(&grower, self.tick));
        out.offspring.push(grower);
    }

    fn report_extinctions(&self, before: &PopulationStats, events: &mut Vec<LiveEvent>) {
        for species in Species::ALL {
            if before.count(species) > 0 && self.pop_stats.count(species) == 0 {
                tracing::warn!(species = species.label(), tick = self.tick, "Species extinct");
                events.push(LiveEvent::extinction(species, self.tick));
            }
        }
    }

    fn count_events(&self, out: &StepOutput, births: usize, deaths: usize) {
        let m = &self.metrics;
        m.add_to_counter(counters::BIRTHS, births as u64);
        m.add_to_counter(counters::DEATHS, deaths as u64);
        m.add_to_counter(counters::FLEES, out.flees);
        for event in &out.events {
            match event {
                LiveEvent::Feed { lethal: true, .. } => m.increment_counter(counters::KILLS),
                LiveEvent::Feed { lethal: false, .. } => m.increment_counter(counters::GRAZES),
                LiveEvent::Death {
                    cause: DeathCause::Starvation,
                    ..
                } => m.increment_counter(counters::STARVATIONS),
                _ => {}
            }
        }
    }
}
