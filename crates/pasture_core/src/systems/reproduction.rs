use crate::history::LiveEvent;
use crate::lifecycle::create_offspring_with_rng;
use crate::roster::Roster;
use pasture_data::Offset;
use rand::Rng;

use super::movement::clamp_to_bounds;
use super::{StepContext, StepOutput};

/// Runs the reproduction gate for the agent at `idx`.
///
/// Passes when energy is above the species threshold, a uniform draw falls
/// below the reproduction chance, and live members plus offspring already
/// queued this tick stay under the population cap. The child is queued in
/// `out`, not inserted into the roster.
pub fn try_reproduce<R: Rng>(
    idx: usize,
    roster: &mut Roster,
    ctx: &mut StepContext<'_, R>,
    out: &mut StepOutput,
) -> bool {
    let config = ctx.config;
    let Some(parent) = roster.at(idx) else {
        return false;
    };
    let species = parent.species;
    let params = config.species(species);

    if !parent.alive || parent.energy <= params.reproduction_threshold {
        return false;
    }
    if ctx.rng.gen::<f64>() >= params.reproduction_chance {
        return false;
    }
    let population = roster.count_live(species) + out.pending(species);
    if population >= params.population_cap {
        tracing::debug!(
            species = species.label(),
            population,
            cap = params.population_cap,
            "Reproduction blocked by cap"
        );
        return false;
    }

    let r = params.spawn_radius;
    let offset = if r > 0.0 {
        Offset {
            dx: ctx.rng.gen_range(-r..=r),
            dy: ctx.rng.gen_range(-r..=r),
        }
    } else {
        Offset::default()
    };
    let mut position = parent.position.offset(offset);
    clamp_to_bounds(&mut position, config.world.width, config.world.height);
    let child = create_offspring_with_rng(parent, position, config, ctx.rng);

    let Some(parent) = roster.at_mut(idx) else {
        return false;
    };
    parent.energy -= params.reproduction_cost;
    parent.offspring_count += 1;

    tracing::debug!(
        parent = %parent.id,
        child = %child.id,
        species = species.label(),
        "Offspring queued"
    );
    out.events.push(LiveEvent::birth(&child, ctx.tick));
    out.offspring.push(child);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::lifecycle::create_agent_with_rng;
    use pasture_data::{Position, Species};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fertile_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.grazer.reproduction_chance = 1.0;
        config
    }

    fn grazers(config: &AppConfig, rng: &mut ChaCha8Rng, n: usize, energy: f64) -> Roster {
        Roster::from_agents(
            (0..n)
                .map(|i| {
                    let mut a = create_agent_with_rng(
                        Species::Grazer,
                        Position::new(100.0 + i as f64, 100.0),
                        config,
                        rng,
                    );
                    a.energy = energy;
                    a
                })
                .collect(),
        )
    }

    #[test]
    fn test_reproduction_spawns_nearby_and_charges_parent() {
        let config = fertile_config();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut roster = grazers(&config, &mut rng, 1, 200.0);
        let mut out = StepOutput::default();
        let mut ctx = StepContext {
            config: &config,
            rng: &mut rng,
            tick: 4,
        };

        assert!(try_reproduce(0, &mut roster, &mut ctx, &mut out));
        let parent = &roster.agents()[0];
        assert_eq!(parent.energy, 200.0 - config.grazer.reproduction_cost);
        assert_eq!(parent.offspring_count, 1);

        let child = &out.offspring[0];
        assert_eq!(child.parent_id, Some(parent.id));
        assert!((child.position.x - parent.position.x).abs() <= config.grazer.spawn_radius);
        assert!((child.position.y - parent.position.y).abs() <= config.grazer.spawn_radius);
        assert!(matches!(out.events[0], LiveEvent::Birth { tick: 4, .. }));
        // Not inserted until the world applies the tick.
        assert_eq!(roster.len(), 1);
    }

    #[test]
    fn test_reproduction_needs_energy_above_threshold() {
        let config = fertile_config();
        let mut rng = ChaCha8Rng::seed_from_u64(22);
        let mut roster = grazers(&config, &mut rng, 1, config.grazer.reproduction_threshold);
        let mut out = StepOutput::default();
        let mut ctx = StepContext {
            config: &config,
            rng: &mut rng,
            tick: 1,
        };
        assert!(!try_reproduce(0, &mut roster, &mut ctx, &mut out));
        assert!(out.offspring.is_empty());
    }

    #[test]
    fn test_cap_counts_queued_offspring() {
        let mut config = fertile_config();
        config.grazer.population_cap = 3;
        let mut rng = ChaCha8Rng::seed_from_u64(23);
        let mut roster = grazers(&config, &mut rng, 2, 400.0);
        let mut out = StepOutput::default();
        let mut ctx = StepContext {
            config: &config,
            rng: &mut rng,
            tick: 1,
        };

        assert!(try_reproduce(0, &mut roster, &mut ctx, &mut out));
        assert!(!try_reproduce(1, &mut roster, &mut ctx, &mut out));
        assert_eq!(out.offspring.len(), 1);
    }

    #[test]
    fn test_zero_chance_never_reproduces() {
        let mut config = fertile_config();
        config.grazer.reproduction_chance = 0.0;
        let mut rng = ChaCha8Rng::seed_from_u64(24);
        let mut roster = grazers(&config, &mut rng, 1, 400.0);
        let mut out = StepOutput::default();
        let mut ctx = StepContext {
            config: &config,
            rng: &mut rng,
            tick: 1,
        };
        for _ in 0..100 {
            assert!(!try_reproduce(0, &mut roster, &mut ctx, &mut out));
        }
    }
}
