use crate::brain::BrainLogic;
use crate::config::AppConfig;
use pasture_data::{Agent, Brain, Mode, Position, Species};
use rand::Rng;
use uuid::Uuid;

fn draw_in<R: Rng>(range: (f64, f64), rng: &mut R) -> f64 {
    let (lo, hi) = range;
    if hi > lo {
        rng.gen_range(lo..=hi)
    } else {
        lo
    }
}

/// Builds a fresh first-generation agent from its species bundle.
///
/// Ids are drawn from `rng` so a seeded generator yields a reproducible roster.
pub fn create_agent_with_rng<R: Rng>(
    species: Species,
    position: Position,
    config: &AppConfig,
    rng: &mut R,
) -> Agent {
    let params = config.species(species);
    let id = Uuid::from_u128(rng.gen::<u128>());
    let speed = draw_in(params.speed_range, rng);

    let (growth_rate, max_size) = if species == Species::Grower {
        (
            draw_in(config.growth.growth_rate_range, rng),
            draw_in(config.growth.max_size_range, rng),
        )
    } else {
        (0.0, params.size)
    };

    Agent {
        id,
        parent_id: None,
        species,
        position,
        size: params.size,
        energy: params.initial_energy,
        speed,
        vision_range: params.vision_range,
        max_size,
        growth_rate,
        age: 0,
        generation: 0,
        offspring_count: 0,
        alive: true,
        target: None,
        mode: Mode::Idle,
        brain: species.is_mobile().then(|| Brain::for_owner(id)),
    }
}

pub fn create_agent(species: Species, position: Position, config: &AppConfig) -> Agent {
    let mut rng = rand::thread_rng();
    create_agent_with_rng(species, position, config, &mut rng)
}

/// Builds an offspring of `parent` at `position`, one generation deeper.
pub fn create_offspring_with_rng<R: Rng>(
    parent: &Agent,
    position: Position,
    config: &AppConfig,
    rng: &mut R,
) -> Agent {
    let mut child = create_agent_with_rng(parent.species, position, config, rng);
    child.parent_id = Some(parent.id);
    child.generation = parent.generation + 1;
    child
}

/// Ages the agent by one tick and charges its upkeep.
///
/// Returns `false` once energy reaches zero; the agent is then marked dead.
pub fn metabolize(agent: &mut Agent, consumption_rate: f64) -> bool {
    agent.age += 1;
    agent.energy -= consumption_rate;
    if agent.energy <= 0.0 {
        agent.alive = false;
    }
    agent.alive
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_seeded_creation_is_reproducible() {
        let config = AppConfig::default();
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        let x = create_agent_with_rng(Species::Hunter, Position::new(1.0, 2.0), &config, &mut a);
        let y = create_agent_with_rng(Species::Hunter, Position::new(1.0, 2.0), &config, &mut b);
        assert_eq!(x.id, y.id);
        assert_eq!(x.speed, y.speed);
    }

    #[test]
    fn test_speed_within_species_range() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for _ in 0..50 {
            let a = create_agent_with_rng(Species::Grazer, Position::default(), &config, &mut rng);
            assert!(a.speed >= 0.5 && a.speed <= 2.0);
        }
    }

    #[test]
    fn test_only_mobile_agents_get_a_brain() {
        let config = AppConfig::default();
        let grower = create_agent(Species::Grower, Position::default(), &config);
        let grazer = create_agent(Species::Grazer, Position::default(), &config);
        assert!(grower.brain.is_none());
        let brain = grazer.brain.as_ref().unwrap();
        assert_eq!(brain.owner, grazer.id);
    }

    #[test]
    fn test_grower_draws_growth_parameters() {
        let config = AppConfig::default();
        let grower = create_agent(Species::Grower, Position::default(), &config);
        assert!(grower.growth_rate >= 0.01 && grower.growth_rate <= 0.05);
        assert!(grower.max_size >= 20.0 && grower.max_size <= 40.0);
    }

    #[test]
    fn test_offspring_links_to_parent() {
        let config = AppConfig::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let parent = create_agent_with_rng(Species::Grazer, Position::default(), &config, &mut rng);
        let child = create_offspring_with_rng(&parent, Position::new(5.0, 5.0), &config, &mut rng);
        assert_eq!(child.parent_id, Some(parent.id));
        assert_eq!(child.generation, 1);
        assert_eq!(child.energy, config.grazer.initial_energy);
    }

    #[test]
    fn test_metabolize_kills_at_zero() {
        let config = AppConfig::default();
        let mut agent = create_agent(Species::Grazer, Position::default(), &config);
        agent.energy = 0.2;
        assert!(!metabolize(&mut agent, 0.2));
        assert!(!agent.alive);
        assert_eq!(agent.age, 1);
    }
}
