use crate::model::config::AppConfig;
use crate::model::world::World;
use pasture_core::lifecycle;
use pasture_core::roster::Roster;
use pasture_core::systems::movement::clamp_to_bounds;
use pasture_core::systems::stats::census;
use pasture_core::Metrics;
use pasture_data::{Agent, Position, Species};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

impl World {
    /// Validated world seeded with the configured initial populations.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let mut world = Self::empty(config)?;
        let world_cfg = world.config.world.clone();
        world.populate(Species::Grower, world_cfg.initial_growers);
        world.populate(Species::Grazer, world_cfg.initial_grazers);
        world.populate(Species::Hunter, world_cfg.initial_hunters);
        tracing::info!(
            growers = world.pop_stats.growers,
            grazers = world.pop_stats.grazers,
            hunters = world.pop_stats.hunters,
            seed = ?world.config.world.seed,
            fingerprint = %world.config.fingerprint(),
            "World created"
        );
        Ok(world)
    }

    /// Validated world with no agents.
    pub fn empty(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let rng = if let Some(seed) = config.world.seed {
            ChaCha8Rng::seed_from_u64(seed)
        } else {
            ChaCha8Rng::from_entropy()
        };
        Ok(Self {
            width: config.world.width,
            height: config.world.height,
            tick: 0,
            roster: Roster::new(),
            pop_stats: Default::default(),
            metrics: Metrics::new(config.world.log_interval),
            config,
            rng,
        })
    }

    /// Scatters `count` new agents of `species` uniformly over the world.
    pub fn populate(&mut self, species: Species, count: usize) {
        for _ in 0..count {
            let position = self.random_position();
            let agent = lifecycle::create_agent_with_rng(species, position, &self.config, &mut self.rng);
            self.roster.push(agent);
        }
        self.pop_stats = census(&self.roster, self.tick);
    }

    /// Inserts a new first-generation agent at `position` (clamped to the world).
    pub fn spawn_agent(&mut self, species: Species, position: Position) -> Uuid {
        let mut position = position;
        clamp_to_bounds(&mut position, self.width, self.height);
        let agent = lifecycle::create_agent_with_rng(species, position, &self.config, &mut self.rng);
        self.insert_agent(agent)
    }

    /// Inserts a prepared agent; it is stepped from the next tick on.
    pub fn insert_agent(&mut self, agent: Agent) -> Uuid {
        let id = agent.id;
        tracing::debug!(id = %id, species = agent.species.label(), "Agent inserted");
        self.roster.push(agent);
        self.pop_stats = census(&self.roster, self.tick);
        id
    }

    pub(crate) fn random_position(&mut self) -> Position {
        Position::new(
            self.rng.gen_range(0.0..=self.width),
            self.rng.gen_range(0.0..=self.height),
        )
    }
}
