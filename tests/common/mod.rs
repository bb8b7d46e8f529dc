pub mod macros;

use pasture_data::{Agent, Position, Species, Target};
use pasture_lib::model::config::AppConfig;
use pasture_lib::model::lifecycle;
use pasture_lib::model::world::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
    agents: Vec<Agent>,
}

#[allow(dead_code)]
impl WorldBuilder {
    /// Empty, seeded world without wild grower sprouting.
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.initial_growers = 0;
        config.world.initial_grazers = 0;
        config.world.initial_hunters = 0;
        config.world.grower_spawn_chance = 0.0;
        config.world.seed = Some(0);
        Self {
            config,
            agents: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Disables reproduction for every species.
    pub fn without_reproduction(self) -> Self {
        self.with_config(|c| {
            c.grower.reproduction_chance = 0.0;
            c.grazer.reproduction_chance = 0.0;
            c.hunter.reproduction_chance = 0.0;
        })
    }

    pub fn with_agent(mut self, agent: AgentBuilder) -> Self {
        let agent = agent.build(&self.config);
        self.agents.push(agent);
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        for agent in self.agents {
            world.insert_agent(agent);
        }
        world
    }
}

#[allow(dead_code)]
pub struct AgentBuilder {
    species: Species,
    position: Position,
    energy: Option<f64>,
    speed: Option<f64>,
    vision_range: Option<f64>,
    target: Option<Target>,
    alive: bool,
    seed: u64,
}

#[allow(dead_code)]
impl AgentBuilder {
    pub fn new(species: Species, x: f64, y: f64) -> Self {
        Self {
            species,
            position: Position::new(x, y),
            energy: None,
            speed: None,
            vision_range: None,
            target: None,
            alive: true,
            seed: (x.to_bits() ^ y.to_bits().rotate_left(17)) ^ species as u64,
        }
    }

    pub fn grower(x: f64, y: f64) -> Self {
        Self::new(Species::Grower, x, y)
    }

    pub fn grazer(x: f64, y: f64) -> Self {
        Self::new(Species::Grazer, x, y)
    }

    pub fn hunter(x: f64, y: f64) -> Self {
        Self::new(Species::Hunter, x, y)
    }

    pub fn energy(mut self, energy: f64) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    pub fn vision(mut self, vision_range: f64) -> Self {
        self.vision_range = Some(vision_range);
        self
    }

    pub fn target(mut self, target: Target) -> Self {
        self.target = Some(target);
        self
    }

    pub fn dead(mut self) -> Self {
        self.alive = false;
        self
    }

    /// Id generation seed; distinct builders at the same spot need distinct seeds.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn build(self, config: &AppConfig) -> Agent {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut agent =
            lifecycle::create_agent_with_rng(self.species, self.position, config, &mut rng);
        if let Some(energy) = self.energy {
            agent.energy = energy;
        }
        if let Some(speed) = self.speed {
            agent.speed = speed;
        }
        if let Some(vision_range) = self.vision_range {
            agent.vision_range = vision_range;
        }
        agent.target = self.target;
        agent.alive = self.alive;
        agent
    }
}
