use super::perception::Brain;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// World position of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(&self, other: &Position) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    #[must_use]
    pub fn offset(&self, offset: Offset) -> Position {
        Position {
            x: self.x + offset.dx,
            y: self.y + offset.dy,
        }
    }
}

/// Signed world-space displacement relative to an agent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    #[must_use]
    pub fn magnitude(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }
}

/// Trophic category of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    /// Stationary producer (plants).
    Grower,
    /// Mobile herbivore that eats growers and flees hunters.
    Grazer,
    /// Mobile predator that eats grazers.
    Hunter,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Grower, Species::Grazer, Species::Hunter];

    /// Whether agents of this species move and perceive.
    #[must_use]
    pub fn is_mobile(self) -> bool {
        !matches!(self, Species::Grower)
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Species::Grower => "grower",
            Species::Grazer => "grazer",
            Species::Hunter => "hunter",
        }
    }
}

/// The single thing an agent is currently moving toward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Target {
    /// A specific agent; must be re-validated for liveness on every read.
    Agent(Uuid),
    /// A bare world point reported by the perception grid.
    Point(Position),
}

/// Behaviour state chosen on the agent's most recent tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Mode {
    /// Stationary (growers) or not yet stepped.
    #[default]
    Idle,
    /// Running directly away from a threat.
    Flee,
    /// Heading toward a point obtained from the perception grid.
    Forage,
    /// Chasing a specific live agent.
    Pursue,
    /// Random walk.
    Wander,
}

/// A simulated organism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: Uuid,
    pub parent_id: Option<Uuid>,
    pub species: Species,
    pub position: Position,
    pub size: f64,
    pub energy: f64,
    pub speed: f64,
    pub vision_range: f64,
    /// Upper bound for `size` (growers grow toward it).
    pub max_size: f64,
    /// Per-tick size increment while below `max_size`.
    pub growth_rate: f64,
    pub age: u64,
    pub generation: u32,
    pub offspring_count: u32,
    pub alive: bool,
    pub target: Option<Target>,
    pub mode: Mode,
    /// Perception grid; present for mobile species only.
    #[serde(skip)]
    pub brain: Option<Brain>,
}

impl Agent {
    #[must_use]
    pub fn distance_to(&self, other: &Agent) -> f64 {
        self.position.distance_to(&other.position)
    }

    /// Combined-radius threshold below which `self` can eat `other`.
    #[must_use]
    pub fn eating_radius(&self, other: &Agent) -> f64 {
        self.size / 2.0 + other.size / 2.0
    }
}
