//! # Pasture Core
//!
//! Deterministic simulation logic for a small predator/prey/plant ecosystem.
//!
//! Every mobile agent owns a perception grid (its "brain"): a square window
//! centred on the agent, cut into cells, each holding a category code that
//! says which species occupy it. Each tick the grid is rebuilt from the
//! roster, then the species' behaviour policy reads it (plus a few direct
//! roster distance checks) to flee, forage, pursue or wander.
//!
//! ## Example
//!
//! ```
//! use pasture_core::brain::BrainLogic;
//! use pasture_core::config::{AppConfig, SearchStrategy};
//! use pasture_core::lifecycle::create_agent;
//! use pasture_core::roster::Roster;
//! use pasture_data::{Brain, CategoryCode, Position, Species};
//!
//! let config = AppConfig::default();
//! let grazer = create_agent(Species::Grazer, Position::new(100.0, 100.0), &config);
//! let grower = create_agent(Species::Grower, Position::new(110.0, 100.0), &config);
//! let owner = grazer.id;
//! let roster = Roster::from_agents(vec![grazer, grower]);
//!
//! let mut brain = Brain::for_owner(owner);
//! brain.refresh(Position::new(100.0, 100.0), 80.0, 20.0, &roster);
//! let offset = brain
//!     .find_nearest(CategoryCode::GrowerOnly, SearchStrategy::Euclidean)
//!     .unwrap();
//! assert!(offset.dx > 0.0);
//! ```

/// Perception grid construction
pub mod brain;
/// Occupant set to category code reduction
pub mod classifier;
/// Configuration management for simulation parameters
pub mod config;
/// Birth, death and tick-level events
pub mod history;
/// Agent creation and metabolism
pub mod lifecycle;
/// Run metrics and structured logging
pub mod metrics;
/// The live agent collection and its occupancy query
pub mod roster;
/// Nearest-target search over a perception grid
pub mod search;
/// Per-species step functions
pub mod systems;

pub use brain::BrainLogic;
pub use config::{AppConfig, SearchStrategy};
pub use history::{DeathCause, LiveEvent};
pub use metrics::{init_logging, Metrics};
pub use roster::{Occupancy, Roster};
