//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every species gets its own parameter bundle; the
//! perception section holds the constants shared by all perception grids.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impl)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command-line flags (`--seed`, `--ticks`)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 800.0
//! height = 600.0
//! seed = 42
//!
//! [perception]
//! min_entity_size = 20.0
//! search = "euclidean"
//! ```

use pasture_data::Species;
use serde::{Deserialize, Serialize};

/// World-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f64,
    pub height: f64,
    pub initial_growers: usize,
    pub initial_grazers: usize,
    pub initial_hunters: usize,
    /// Per-tick chance that a wild grower sprouts at a random position.
    pub grower_spawn_chance: f64,
    pub seed: Option<u64>,
    /// Emit an info-level summary every this many ticks.
    pub log_interval: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            initial_growers: 30,
            initial_grazers: 15,
            initial_hunters: 5,
            grower_spawn_chance: 0.1,
            seed: None,
            log_interval: 1000,
        }
    }
}

/// Nearest-target search strategy.
///
/// The two strategies agree whenever a single cell matches; with several
/// matches they can pick different cells:
///
/// - `Breadth` expands from the centre cell through the 8-neighbourhood and
///   returns the first match dequeued (ring order, then neighbour order).
/// - `Euclidean` scans every cell and returns the smallest Euclidean distance
///   from the centre, ties going to the first cell in row-major order.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    Breadth,
    #[default]
    Euclidean,
}

/// Perception constants shared by every species.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct PerceptionConfig {
    /// Side length of the smallest entity; sets grid resolution.
    pub min_entity_size: f64,
    pub search: SearchStrategy,
    /// A pursuing agent switches targets only when the new one is closer than
    /// `old_distance * retarget_factor`.
    pub retarget_factor: f64,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            min_entity_size: 20.0,
            search: SearchStrategy::Euclidean,
            retarget_factor: 1.0 / 3.0,
        }
    }
}

/// Per-species parameter bundle. A `[grazer]`-style section must be complete.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SpeciesConfig {
    pub initial_energy: f64,
    pub size: f64,
    /// Speed is drawn uniformly from this inclusive range at birth.
    pub speed_range: (f64, f64),
    pub vision_range: f64,
    pub reproduction_threshold: f64,
    pub reproduction_chance: f64,
    pub reproduction_cost: f64,
    pub energy_consumption_rate: f64,
    pub population_cap: usize,
    /// Offspring land within `±spawn_radius` of the parent on each axis.
    pub spawn_radius: f64,
    /// Maximum energy taken from prey in one meal.
    pub feed_cap: f64,
    /// Whether a meal kills the prey outright.
    pub lethal_feeding: bool,
    pub speed_gain_per_kill: f64,
    pub vision_gain_per_kill: f64,
}

/// Parameters specific to stationary growers.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GrowthConfig {
    /// Photosynthesis income per tick.
    pub energy_gain_rate: f64,
    pub growth_rate_range: (f64, f64),
    pub max_size_range: (f64, f64),
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            energy_gain_rate: 1.0,
            growth_rate_range: (0.01, 0.05),
            max_size_range: (20.0, 40.0),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub perception: PerceptionConfig,
    pub grower: SpeciesConfig,
    pub grazer: SpeciesConfig,
    pub hunter: SpeciesConfig,
    pub growth: GrowthConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            perception: PerceptionConfig::default(),
            grower: SpeciesConfig {
                initial_energy: 100.0,
                size: 20.0,
                speed_range: (0.0, 0.0),
                vision_range: 0.0,
                reproduction_threshold: 50.0,
                reproduction_chance: 0.01,
                reproduction_cost: 30.0,
                energy_consumption_rate: 0.1,
                population_cap: 200,
                spawn_radius: 20.0,
                feed_cap: 0.0,
                lethal_feeding: false,
                speed_gain_per_kill: 0.0,
                vision_gain_per_kill: 0.0,
            },
            grazer: SpeciesConfig {
                initial_energy: 120.0,
                size: 25.0,
                speed_range: (0.5, 2.0),
                vision_range: 80.0,
                reproduction_threshold: 150.0,
                reproduction_chance: 0.005,
                reproduction_cost: 50.0,
                energy_consumption_rate: 0.2,
                population_cap: 100,
                spawn_radius: 20.0,
                feed_cap: 25.0,
                lethal_feeding: false,
                speed_gain_per_kill: 0.0,
                vision_gain_per_kill: 0.0,
            },
            hunter: SpeciesConfig {
                initial_energy: 160.0,
                size: 30.0,
                speed_range: (1.0, 3.0),
                vision_range: 100.0,
                reproduction_threshold: 200.0,
                reproduction_chance: 0.003,
                reproduction_cost: 70.0,
                energy_consumption_rate: 0.3,
                population_cap: 30,
                spawn_radius: 30.0,
                feed_cap: 50.0,
                lethal_feeding: true,
                speed_gain_per_kill: 0.1,
                vision_gain_per_kill: 3.0,
            },
            growth: GrowthConfig::default(),
        }
    }
}

impl AppConfig {
    #[must_use]
    pub fn species(&self, species: Species) -> &SpeciesConfig {
        match species {
            Species::Grower => &self.grower,
            Species::Grazer => &self.grazer,
            Species::Hunter => &self.hunter,
        }
    }

    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.world.width > 0.0 && self.world.width.is_finite(),
            "World width must be positive"
        );
        anyhow::ensure!(
            self.world.height > 0.0 && self.world.height.is_finite(),
            "World height must be positive"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&self.world.grower_spawn_chance),
            "Grower spawn chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(self.world.log_interval > 0, "Log interval must be positive");

        anyhow::ensure!(
            self.perception.min_entity_size > 0.0 && self.perception.min_entity_size.is_finite(),
            "Minimum entity size must be finite and positive"
        );
        anyhow::ensure!(
            self.perception.retarget_factor > 0.0 && self.perception.retarget_factor <= 1.0,
            "Retarget factor must be in (0.0, 1.0]"
        );

        for species in Species::ALL {
            self.validate_species(species)?;
        }

        let (lo, hi) = self.growth.growth_rate_range;
        anyhow::ensure!(
            lo >= 0.0 && lo <= hi && hi.is_finite(),
            "Growth rate range must be finite, non-negative and ordered"
        );
        let (lo, hi) = self.growth.max_size_range;
        anyhow::ensure!(
            lo > 0.0 && lo <= hi && hi.is_finite(),
            "Max size range must be finite, positive and ordered"
        );
        anyhow::ensure!(
            self.growth.energy_gain_rate >= 0.0 && self.growth.energy_gain_rate.is_finite(),
            "Energy gain rate must be finite and non-negative"
        );
        Ok(())
    }

    fn validate_species(&self, species: Species) -> anyhow::Result<()> {
        let s = self.species(species);
        let name = species.label();
        anyhow::ensure!(
            s.initial_energy > 0.0 && s.initial_energy.is_finite(),
            "{name}: initial energy must be finite and positive"
        );
        anyhow::ensure!(
            s.size > 0.0 && s.size.is_finite(),
            "{name}: size must be finite and positive"
        );
        anyhow::ensure!(
            s.speed_range.0 >= 0.0
                && s.speed_range.0 <= s.speed_range.1
                && s.speed_range.1.is_finite(),
            "{name}: speed range must be finite, non-negative and ordered"
        );
        anyhow::ensure!(
            s.vision_range >= 0.0 && s.vision_range.is_finite(),
            "{name}: vision range must be finite and non-negative"
        );
        anyhow::ensure!(
            s.reproduction_threshold.is_finite(),
            "{name}: reproduction threshold must be finite"
        );
        anyhow::ensure!(
            (0.0..=1.0).contains(&s.reproduction_chance),
            "{name}: reproduction chance must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            s.reproduction_cost >= 0.0 && s.reproduction_cost.is_finite(),
            "{name}: reproduction cost must be finite and non-negative"
        );
        anyhow::ensure!(
            s.energy_consumption_rate >= 0.0 && s.energy_consumption_rate.is_finite(),
            "{name}: energy consumption rate must be finite and non-negative"
        );
        // Offspring offsets are drawn from [-r, r]; the width 2r must stay finite.
        anyhow::ensure!(
            s.spawn_radius >= 0.0 && (2.0 * s.spawn_radius).is_finite(),
            "{name}: spawn radius must be finite and non-negative"
        );
        anyhow::ensure!(
            s.feed_cap >= 0.0 && s.feed_cap.is_finite(),
            "{name}: feed cap must be finite and non-negative"
        );
        anyhow::ensure!(
            s.speed_gain_per_kill.is_finite() && s.vision_gain_per_kill.is_finite(),
            "{name}: kill bonuses must be finite"
        );
        if species.is_mobile() {
            anyhow::ensure!(s.speed_range.1 > 0.0, "{name}: mobile species needs a speed");
        }
        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Stable hash of every behaviour-relevant parameter.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.world).as_bytes());
        hasher.update(format!("{:?}", self.perception).as_bytes());
        hasher.update(format!("{:?}", self.grower).as_bytes());
        hasher.update(format!("{:?}", self.grazer).as_bytes());
        hasher.update(format!("{:?}", self.hunter).as_bytes());
        hasher.update(format!("{:?}", self.growth).as_bytes());
        hex::encode(hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_world_width() {
        let config = AppConfig {
            world: WorldConfig {
                width: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_min_entity_size() {
        let config = AppConfig {
            perception: PerceptionConfig {
                min_entity_size: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_reproduction_chance() {
        let mut config = AppConfig::default();
        config.hunter.reproduction_chance = 1.5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("hunter"));
    }

    #[test]
    fn test_mobile_species_needs_speed() {
        let mut config = AppConfig::default();
        config.grazer.speed_range = (0.0, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [world]
            seed = 7

            [perception]
            search = "breadth"
            "#,
        )
        .unwrap();
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.perception.search, SearchStrategy::Breadth);
        assert_eq!(config.grazer.vision_range, 80.0);
    }

    #[test]
    fn test_toml_round_trip_preserves_fingerprint() {
        let config = AppConfig::default();
        let text = config.to_toml().unwrap();
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(config.fingerprint(), parsed.fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_with_parameters() {
        let a = AppConfig::default();
        let mut b = AppConfig::default();
        b.perception.min_entity_size = 10.0;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        let cases: [fn(&mut AppConfig); 6] = [
            |c| c.grower.spawn_radius = f64::INFINITY,
            |c| c.grazer.spawn_radius = f64::MAX,
            |c| c.hunter.speed_range = (1.0, f64::INFINITY),
            |c| c.growth.growth_rate_range = (0.01, f64::INFINITY),
            |c| c.growth.max_size_range = (20.0, f64::INFINITY),
            |c| c.grazer.vision_range = f64::NAN,
        ];
        for (i, apply) in cases.iter().enumerate() {
            let mut config = AppConfig::default();
            apply(&mut config);
            assert!(config.validate().is_err(), "case {i} should be rejected");
        }
    }

    #[test]
    fn test_infinite_speed_in_toml_is_rejected() {
        let result = AppConfig::from_toml(
            r#"
            [grazer]
            initial_energy = 120.0
            size = 25.0
            speed_range = [0.5, inf]
            vision_range = 80.0
            reproduction_threshold = 150.0
            reproduction_chance = 0.005
            reproduction_cost = 50.0
            energy_consumption_rate = 0.2
            population_cap = 100
            spawn_radius = 20.0
            feed_cap = 25.0
            lethal_feeding = false
            speed_gain_per_kill = 0.0
            vision_gain_per_kill = 0.0
            "#,
        );
        let err = result.unwrap_err();
        assert!(format!("{err:#}").contains("speed range"));
    }
}
