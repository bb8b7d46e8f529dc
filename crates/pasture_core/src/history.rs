//! Notable simulation events, emitted by the world once per tick.

use pasture_data::{Agent, Species};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Starvation,
    /// Eaten by a grazer or a hunter.
    Eaten,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event")]
pub enum LiveEvent {
    Birth {
        id: Uuid,
        parent_id: Option<Uuid>,
        species: Species,
        gen: u32,
        tick: u64,
        timestamp: String,
    },
    Death {
        id: Uuid,
        species: Species,
        age: u64,
        offspring: u32,
        tick: u64,
        timestamp: String,
        cause: DeathCause,
    },
    Feed {
        eater: Uuid,
        eaten: Uuid,
        species: Species,
        gained: f64,
        lethal: bool,
        tick: u64,
        timestamp: String,
    },
    Extinction {
        species: Species,
        tick: u64,
        timestamp: String,
    },
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

impl LiveEvent {
    #[must_use]
    pub fn birth(agent: &Agent, tick: u64) -> Self {
        LiveEvent::Birth {
            id: agent.id,
            parent_id: agent.parent_id,
            species: agent.species,
            gen: agent.generation,
            tick,
            timestamp: now(),
        }
    }

    #[must_use]
    pub fn death(agent: &Agent, cause: DeathCause, tick: u64) -> Self {
        LiveEvent::Death {
            id: agent.id,
            species: agent.species,
            age: agent.age,
            offspring: agent.offspring_count,
            tick,
            timestamp: now(),
            cause,
        }
    }

    #[must_use]
    pub fn feed(eater: &Agent, eaten: &Agent, gained: f64, lethal: bool, tick: u64) -> Self {
        LiveEvent::Feed {
            eater: eater.id,
            eaten: eaten.id,
            species: eater.species,
            gained,
            lethal,
            tick,
            timestamp: now(),
        }
    }

    #[must_use]
    pub fn extinction(species: Species, tick: u64) -> Self {
        LiveEvent::Extinction {
            species,
            tick,
            timestamp: now(),
        }
    }

    #[must_use]
    pub fn tick(&self) -> u64 {
        match self {
            LiveEvent::Birth { tick, .. }
            | LiveEvent::Death { tick, .. }
            | LiveEvent::Feed { tick, .. }
            | LiveEvent::Extinction { tick, .. } => *tick,
        }
    }

    /// Single-line JSON encoding, suitable for a `.jsonl` stream.
    pub fn to_json_line(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::lifecycle::create_agent;
    use pasture_data::Position;

    #[test]
    fn test_json_line_is_tagged() {
        let agent = create_agent(Species::Grazer, Position::default(), &AppConfig::default());
        let line = LiveEvent::death(&agent, DeathCause::Starvation, 12)
            .to_json_line()
            .unwrap();
        assert!(line.contains(r#""event":"Death""#));
        assert!(line.contains(r#""cause":"starvation""#));
        assert!(line.contains(r#""species":"grazer""#));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_json_line_parses_back() {
        let event = LiveEvent::extinction(Species::Hunter, 40);
        let parsed: LiveEvent = serde_json::from_str(&event.to_json_line().unwrap()).unwrap();
        assert_eq!(parsed, event);
        assert_eq!(parsed.tick(), 40);
    }

    #[test]
    fn test_timestamp_is_rfc3339() {
        let LiveEvent::Extinction { timestamp, .. } = LiveEvent::extinction(Species::Grower, 1)
        else {
            unreachable!()
        };
        assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
    }
}
