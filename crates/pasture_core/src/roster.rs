//! The authoritative collection of agents for one world.
//!
//! Agents are kept in insertion order, which is also the order in which they
//! are stepped every tick. Dead agents stay in place (with `alive == false`)
//! until [`Roster::purge_dead`] runs between ticks, so indices remain stable
//! while a tick is in progress.

use crate::classifier::Occupants;
use pasture_data::{Agent, CategoryCode, Position, Rect, Species};
use std::collections::HashMap;
use uuid::Uuid;

/// Cell-occupancy query consumed by the perception grid.
///
/// Implementations must only consider live agents and must skip `exclude`.
pub trait Occupancy {
    fn occupancy(&self, rect: &Rect, exclude: Uuid) -> CategoryCode;
}

#[derive(Debug, Clone, Default)]
pub struct Roster {
    agents: Vec<Agent>,
    index: HashMap<Uuid, usize>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_agents(agents: Vec<Agent>) -> Self {
        let mut roster = Self::new();
        for agent in agents {
            roster.push(agent);
        }
        roster
    }

    /// Appends an agent; it will be stepped after every agent already present.
    pub fn push(&mut self, agent: Agent) {
        self.index.insert(agent.id, self.agents.len());
        self.agents.push(agent);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    #[must_use]
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn live(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().filter(|a| a.alive)
    }

    #[must_use]
    pub fn at(&self, idx: usize) -> Option<&Agent> {
        self.agents.get(idx)
    }

    pub fn at_mut(&mut self, idx: usize) -> Option<&mut Agent> {
        self.agents.get_mut(idx)
    }

    #[must_use]
    pub fn index_of(&self, id: Uuid) -> Option<usize> {
        self.index.get(&id).copied()
    }

    #[must_use]
    pub fn get(&self, id: Uuid) -> Option<&Agent> {
        self.index_of(id).and_then(|idx| self.agents.get(idx))
    }

    pub fn get_mut(&mut self, id: Uuid) -> Option<&mut Agent> {
        let idx = self.index_of(id)?;
        self.agents.get_mut(idx)
    }

    /// Looks up an agent only if it is still alive.
    #[must_use]
    pub fn get_live(&self, id: Uuid) -> Option<&Agent> {
        self.get(id).filter(|a| a.alive)
    }

    #[must_use]
    pub fn is_alive(&self, id: Uuid) -> bool {
        self.get_live(id).is_some()
    }

    /// Borrows two distinct agents mutably at once.
    pub fn pair_mut(&mut self, a: usize, b: usize) -> Option<(&mut Agent, &mut Agent)> {
        if a == b || a >= self.agents.len() || b >= self.agents.len() {
            return None;
        }
        if a < b {
            let (left, right) = self.agents.split_at_mut(b);
            Some((&mut left[a], &mut right[0]))
        } else {
            let (left, right) = self.agents.split_at_mut(a);
            Some((&mut right[0], &mut left[b]))
        }
    }

    pub fn mark_dead(&mut self, id: Uuid) -> bool {
        match self.get_mut(id) {
            Some(agent) if agent.alive => {
                agent.alive = false;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn count_live(&self, species: Species) -> usize {
        self.live().filter(|a| a.species == species).count()
    }

    /// Nearest live agent of `species` strictly closer than `within`,
    /// skipping `exclude`. Ties keep the earlier roster entry.
    #[must_use]
    pub fn nearest_live(
        &self,
        from: Position,
        species: Species,
        within: f64,
        exclude: Uuid,
    ) -> Option<(&Agent, f64)> {
        let mut best: Option<(&Agent, f64)> = None;
        for agent in self.live() {
            if agent.species != species || agent.id == exclude {
                continue;
            }
            let dist = from.distance_to(&agent.position);
            if dist < within && best.is_none_or(|(_, d)| dist < d) {
                best = Some((agent, dist));
            }
        }
        best
    }

    /// Removes every dead agent and returns them in roster order.
    pub fn purge_dead(&mut self) -> Vec<Agent> {
        let (live, dead): (Vec<Agent>, Vec<Agent>) =
            std::mem::take(&mut self.agents).into_iter().partition(|a| a.alive);
        self.agents = live;
        self.index = self
            .agents
            .iter()
            .enumerate()
            .map(|(idx, a)| (a.id, idx))
            .collect();
        dead
    }
}

impl Occupancy for Roster {
    fn occupancy(&self, rect: &Rect, exclude: Uuid) -> CategoryCode {
        let mut occupants = Occupants::default();
        for agent in self.live() {
            if agent.id == exclude || !rect.contains(agent.position.x, agent.position.y) {
                continue;
            }
            occupants.mark(agent.species);
            if occupants.is_full() {
                break;
            }
        }
        occupants.code()
    }
}
