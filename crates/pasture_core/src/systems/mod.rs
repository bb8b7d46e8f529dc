//! Per-agent step functions.
//!
//! The world calls [`step_agent`] once for every live agent, in roster order.
//! A step may mutate the stepping agent and (when feeding) its prey; offspring
//! and events are collected in [`StepOutput`] and applied by the caller after
//! every agent has moved.

pub mod feeding;
pub mod grazer;
pub mod grower;
pub mod hunter;
pub mod movement;
pub mod perception;
pub mod reproduction;
pub mod stats;

use crate::config::AppConfig;
use crate::history::{DeathCause, LiveEvent};
use crate::lifecycle;
use crate::roster::Roster;
use pasture_data::{Agent, Mode, Position, Species, Target};
use rand::Rng;

pub struct StepContext<'a, R: Rng> {
    pub config: &'a AppConfig,
    pub rng: &'a mut R,
    /// Tick being computed (1-based).
    pub tick: u64,
}

#[derive(Debug, Default)]
pub struct StepOutput {
    pub offspring: Vec<Agent>,
    pub events: Vec<LiveEvent>,
    pub flees: u64,
}

impl StepOutput {
    /// Offspring of `species` queued so far this tick.
    #[must_use]
    pub fn pending(&self, species: Species) -> usize {
        self.offspring.iter().filter(|a| a.species == species).count()
    }
}

/// Advances the agent at `idx` by one tick. Dead or missing agents are skipped.
pub fn step_agent<R: Rng>(
    idx: usize,
    roster: &mut Roster,
    ctx: &mut StepContext<'_, R>,
    out: &mut StepOutput,
) {
    let Some(agent) = roster.at_mut(idx) else {
        return;
    };
    if !agent.alive {
        return;
    }

    let species = agent.species;
    let rate = ctx.config.species(species).energy_consumption_rate;
    if !lifecycle::metabolize(agent, rate) {
        tracing::debug!(id = %agent.id, species = species.label(), age = agent.age, "Starved");
        agent.target = None;
        out.events
            .push(LiveEvent::death(agent, DeathCause::Starvation, ctx.tick));
        return;
    }

    match species {
        Species::Grower => grower::step(idx, roster, ctx, out),
        Species::Grazer => grazer::step(idx, roster, ctx, out),
        Species::Hunter => hunter::step(idx, roster, ctx, out),
    }
}

/// World position of a target, or `None` if the target is no longer valid.
///
/// Agent targets must still be alive and of the `prey` species.
#[must_use]
pub fn resolve_target(
    roster: &Roster,
    target: Option<Target>,
    prey: Species,
) -> Option<(Target, Position)> {
    match target? {
        Target::Point(p) => Some((Target::Point(p), p)),
        Target::Agent(id) => roster
            .get_live(id)
            .filter(|a| a.species == prey)
            .map(|a| (Target::Agent(id), a.position)),
    }
}

/// Hysteresis rule: abandon the current target only for a much closer one.
#[inline]
#[must_use]
pub fn should_retarget(current_distance: f64, candidate_distance: f64, factor: f64) -> bool {
    candidate_distance < current_distance * factor
}

/// Moves toward the chosen target (or wanders without one), then eats if
/// food is within the combined eating radius.
///
/// An agent target is eaten only if it is in reach; a point target lets the
/// agent eat the nearest `prey` in reach. A point reached with nothing to eat
/// is dropped.
fn approach_and_feed<R: Rng>(
    idx: usize,
    roster: &mut Roster,
    ctx: &mut StepContext<'_, R>,
    out: &mut StepOutput,
    chosen: Option<(Target, Position)>,
    prey: Species,
) {
    let (width, height) = (ctx.config.world.width, ctx.config.world.height);
    let Some(me) = roster.at_mut(idx) else {
        return;
    };
    let speed = me.speed;

    let mut reached = false;
    match chosen {
        Some((target, goal)) => {
            me.target = Some(target);
            me.mode = match target {
                Target::Agent(_) => Mode::Pursue,
                Target::Point(_) => Mode::Forage,
            };
            reached = movement::move_towards(&mut me.position, goal, speed) == 0.0;
        }
        None => {
            me.target = None;
            me.mode = Mode::Wander;
            movement::wander(&mut me.position, speed, ctx.rng);
        }
    }
    movement::clamp_to_bounds(&mut me.position, width, height);

    let prey_idx = match chosen {
        Some((Target::Agent(id), _)) => roster
            .index_of(id)
            .filter(|&p| feeding::in_reach(roster, idx, p)),
        Some((Target::Point(_), _)) => feeding::prey_in_reach(roster, idx, prey),
        None => None,
    };

    if let Some(prey_idx) = prey_idx {
        feeding::feed(idx, prey_idx, roster, ctx.config, ctx.tick, out);
    } else if reached && matches!(chosen, Some((Target::Point(_), _))) {
        if let Some(me) = roster.at_mut(idx) {
            me.target = None;
        }
    }
}
