use crate::config::AppConfig;
use crate::history::{DeathCause, LiveEvent};
use crate::roster::Roster;
use pasture_data::Species;

use super::StepOutput;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Meal {
    pub gained: f64,
    pub prey_died: bool,
}

/// Nearest live agent of `prey` whose body overlaps the eater's
/// (`distance < eater.size/2 + prey.size/2`).
#[must_use]
pub fn prey_in_reach(roster: &Roster, eater_idx: usize, prey: Species) -> Option<usize> {
    let eater = roster.at(eater_idx)?;
    let mut best: Option<(usize, f64)> = None;
    for (idx, other) in roster.agents().iter().enumerate() {
        if idx == eater_idx || !other.alive || other.species != prey {
            continue;
        }
        let dist = eater.distance_to(other);
        if dist < eater.eating_radius(other) && best.is_none_or(|(_, d)| dist < d) {
            best = Some((idx, dist));
        }
    }
    best.map(|(idx, _)| idx)
}

#[must_use]
pub fn in_reach(roster: &Roster, eater_idx: usize, prey_idx: usize) -> bool {
    match (roster.at(eater_idx), roster.at(prey_idx)) {
        (Some(eater), Some(prey)) => prey.alive && eater.distance_to(prey) < eater.eating_radius(prey),
        _ => false,
    }
}

/// The eater takes `min(feed_cap, prey.energy)` from the prey and drops its target.
///
/// Lethal feeders always kill and collect their kill bonuses; otherwise the
/// prey dies only once its energy is exhausted.
pub fn feed(
    eater_idx: usize,
    prey_idx: usize,
    roster: &mut Roster,
    config: &AppConfig,
    tick: u64,
    out: &mut StepOutput,
) -> Option<Meal> {
    let (eater, prey) = roster.pair_mut(eater_idx, prey_idx)?;
    if !eater.alive || !prey.alive {
        return None;
    }

    let params = config.species(eater.species);
    let gained = params.feed_cap.min(prey.energy).max(0.0);
    eater.energy += gained;
    eater.target = None;
    prey.energy -= gained;

    if params.lethal_feeding {
        prey.alive = false;
        eater.speed += params.speed_gain_per_kill;
        eater.vision_range += params.vision_gain_per_kill;
    } else if prey.energy <= 0.0 {
        prey.alive = false;
    }
    let prey_died = !prey.alive;

    tracing::debug!(
        eater = %eater.id,
        prey = %prey.id,
        gained,
        prey_died,
        "{} fed",
        eater.species.label()
    );
    out.events
        .push(LiveEvent::feed(eater, prey, gained, params.lethal_feeding, tick));
    if prey_died {
        prey.target = None;
        out.events.push(LiveEvent::death(prey, DeathCause::Eaten, tick));
    }

    Some(Meal { gained, prey_died })
}
