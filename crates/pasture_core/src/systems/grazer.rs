//! Grazer behaviour: flee hunters, otherwise forage for growers via the grid.

use crate::brain::BrainLogic;
use crate::roster::Roster;
use pasture_data::{Mode, Position, Species, Target};
use rand::Rng;

use super::movement::{clamp_to_bounds, move_away};
use super::perception::refresh_brain;
use super::reproduction::try_reproduce;
use super::{approach_and_feed, resolve_target, should_retarget, StepContext, StepOutput};

pub fn step<R: Rng>(
    idx: usize,
    roster: &mut Roster,
    ctx: &mut StepContext<'_, R>,
    out: &mut StepOutput,
) {
    let config = ctx.config;
    refresh_brain(idx, roster, config.perception.min_entity_size);

    let Some(me) = roster.at(idx) else {
        return;
    };
    let (id, position, vision) = (me.id, me.position, me.vision_range);

    let threat = roster
        .nearest_live(position, Species::Hunter, vision, id)
        .map(|(hunter, dist)| (hunter.id, hunter.position, dist));

    if let Some((hunter_id, hunter_pos, dist)) = threat {
        let Some(me) = roster.at_mut(idx) else {
            return;
        };
        move_away(&mut me.position, hunter_pos, me.speed, ctx.rng);
        clamp_to_bounds(&mut me.position, config.world.width, config.world.height);
        me.mode = Mode::Flee;
        out.flees += 1;
        tracing::debug!(id = %id, hunter = %hunter_id, dist, "Grazer fleeing");
    } else {
        let chosen = choose_food(idx, roster, ctx);
        approach_and_feed(idx, roster, ctx, out, chosen, Species::Grower);
    }

    try_reproduce(idx, roster, ctx, out);
}

/// Keeps a still-valid target unless the grid offers a much closer grower cell.
fn choose_food<R: Rng>(
    idx: usize,
    roster: &Roster,
    ctx: &StepContext<'_, R>,
) -> Option<(Target, Position)> {
    let me = roster.at(idx)?;
    let position = me.position;
    let current = resolve_target(roster, me.target, Species::Grower);
    let candidate = me
        .brain
        .as_ref()
        .and_then(|b| b.find_nearest_species(Species::Grower, ctx.config.perception.search))
        .map(|offset| position.offset(offset));

    match (current, candidate) {
        (Some((target, goal)), Some(point)) => {
            let factor = ctx.config.perception.retarget_factor;
            if should_retarget(position.distance_to(&goal), position.distance_to(&point), factor) {
                Some((Target::Point(point), point))
            } else {
                Some((target, goal))
            }
        }
        (Some(current), None) => Some(current),
        (None, Some(point)) => Some((Target::Point(point), point)),
        (None, None) => None,
    }
}
