//! Hunter behaviour: chase the nearest grazer in sight, falling back to the
//! perception grid when the roster scan comes up empty.

use crate::brain::BrainLogic;
use crate::roster::Roster;
use pasture_data::{Position, Species, Target};
use rand::Rng;

use super::perception::refresh_brain;
use super::reproduction::try_reproduce;
use super::{approach_and_feed, resolve_target, should_retarget, StepContext, StepOutput};

pub fn step<R: Rng>(
    idx: usize,
    roster: &mut Roster,
    ctx: &mut StepContext<'_, R>,
    out: &mut StepOutput,
) {
    refresh_brain(idx, roster, ctx.config.perception.min_entity_size);
    let chosen = choose_prey(idx, roster, ctx);
    approach_and_feed(idx, roster, ctx, out, chosen, Species::Grazer);
    try_reproduce(idx, roster, ctx, out);
}

fn choose_prey<R: Rng>(
    idx: usize,
    roster: &Roster,
    ctx: &StepContext<'_, R>,
) -> Option<(Target, Position)> {
    let me = roster.at(idx)?;
    let position = me.position;
    let current = resolve_target(roster, me.target, Species::Grazer);
    let scanned = roster
        .nearest_live(position, Species::Grazer, me.vision_range, me.id)
        .map(|(grazer, dist)| (grazer.id, grazer.position, dist));

    match (scanned, current) {
        (Some((new_id, new_pos, new_dist)), Some((Target::Agent(old_id), old_pos)))
            if new_id != old_id =>
        {
            let old_dist = position.distance_to(&old_pos);
            if should_retarget(old_dist, new_dist, ctx.config.perception.retarget_factor) {
                tracing::debug!(id = %me.id, from = %old_id, to = %new_id, "Hunter switching prey");
                Some((Target::Agent(new_id), new_pos))
            } else {
                Some((Target::Agent(old_id), old_pos))
            }
        }
        (Some((new_id, new_pos, _)), _) => Some((Target::Agent(new_id), new_pos)),
        // Nothing in sight: keep heading for a remembered point, else ask the grid.
        (None, Some((Target::Point(p), _))) => Some((Target::Point(p), p)),
        (None, _) => me
            .brain
            .as_ref()
            .and_then(|b| b.find_nearest_species(Species::Grazer, ctx.config.perception.search))
            .map(|offset| {
                let point = position.offset(offset);
                (Target::Point(point), point)
            }),
    }
}
