use crate::roster::Roster;
use rand::Rng;

use super::reproduction::try_reproduce;
use super::{StepContext, StepOutput};

/// Photosynthesis, growth toward the maximum size, then the reproduction gate.
pub fn step<R: Rng>(
    idx: usize,
    roster: &mut Roster,
    ctx: &mut StepContext<'_, R>,
    out: &mut StepOutput,
) {
    let Some(grower) = roster.at_mut(idx) else {
        return;
    };
    grower.energy += ctx.config.growth.energy_gain_rate;
    if grower.size < grower.max_size {
        grower.size = (grower.size + grower.growth_rate).min(grower.max_size);
    }

    try_reproduce(idx, roster, ctx, out);
}
