use crate::brain::BrainLogic;
use crate::roster::Roster;
use pasture_data::Brain;

/// Rebuilds the perception grid of the agent at `idx` against the current roster.
///
/// The grid is moved out of the agent for the duration of the rebuild so the
/// roster can be read while the grid is written.
pub fn refresh_brain(idx: usize, roster: &mut Roster, min_entity_size: f64) {
    let Some(agent) = roster.at_mut(idx) else {
        return;
    };
    let origin = agent.position;
    let vision = agent.vision_range;
    let owner = agent.id;
    let mut brain = agent.brain.take().unwrap_or_else(|| Brain::for_owner(owner));

    brain.refresh(origin, vision, min_entity_size, &*roster);

    if let Some(agent) = roster.at_mut(idx) {
        agent.brain = Some(brain);
    }
}
