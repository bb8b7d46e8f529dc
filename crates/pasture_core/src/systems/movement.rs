use pasture_data::Position;
use rand::Rng;

/// Steps toward `target` by at most `speed`, never overshooting.
///
/// Returns the distance still left to cover.
pub fn move_towards(position: &mut Position, target: Position, speed: f64) -> f64 {
    let dx = target.x - position.x;
    let dy = target.y - position.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist <= speed {
        *position = target;
        return 0.0;
    }
    position.x += dx / dist * speed;
    position.y += dy / dist * speed;
    dist - speed
}

/// Steps directly away from `threat` at full speed.
///
/// When both points coincide there is no "away"; a random heading is used.
pub fn move_away<R: Rng>(position: &mut Position, threat: Position, speed: f64, rng: &mut R) {
    let dx = position.x - threat.x;
    let dy = position.y - threat.y;
    let dist = (dx * dx + dy * dy).sqrt();
    let (ux, uy) = if dist > 0.0 {
        (dx / dist, dy / dist)
    } else {
        let angle = rng.gen_range(0.0..std::f64::consts::TAU);
        (angle.cos(), angle.sin())
    };
    position.x += ux * speed;
    position.y += uy * speed;
}

/// Uniform random displacement in `[-speed, speed]` on each axis.
pub fn wander<R: Rng>(position: &mut Position, speed: f64, rng: &mut R) {
    if speed <= 0.0 {
        return;
    }
    position.x += rng.gen_range(-speed..=speed);
    position.y += rng.gen_range(-speed..=speed);
}

pub fn clamp_to_bounds(position: &mut Position, width: f64, height: f64) {
    position.x = position.x.clamp(0.0, width);
    position.y = position.y.clamp(0.0, height);
}
