//! Kinematics: player sliding and entities falling

use super::entity::{EntityKind, EntityPool};
use super::input::InputState;
use super::state::Player;
use crate::Viewport;
use crate::tuning::Tuning;

/// Move the player one step in the held direction, clamped to the viewport
pub fn step_player(player: &mut Player, input: &InputState, viewport: &Viewport, speed: f32) {
    let max_x = player.max_x(viewport);
    let x = player.x + input.direction() * speed;
    // Clamp even without input so a shrunken viewport pulls the player back
    player.x = x.clamp(0.0, max_x);
}

/// Per-tick fall distance for an entity kind at the given score
pub fn fall_speed(tuning: &Tuning, kind: EntityKind, score: u32) -> f32 {
    match kind {
        EntityKind::Collectible => tuning.collectible_fall_speed,
        EntityKind::Hazard => tuning.hazard_fall_speed + tuning.hazard_speedup(score),
    }
}

/// Drop every entity by its fall speed and cull those past the bottom edge.
/// Returns how many were culled.
pub fn advance_entities(
    pool: &mut EntityPool,
    tuning: &Tuning,
    score: u32,
    viewport: &Viewport,
) -> usize {
    let collectible_speed = fall_speed(tuning, EntityKind::Collectible, score);
    let hazard_speed = fall_speed(tuning, EntityKind::Hazard, score);

    for entity in pool.iter_mut() {
        entity.pos.y += match entity.kind {
            EntityKind::Collectible => collectible_speed,
            EntityKind::Hazard => hazard_speed,
        };
    }

    let culled = pool.retain(|e| e.pos.y < viewport.height);
    if culled > 0 {
        log::trace!("Culled {} entities past the bottom edge", culled);
    }
    culled
}
