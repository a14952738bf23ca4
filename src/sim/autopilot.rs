//! Idle/demo mode - an AI that plays through the same keys a human would

use super::entity::EntityKind;
use super::input::Key;
use super::session::Session;

/// Close enough to a target to stop moving (pixels)
const DEADZONE: f32 = 8.0;
/// Hazards this far above the player's top edge are already dodged
const THREAT_LOOKAHEAD: f32 = 160.0;
/// Extra horizontal clearance kept from hazards
const THREAT_MARGIN: f32 = 10.0;

/// Pick the key to hold this frame (None = hold nothing)
pub fn choose(session: &Session) -> Option<Key> {
    if !session.state().is_playing() {
        return None;
    }
    let viewport = session.viewport();
    let player = session.player();
    let rect = player.rect(&viewport);
    let (left, right) = (rect.min.x, rect.max().x);
    let (top, bottom) = (rect.min.y, rect.max().y);
    let center = (left + right) / 2.0;

    // Lowest hazard that will land on us
    let threat = session
        .entities()
        .iter()
        .filter(|e| e.kind == EntityKind::Hazard)
        .filter(|e| e.pos.y + e.size.y > top - THREAT_LOOKAHEAD && e.pos.y < bottom)
        .filter(|e| e.pos.x < right + THREAT_MARGIN && e.pos.x + e.size.x > left - THREAT_MARGIN)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));

    if let Some(hazard) = threat {
        let hazard_center = hazard.pos.x + hazard.size.x / 2.0;
        let flee_left = hazard_center >= center;
        // Pinned against a wall: run the other way under it
        return if flee_left && player.x > 0.0 {
            Some(Key::Left)
        } else if !flee_left && player.x < player.max_x(&viewport) {
            Some(Key::Right)
        } else if flee_left {
            Some(Key::Right)
        } else {
            Some(Key::Left)
        };
    }

    // Chase the lowest collectible still above our feet
    let target = session
        .entities()
        .iter()
        .filter(|e| e.kind == EntityKind::Collectible && e.pos.y < bottom)
        .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

    let diff = target.pos.x + target.size.x / 2.0 - center;
    if diff.abs() < DEADZONE {
        None
    } else if diff < 0.0 {
        Some(Key::Left)
    } else {
        Some(Key::Right)
    }
}

/// Hold the chosen key (and release the other) on the session
pub fn drive(session: &mut Session) -> Option<Key> {
    let choice = choose(session);
    session.set_key(Key::Left, choice == Some(Key::Left));
    session.set_key(Key::Right, choice == Some(Key::Right));
    choice
}
