//! Collision detection between the player and falling entities
//!
//! Everything is an axis-aligned rectangle. `resolve` only reads the pool and
//! reports what it found; the session applies the whole outcome at once so a
//! tick never observes half-applied removals.

use glam::Vec2;

use super::entity::{EntityKind, EntityPool};

/// Axis-aligned rectangle (top-left corner + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap: rectangles that only share an edge do not touch
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        other.min.x < a_max.x
            && b_max.x > self.min.x
            && other.min.y < a_max.y
            && b_max.y > self.min.y
    }
}

/// Result of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionOutcome {
    /// Collectibles touched this tick
    pub collected: Vec<u32>,
    /// Hazards touched this tick
    pub hazards_hit: Vec<u32>,
}

impl CollisionOutcome {
    pub fn is_empty(&self) -> bool {
        self.collected.is_empty() && self.hazards_hit.is_empty()
    }

    /// Every entity id to remove from the pool
    pub fn removed_ids(&self) -> Vec<u32> {
        let mut ids = Vec::with_capacity(self.collected.len() + self.hazards_hit.len());
        ids.extend_from_slice(&self.collected);
        ids.extend_from_slice(&self.hazards_hit);
        ids
    }
}

/// Test the player against every entity in the pool
pub fn resolve(player: &Rect, pool: &EntityPool) -> CollisionOutcome {
    let mut outcome = CollisionOutcome::default();
    for entity in pool.iter() {
        if !player.overlaps(&entity.rect()) {
            continue;
        }
        match entity.kind {
            EntityKind::Collectible => outcome.collected.push(entity.id),
            EntityKind::Hazard => outcome.hazards_hit.push(entity.id),
        }
    }
    outcome
}
