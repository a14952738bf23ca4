//! Timed entity spawning
//!
//! Two independent timers drop collectibles and hazards at random columns.
//! The hazard cadence tightens as score climbs.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::entity::{Entity, EntityKind, EntityPool};
use crate::Viewport;
use crate::platform::Interval;
use crate::tuning::Tuning;

/// Owns the spawn timers, the spawn RNG and entity id allocation
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    collectible_timer: Interval,
    hazard_timer: Interval,
    /// Ids are never reused, even across sessions
    next_id: u32,
}

impl Spawner {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            collectible_timer: Interval::new(),
            hazard_timer: Interval::new(),
            next_id: 1,
        }
    }

    /// Start both timers; the first poll sets their baseline
    pub fn arm(&mut self) {
        self.collectible_timer.arm();
        self.hazard_timer.arm();
    }

    pub fn cancel(&mut self) {
        self.collectible_timer.cancel();
        self.hazard_timer.cancel();
    }

    pub fn is_armed(&self) -> bool {
        self.collectible_timer.is_armed() || self.hazard_timer.is_armed()
    }

    /// Fire whichever timers are due, inserting new entities into the pool.
    /// Returns the `(id, kind)` of every entity that was actually inserted.
    pub fn poll(
        &mut self,
        now_ms: f64,
        tuning: &Tuning,
        score: u32,
        viewport: &Viewport,
        pool: &mut EntityPool,
    ) -> Vec<(u32, EntityKind)> {
        let mut spawned = Vec::new();
        if self.collectible_timer.poll(now_ms, tuning.collectible_spawn_ms) {
            if let Some(id) = self.spawn(EntityKind::Collectible, tuning, viewport, pool) {
                spawned.push((id, EntityKind::Collectible));
            }
        }
        if self.hazard_timer.poll(now_ms, tuning.hazard_period_ms(score)) {
            if let Some(id) = self.spawn(EntityKind::Hazard, tuning, viewport, pool) {
                spawned.push((id, EntityKind::Hazard));
            }
        }
        spawned
    }

    /// Insert one entity at the top edge in a random column. Returns its id,
    /// or None if the pool rejected it.
    pub fn spawn(
        &mut self,
        kind: EntityKind,
        tuning: &Tuning,
        viewport: &Viewport,
        pool: &mut EntityPool,
    ) -> Option<u32> {
        let id = self.next_entity_id();
        let range = (viewport.width - tuning.entity_width).max(0.0);
        let x = self.rng.random::<f32>() * range;
        let size = Vec2::new(tuning.entity_width, tuning.entity_height);
        if !pool.insert(Entity::new(id, kind, x, size)) {
            return None;
        }
        log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, x);
        Some(id)
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1).max(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn poll_at(
        spawner: &mut Spawner,
        now: f64,
        score: u32,
        pool: &mut EntityPool,
    ) -> Vec<(u32, EntityKind)> {
        spawner.poll(
            now,
            &Tuning::default(),
            score,
            &Viewport::new(800.0, 600.0),
            pool,
        )
    }

    #[test]
    fn test_spawn_position_in_range() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut spawner = Spawner::new(42);
        let mut pool = EntityPool::new();
        for _ in 0..200 {
            spawner.spawn(EntityKind::Hazard, &tuning, &viewport, &mut pool);
        }
        assert_eq!(pool.len(), 200);
        for e in pool.iter() {
            assert_eq!(e.pos.y, 0.0);
            assert!(e.pos.x >= 0.0 && e.pos.x <= 760.0, "x={}", e.pos.x);
        }
    }

    #[test]
    fn test_spawn_in_narrow_viewport() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(10.0, 600.0);
        let mut spawner = Spawner::new(1);
        let mut pool = EntityPool::new();
        let id = spawner.spawn(EntityKind::Collectible, &tuning, &viewport, &mut pool);
        assert_eq!(id.and_then(|id| pool.get(id)).map(|e| e.pos.x), Some(0.0));
    }

    #[test]
    fn test_same_seed_same_positions() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(800.0, 600.0);
        let (mut a, mut b) = (Spawner::new(7), Spawner::new(7));
        let (mut pool_a, mut pool_b) = (EntityPool::new(), EntityPool::new());
        for _ in 0..10 {
            a.spawn(EntityKind::Collectible, &tuning, &viewport, &mut pool_a);
            b.spawn(EntityKind::Collectible, &tuning, &viewport, &mut pool_b);
        }
        let xs_a: Vec<f32> = pool_a.iter().map(|e| e.pos.x).collect();
        let xs_b: Vec<f32> = pool_b.iter().map(|e| e.pos.x).collect();
        assert_eq!(xs_a, xs_b);
    }

    #[test]
    fn test_ids_unique() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut spawner = Spawner::new(3);
        let mut pool = EntityPool::new();
        let a = spawner.spawn(EntityKind::Collectible, &tuning, &viewport, &mut pool);
        pool.clear();
        let b = spawner.spawn(EntityKind::Collectible, &tuning, &viewport, &mut pool);
        assert!(a.is_some());
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejected_insert_is_not_reported() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut pool = EntityPool::new();
        // Occupy the id a fresh spawner hands out first
        Spawner::new(1).spawn(EntityKind::Hazard, &tuning, &viewport, &mut pool);

        let mut spawner = Spawner::new(2);
        assert_eq!(
            spawner.spawn(EntityKind::Collectible, &tuning, &viewport, &mut pool),
            None
        );
        assert_eq!(pool.len(), 1);
        assert_eq!(pool.count(EntityKind::Collectible), 0);

        // Timer-driven spawns skip the rejected id too
        spawner.arm();
        poll_at(&mut spawner, 0.0, 0, &mut pool);
        let spawned = poll_at(&mut spawner, 1200.0, 0, &mut pool);
        assert_eq!(spawned, vec![(2, EntityKind::Collectible)]);
    }

    #[test]
    fn test_timers_follow_periods() {
        let mut spawner = Spawner::new(5);
        let mut pool = EntityPool::new();
        spawner.arm();

        assert!(poll_at(&mut spawner, 0.0, 0, &mut pool).is_empty());
        assert!(poll_at(&mut spawner, 1199.0, 0, &mut pool).is_empty());

        let events = poll_at(&mut spawner, 1200.0, 0, &mut pool);
        assert!(matches!(events.as_slice(), [(_, EntityKind::Collectible)]));

        let events = poll_at(&mut spawner, 2500.0, 0, &mut pool);
        // Collectible (due 2400) and hazard (due 2500) both fire
        assert_eq!(events.len(), 2);
        assert_eq!(pool.count(EntityKind::Hazard), 1);
        assert_eq!(pool.count(EntityKind::Collectible), 2);
    }

    #[test]
    fn test_hazard_cadence_tightens_with_score() {
        let mut spawner = Spawner::new(5);
        let mut pool = EntityPool::new();
        spawner.arm();
        poll_at(&mut spawner, 0.0, 0, &mut pool);
        poll_at(&mut spawner, 2500.0, 500, &mut pool);
        assert_eq!(pool.count(EntityKind::Hazard), 1);
        // Re-armed with the floor period (600 ms) at score 500
        poll_at(&mut spawner, 3100.0, 500, &mut pool);
        assert_eq!(pool.count(EntityKind::Hazard), 2);
    }

    #[test]
    fn test_cancel_stops_spawns() {
        let mut spawner = Spawner::new(5);
        let mut pool = EntityPool::new();
        spawner.arm();
        poll_at(&mut spawner, 0.0, 0, &mut pool);
        spawner.cancel();
        assert!(!spawner.is_armed());
        assert!(poll_at(&mut spawner, 100_000.0, 0, &mut pool).is_empty());
        assert!(pool.is_empty());
    }
}
