//! Per-frame simulation driver
//!
//! The host calls [`Session::frame`] as often as it likes (once per animation
//! frame). Two throttles turn those calls into a ~60 Hz player move tick and a
//! ~25 Hz simulation tick. The simulation tick always runs in this order:
//! spawn, fall, collide, apply. Collisions are resolved in the same tick as
//! the positions they were tested against.

use super::collision::{self, CollisionOutcome};
use super::mover;
use super::session::Session;
use super::state::GameEvent;
use crate::Viewport;
use crate::platform::Clock;

impl Session {
    /// Advance the session to `now_ms`. No-op unless playing.
    pub fn frame(&mut self, now_ms: f64) {
        if !self.state.is_playing() {
            return;
        }
        // Read once; a resize mid-frame applies from the next frame
        let viewport = self.viewport;

        if self.move_gate.ready(now_ms) {
            self.move_tick(&viewport);
        }
        if self.sim_gate.ready(now_ms) {
            self.sim_tick(now_ms, &viewport);
        }
    }

    /// [`Session::frame`] with the time taken from a clock
    pub fn frame_with(&mut self, clock: &impl Clock) {
        self.frame(clock.now_ms());
    }

    fn move_tick(&mut self, viewport: &Viewport) {
        if !self.state.is_playing() {
            return;
        }
        mover::step_player(
            &mut self.player,
            &self.input,
            viewport,
            self.tuning.player_speed,
        );
    }

    fn sim_tick(&mut self, now_ms: f64, viewport: &Viewport) {
        if !self.state.is_playing() {
            return;
        }
        let score = self.state.score();

        let spawned = self
            .spawner
            .poll(now_ms, &self.tuning, score, viewport, &mut self.pool);
        for (id, kind) in spawned {
            self.push_event(GameEvent::Spawned { id, kind });
        }
        mover::advance_entities(&mut self.pool, &self.tuning, score, viewport);
        // A viewport that shrank since the last move tick must not leave the
        // player off-screen for the collision test
        self.player.x = self.player.x.clamp(0.0, self.player.max_x(viewport));

        let outcome = collision::resolve(&self.player.rect(viewport), &self.pool);
        self.apply_collisions(outcome);
    }

    /// Apply a whole tick's collisions together
    fn apply_collisions(&mut self, outcome: CollisionOutcome) {
        if outcome.is_empty() {
            return;
        }
        self.pool.remove_ids(&outcome.removed_ids());

        self.state.add_score(outcome.collected.len() as u32);
        for &id in &outcome.collected {
            self.push_event(GameEvent::Collected { id });
        }

        let lives_before = self.state.lives();
        let ended = self.state.lose_lives(outcome.hazards_hit.len() as u32);
        for (i, &id) in outcome.hazards_hit.iter().enumerate() {
            let lives_left = (lives_before as usize).saturating_sub(i + 1) as u8;
            self.push_event(GameEvent::HazardHit { id, lives_left });
        }

        log::debug!(
            "Collisions: +{} score, -{} lives (score={}, lives={})",
            outcome.collected.len(),
            outcome.hazards_hit.len(),
            self.state.score(),
            self.state.lives()
        );

        if ended {
            self.end_run();
        }
    }

    /// Halt everything synchronously; only `start` resumes
    fn end_run(&mut self) {
        self.spawner.cancel();
        self.move_gate.reset();
        self.sim_gate.reset();
        self.input.clear();
        let score = self.state.score();
        self.push_event(GameEvent::GameOver { score });
        log::info!("Game over! Final score: {}", score);
    }
}
