//! A play session: everything the loop owns, behind a command/snapshot API
//!
//! Hosts may only write input, change the viewport and call `start`. All
//! other state is read through `snapshot` or the read-only accessors.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::entity::{EntityKind, EntityPool};
use super::input::{InputState, Key};
use super::spawner::Spawner;
use super::state::{GameEvent, GamePhase, GameState, Player};
use crate::Viewport;
use crate::platform::Throttle;
use crate::tuning::Tuning;

/// Pending events kept when the host never drains them
pub const MAX_PENDING_EVENTS: usize = 256;

/// A falling entity as the presentation layer sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u32,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
}

/// Read-only view of the session, published each frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub score: u32,
    pub lives: u8,
    pub phase: GamePhase,
    pub player_x: f32,
    pub player_y: f32,
    pub entities: Vec<EntityView>,
}

/// Owns the game state, the entity pool, the player and both tick gates
#[derive(Debug, Clone)]
pub struct Session {
    pub(super) tuning: Tuning,
    pub(super) viewport: Viewport,
    pub(super) state: GameState,
    pub(super) player: Player,
    pub(super) pool: EntityPool,
    pub(super) input: InputState,
    pub(super) spawner: Spawner,
    /// High-frequency player move tick
    pub(super) move_gate: Throttle,
    /// Coarse tick: spawn, fall, collide
    pub(super) sim_gate: Throttle,
    pub(super) events: VecDeque<GameEvent>,
}

impl Session {
    /// New idle session with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(Tuning::default(), seed)
    }

    pub fn with_tuning(tuning: Tuning, seed: u64) -> Self {
        Self {
            viewport: Viewport::default(),
            state: GameState::new(tuning.starting_lives),
            player: Player::new(&tuning),
            pool: EntityPool::new(),
            input: InputState::default(),
            spawner: Spawner::new(seed),
            move_gate: Throttle::new(tuning.move_interval_ms),
            sim_gate: Throttle::new(tuning.sim_interval_ms),
            events: VecDeque::new(),
            tuning,
        }
    }

    /// Begin (or restart) a run. Never rejected.
    pub fn start(&mut self) {
        let previous = self.state.phase();
        self.state.start(self.tuning.starting_lives);
        self.pool.clear();
        self.input.clear();
        self.player = Player::new(&self.tuning);
        self.move_gate.reset();
        self.sim_gate.reset();
        self.spawner.arm();
        self.events.clear();
        self.push_event(GameEvent::Started);
        log::info!(
            "Session started from {:?} ({} lives, viewport {}x{})",
            previous,
            self.state.lives(),
            self.viewport.width,
            self.viewport.height
        );
    }

    pub fn set_key(&mut self, key: Key, pressed: bool) {
        self.input.set_key(key, pressed);
    }

    /// Host key-down by name. Returns false for keys the game ignores.
    pub fn key_down(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.set_key(key, true);
                true
            }
            None => false,
        }
    }

    /// Host key-up by name. Returns false for keys the game ignores.
    pub fn key_up(&mut self, code: &str) -> bool {
        match Key::from_code(code) {
            Some(key) => {
                self.set_key(key, false);
                true
            }
            None => false,
        }
    }

    /// Takes effect from the next tick
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn entities(&self) -> &EntityPool {
        &self.pool
    }

    pub fn input(&self) -> InputState {
        self.input
    }

    /// Current hazard spawn period (shrinks with score)
    pub fn hazard_period_ms(&self) -> f64 {
        self.tuning.hazard_period_ms(self.state.score())
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            score: self.state.score(),
            lives: self.state.lives(),
            phase: self.state.phase(),
            player_x: self.player.x,
            player_y: self.player.y(&self.viewport),
            entities: self
                .pool
                .iter()
                .map(|e| EntityView {
                    id: e.id,
                    kind: e.kind,
                    x: e.pos.x,
                    y: e.pos.y,
                })
                .collect(),
        }
    }

    /// Take all events since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    pub(super) fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }
}
