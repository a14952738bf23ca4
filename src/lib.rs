//! Dino Catch - A falling-object catch arcade game
//!
//! Core modules:
//! - `sim`: Simulation (spawning, movement, collisions, game state)
//! - `platform`: Clock/timer primitives and the browser host bindings
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use sim::{GameEvent, GamePhase, Session, Snapshot};
pub use tuning::{Tuning, TuningError};

use serde::{Deserialize, Serialize};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Minimum interval between player move ticks (~60 Hz)
    pub const MOVE_INTERVAL_MS: f64 = 16.0;
    /// Minimum interval between simulation ticks (~25 Hz)
    pub const SIM_INTERVAL_MS: f64 = 40.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 60.0;
    /// Distance from the bottom of the viewport to the top of the player
    pub const PLAYER_BOTTOM_OFFSET: f32 = 100.0;
    pub const PLAYER_START_X: f32 = 200.0;
    /// Horizontal pixels per move tick
    pub const PLAYER_SPEED: f32 = 15.0;
    pub const STARTING_LIVES: u8 = 3;

    /// Falling entity defaults
    pub const ENTITY_WIDTH: f32 = 40.0;
    pub const ENTITY_HEIGHT: f32 = 40.0;
    /// Pixels per simulation tick
    pub const COLLECTIBLE_FALL_SPEED: f32 = 5.0;
    pub const HAZARD_FALL_SPEED: f32 = 7.0;

    /// Spawn cadence
    pub const COLLECTIBLE_SPAWN_MS: f64 = 1200.0;
    pub const HAZARD_BASE_PERIOD_MS: f64 = 2500.0;
    pub const HAZARD_MIN_PERIOD_MS: f64 = 600.0;
    /// Hazard period shrinks by this much per point of score
    pub const HAZARD_PERIOD_DECAY_MS: f64 = 10.0;

    /// Hazards start falling faster once score reaches this
    pub const SPEEDUP_SCORE_THRESHOLD: u32 = 10;
    /// Extra hazard fall speed per point of score past the threshold
    pub const SPEEDUP_PER_POINT: f32 = 0.1;
}

/// Playfield size in pixels, supplied by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}
