//! Game state and core simulation types
//!
//! `GameState` is the only owner of phase, score and lives. Everything else
//! changes them through `start`, `add_score` and `lose_lives`.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::entity::EntityKind;
use crate::Viewport;
use crate::consts::STARTING_LIVES;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Run ended (final score and lives kept for display)
    GameOver,
}

/// Notable things that happened during a tick, for the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Spawned { id: u32, kind: EntityKind },
    Collected { id: u32 },
    HazardHit { id: u32, lives_left: u8 },
    GameOver { score: u32 },
}

/// The player character (moves horizontally along a fixed band)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
    /// Distance from the viewport bottom to the player's top edge
    pub bottom_offset: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: tuning.player_start_x,
            width: tuning.player_width,
            height: tuning.player_height,
            bottom_offset: tuning.player_bottom_offset,
        }
    }

    /// Top edge for the given viewport
    pub fn y(&self, viewport: &Viewport) -> f32 {
        viewport.height - self.bottom_offset
    }

    /// Largest x that keeps the player fully on screen
    pub fn max_x(&self, viewport: &Viewport) -> f32 {
        (viewport.width - self.width).max(0.0)
    }

    pub fn rect(&self, viewport: &Viewport) -> Rect {
        Rect::from_xywh(self.x, self.y(viewport), self.width, self.height)
    }
}

/// Phase, score and lives for the current session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub(crate) phase: GamePhase,
    pub(crate) score: u32,
    pub(crate) lives: u8,
}

impl GameState {
    pub fn new(starting_lives: u8) -> Self {
        Self {
            phase: GamePhase::Idle,
            score: 0,
            lives: starting_lives.min(STARTING_LIVES),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Begin a fresh run. Allowed from every phase.
    pub fn start(&mut self, starting_lives: u8) {
        self.score = 0;
        // Tunings built in code skip validation
        self.lives = starting_lives.clamp(1, STARTING_LIVES);
        self.phase = GamePhase::Playing;
    }

    pub fn add_score(&mut self, points: u32) {
        if !self.is_playing() {
            return;
        }
        self.score = self.score.saturating_add(points);
    }

    /// Take `count` lives. Returns true if this ended the run.
    pub fn lose_lives(&mut self, count: u32) -> bool {
        if !self.is_playing() || count == 0 {
            return false;
        }
        let remaining = (self.lives as u32).saturating_sub(count);
        self.lives = remaining as u8;
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_idle() {
        let state = GameState::new(3);
        assert_eq!(state.phase(), GamePhase::Idle);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), 3);
    }

    #[test]
    fn test_start_resets_counters() {
        let mut state = GameState::new(3);
        state.start(3);
        state.add_score(7);
        state.lose_lives(3);
        assert_eq!(state.phase(), GamePhase::GameOver);

        state.start(3);
        assert_eq!(state.phase(), GamePhase::Playing);
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), 3);
    }

    #[test]
    fn test_start_caps_lives() {
        let mut state = GameState::new(200);
        assert_eq!(state.lives(), 3);
        state.start(200);
        assert_eq!(state.lives(), 3);
        state.start(0);
        assert_eq!(state.lives(), 1);
    }

    #[test]
    fn test_lose_lives_clamps_at_zero() {
        let mut state = GameState::new(3);
        state.start(3);
        assert!(!state.lose_lives(1));
        assert_eq!(state.lives(), 2);
        assert!(state.lose_lives(5));
        assert_eq!(state.lives(), 0);
        assert_eq!(state.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_mutations_ignored_outside_playing() {
        let mut state = GameState::new(3);
        state.add_score(5);
        assert!(!state.lose_lives(1));
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), 3);

        state.start(1);
        assert!(state.lose_lives(1));
        state.add_score(5);
        assert!(!state.lose_lives(1));
        assert_eq!(state.score(), 0);
        assert_eq!(state.lives(), 0);
    }

    #[test]
    fn test_player_geometry() {
        let player = Player::new(&Tuning::default());
        let viewport = Viewport::new(800.0, 600.0);
        assert_eq!(player.y(&viewport), 500.0);
        assert_eq!(player.max_x(&viewport), 740.0);

        let tiny = Viewport::new(30.0, 600.0);
        assert_eq!(player.max_x(&tiny), 0.0);
    }
}
