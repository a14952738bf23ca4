//! Game balance tuning
//!
//! Every speed, size and spawn cadence the simulation uses lives here so a
//! host can rebalance the game from a JSON document without recompiling.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating a [`Tuning`]
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to parse tuning: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Data-driven game balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    pub move_interval_ms: f64,
    pub sim_interval_ms: f64,

    // === Player ===
    pub player_width: f32,
    pub player_height: f32,
    pub player_bottom_offset: f32,
    pub player_start_x: f32,
    pub player_speed: f32,
    pub starting_lives: u8,

    // === Falling entities ===
    pub entity_width: f32,
    pub entity_height: f32,
    pub collectible_fall_speed: f32,
    pub hazard_fall_speed: f32,

    // === Spawning ===
    pub collectible_spawn_ms: f64,
    pub hazard_base_period_ms: f64,
    pub hazard_min_period_ms: f64,
    pub hazard_period_decay_ms: f64,

    // === Difficulty ===
    pub speedup_score_threshold: u32,
    pub speedup_per_point: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_interval_ms: MOVE_INTERVAL_MS,
            sim_interval_ms: SIM_INTERVAL_MS,

            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            player_bottom_offset: PLAYER_BOTTOM_OFFSET,
            player_start_x: PLAYER_START_X,
            player_speed: PLAYER_SPEED,
            starting_lives: STARTING_LIVES,

            entity_width: ENTITY_WIDTH,
            entity_height: ENTITY_HEIGHT,
            collectible_fall_speed: COLLECTIBLE_FALL_SPEED,
            hazard_fall_speed: HAZARD_FALL_SPEED,

            collectible_spawn_ms: COLLECTIBLE_SPAWN_MS,
            hazard_base_period_ms: HAZARD_BASE_PERIOD_MS,
            hazard_min_period_ms: HAZARD_MIN_PERIOD_MS,
            hazard_period_decay_ms: HAZARD_PERIOD_DECAY_MS,

            speedup_score_threshold: SPEEDUP_SCORE_THRESHOLD,
            speedup_per_point: SPEEDUP_PER_POINT,
        }
    }
}

impl Tuning {
    /// Parse a (possibly partial) JSON document; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        // Plain data with no maps keyed by non-strings, cannot fail
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive_f32(field: &'static str, v: f32) -> Result<(), TuningError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }
        fn positive_f64(field: &'static str, v: f64) -> Result<(), TuningError> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive number",
                })
            }
        }

        positive_f64("move_interval_ms", self.move_interval_ms)?;
        positive_f64("sim_interval_ms", self.sim_interval_ms)?;
        positive_f32("player_width", self.player_width)?;
        positive_f32("player_height", self.player_height)?;
        positive_f32("player_speed", self.player_speed)?;
        positive_f32("entity_width", self.entity_width)?;
        positive_f32("entity_height", self.entity_height)?;
        positive_f32("collectible_fall_speed", self.collectible_fall_speed)?;
        positive_f32("hazard_fall_speed", self.hazard_fall_speed)?;
        positive_f64("collectible_spawn_ms", self.collectible_spawn_ms)?;
        positive_f64("hazard_base_period_ms", self.hazard_base_period_ms)?;
        positive_f64("hazard_min_period_ms", self.hazard_min_period_ms)?;

        if !self.player_bottom_offset.is_finite() || self.player_bottom_offset < 0.0 {
            return Err(TuningError::Invalid {
                field: "player_bottom_offset",
                reason: "must be zero or positive",
            });
        }
        if !self.player_start_x.is_finite() || self.player_start_x < 0.0 {
            return Err(TuningError::Invalid {
                field: "player_start_x",
                reason: "must be zero or positive",
            });
        }
        if !self.hazard_period_decay_ms.is_finite() || self.hazard_period_decay_ms < 0.0 {
            return Err(TuningError::Invalid {
                field: "hazard_period_decay_ms",
                reason: "must be zero or positive",
            });
        }
        if !self.speedup_per_point.is_finite() || self.speedup_per_point < 0.0 {
            return Err(TuningError::Invalid {
                field: "speedup_per_point",
                reason: "must be zero or positive",
            });
        }
        if self.hazard_min_period_ms > self.hazard_base_period_ms {
            return Err(TuningError::Invalid {
                field: "hazard_min_period_ms",
                reason: "must not exceed hazard_base_period_ms",
            });
        }
        if self.starting_lives == 0 {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1",
            });
        }
        if self.starting_lives > STARTING_LIVES {
            return Err(TuningError::Invalid {
                field: "starting_lives",
                reason: "must not exceed 3",
            });
        }
        Ok(())
    }

    /// Hazard spawn period for a given score, floor-clamped at the minimum
    pub fn hazard_period_ms(&self, score: u32) -> f64 {
        let decayed = self.hazard_base_period_ms - score as f64 * self.hazard_period_decay_ms;
        decayed.max(self.hazard_min_period_ms)
    }

    /// Extra hazard fall speed per tick for a given score
    pub fn hazard_speedup(&self, score: u32) -> f32 {
        if score >= self.speedup_score_threshold {
            score as f32 * self.speedup_per_point
        } else {
            0.0
        }
    }
}
