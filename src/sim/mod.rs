//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only from host-supplied timestamps
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod input;
pub mod mover;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{CollisionOutcome, Rect};
pub use entity::{Entity, EntityKind, EntityPool};
pub use input::{InputState, Key};
pub use session::{EntityView, Session, Snapshot};
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, Player};
