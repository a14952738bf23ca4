//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time/ticks (`clock`)
//! - Input events and the per-frame loop in the browser (`web`)

pub mod clock;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use clock::{Clock, Interval, ManualClock, MonotonicClock, Throttle};
