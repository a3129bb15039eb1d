//! Simulation state for the ferris wheel scene.
//!
//! # Invariants
//! - The wheel angle always lies in `[0, 360)` degrees.
//! - All state mutations flow through explicit operations (`apply`, `tick`).
//! - Camera parameters are unbounded; nothing here clamps them.

pub mod clock;
pub mod state;

pub use clock::AnimationClock;
pub use state::{AnimationState, CameraState, LightingState, SimConfig, SimState};

pub fn crate_info() -> &'static str {
    "ferris-sim v0.1.0"
}
