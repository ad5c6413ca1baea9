//! Motion module - angle estimation, smoothing, and phase classification
//!
//! Re-exports only. All logic in submodules.

mod angle;
mod smoothing;
mod state_machine;

pub use angle::joint_angle;
pub use smoothing::{AngleSmoother, DEFAULT_WINDOW_SIZE};
pub use state_machine::{
    CountingMode, CyclicMachine, CyclicPhase, PhaseChange, ToggleMachine, TogglePhase,
};
