//! Session module - configuration, progress tracking, and the per-frame
//! exercise pipeline
//!
//! Re-exports only. All logic in submodules.

mod config;
mod exercise;
mod progress;

pub use config::{ConfigError, ExerciseKind, SessionConfig};
pub use exercise::{ExerciseSession, FrameUpdate, JointSet};
pub use progress::{ProgressEvent, RepProgress};
