//! Session configuration and fail-fast validation
//!
//! Thresholds, goal, and window size are fixed at session construction.
//! Bad values reject the session outright; nothing is silently clamped.

use wasm_bindgen::prelude::*;

use crate::motion::{CountingMode, DEFAULT_WINDOW_SIZE};

/// Which exercise the session classifies
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExerciseKind {
    /// Elbow flex/extend (shoulder-elbow-wrist)
    Arm,
    /// Knee flex/extend (hip-knee-ankle)
    Leg,
    /// Sit-stand toggle (hip and knee angles together)
    SitStand,
}

impl ExerciseKind {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "arm" => Some(ExerciseKind::Arm),
            "leg" => Some(ExerciseKind::Leg),
            "sit-stand" => Some(ExerciseKind::SitStand),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ExerciseKind::Arm => "arm",
            ExerciseKind::Leg => "leg",
            ExerciseKind::SitStand => "sit-stand",
        }
    }
}

/// Errors that reject session construction
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    UnknownExercise(String),
    /// flexion_threshold must be strictly below extension_threshold
    InvertedThresholds { flexion: f32, extension: f32 },
    NonFiniteThreshold,
    ZeroWindowSize,
    ZeroGoal,
}

impl From<ConfigError> for JsValue {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::UnknownExercise(name) => {
                JsValue::from_str(&format!("Unknown exercise '{}'", name))
            }
            ConfigError::InvertedThresholds { flexion, extension } => JsValue::from_str(&format!(
                "Flexion threshold {} must be below extension threshold {}",
                flexion, extension
            )),
            ConfigError::NonFiniteThreshold => JsValue::from_str("Thresholds must be finite"),
            ConfigError::ZeroWindowSize => JsValue::from_str("Smoothing window size must be > 0"),
            ConfigError::ZeroGoal => JsValue::from_str("Goal repetition count must be > 0"),
        }
    }
}

/// Immutable per-session configuration
#[derive(Clone, Copy, Debug)]
pub struct SessionConfig {
    pub kind: ExerciseKind,
    /// Angle below which a joint counts as flexed (degrees)
    pub flexion_threshold: f32,
    /// Angle above which a joint counts as extended (degrees)
    pub extension_threshold: f32,
    /// Repetitions needed to launch the reward
    pub goal_reps: u32,
    /// Smoothing window length in samples
    pub window_size: usize,
    pub counting: CountingMode,
}

impl SessionConfig {
    pub fn new(kind: ExerciseKind) -> Self {
        Self {
            kind,
            flexion_threshold: 90.0,
            extension_threshold: 120.0,
            goal_reps: 10,
            window_size: DEFAULT_WINDOW_SIZE,
            counting: CountingMode::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.flexion_threshold.is_finite() || !self.extension_threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold);
        }
        if self.flexion_threshold >= self.extension_threshold {
            return Err(ConfigError::InvertedThresholds {
                flexion: self.flexion_threshold,
                extension: self.extension_threshold,
            });
        }
        if self.window_size == 0 {
            return Err(ConfigError::ZeroWindowSize);
        }
        if self.goal_reps == 0 {
            return Err(ConfigError::ZeroGoal);
        }
        Ok(())
    }
}
