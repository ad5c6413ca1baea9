//! Per-frame exercise pipeline
//!
//! One `ExerciseSession` per selected exercise. Each frame's tracked
//! joints flow through angle estimation, smoothing, the phase machine,
//! and the progress tracker, strictly in that order. The session owns
//! all mutable classification state and is driven by a single caller.

use crate::motion::{joint_angle, AngleSmoother, CyclicMachine, ToggleMachine};
use crate::session::config::{ConfigError, ExerciseKind, SessionConfig};
use crate::session::progress::{ProgressEvent, RepProgress};

/// Normalized 2D positions of the tracked left-side joints for one frame
#[derive(Clone, Copy, Debug, Default)]
pub struct JointSet {
    pub shoulder: (f32, f32),
    pub elbow: (f32, f32),
    pub wrist: (f32, f32),
    pub hip: (f32, f32),
    pub knee: (f32, f32),
    pub ankle: (f32, f32),
}

/// What the pipeline produced for one processed frame
#[derive(Clone, Copy, Debug)]
pub struct FrameUpdate {
    /// Current phase after this frame ("neutral", "sitting", ...)
    pub phase: &'static str,
    /// Smoothed primary angle (elbow for arm, knee for leg and sit-stand)
    pub smoothed_angle: f32,
    /// Whether this frame crossed a phase boundary
    pub transitioned: bool,
    /// Progress event when the transition counted as a repetition
    pub event: Option<ProgressEvent>,
}

enum Machine {
    Cyclic(CyclicMachine),
    Toggle(ToggleMachine),
}

/// All classification state for one exercise selection
pub struct ExerciseSession {
    config: SessionConfig,
    machine: Machine,
    /// Primary angle window (elbow or knee)
    smoother: AngleSmoother,
    /// Hip angle window, sit-stand only
    hip_smoother: Option<AngleSmoother>,
    progress: RepProgress,
}

impl ExerciseSession {
    /// Build a session, rejecting invalid configuration outright
    pub fn new(config: SessionConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let machine = match config.kind {
            ExerciseKind::Arm | ExerciseKind::Leg => Machine::Cyclic(CyclicMachine::new(
                config.flexion_threshold,
                config.extension_threshold,
                config.counting,
            )),
            ExerciseKind::SitStand => Machine::Toggle(ToggleMachine::new(
                config.flexion_threshold,
                config.extension_threshold,
            )),
        };

        let hip_smoother = match config.kind {
            ExerciseKind::SitStand => Some(AngleSmoother::new(config.window_size)),
            _ => None,
        };

        Ok(Self {
            machine,
            smoother: AngleSmoother::new(config.window_size),
            hip_smoother,
            progress: RepProgress::new(config.goal_reps),
            config,
        })
    }

    /// Run one frame of tracked joints through the full pipeline.
    ///
    /// The caller is responsible for skipping frames with no detection;
    /// a skipped frame must leave every piece of session state untouched.
    pub fn process(&mut self, joints: &JointSet) -> FrameUpdate {
        let (smoothed, change) = match (&mut self.machine, self.config.kind) {
            (Machine::Cyclic(machine), ExerciseKind::Arm) => {
                let raw = joint_angle(joints.shoulder, joints.elbow, joints.wrist);
                let smoothed = self.smoother.push(raw);
                (smoothed, machine.update(smoothed))
            }
            (Machine::Cyclic(machine), _) => {
                let raw = joint_angle(joints.hip, joints.knee, joints.ankle);
                let smoothed = self.smoother.push(raw);
                (smoothed, machine.update(smoothed))
            }
            (Machine::Toggle(machine), _) => {
                // Hip and knee tracked independently, each with its own window
                let hip_raw = joint_angle(joints.shoulder, joints.hip, joints.knee);
                let knee_raw = joint_angle(joints.hip, joints.knee, joints.ankle);
                let hip_smoothed = self
                    .hip_smoother
                    .as_mut()
                    .map(|s| s.push(hip_raw))
                    .unwrap_or(hip_raw);
                let knee_smoothed = self.smoother.push(knee_raw);
                (knee_smoothed, machine.update(hip_smoothed, knee_smoothed))
            }
        };

        let event = match change {
            Some(change) if change.repetition => self.progress.tick(),
            _ => None,
        };

        FrameUpdate {
            phase: self.phase_name(),
            smoothed_angle: smoothed,
            transitioned: change.is_some(),
            event,
        }
    }

    pub fn phase_name(&self) -> &'static str {
        match &self.machine {
            Machine::Cyclic(machine) => machine.phase().name(),
            Machine::Toggle(machine) => machine.phase().name(),
        }
    }

    pub fn kind(&self) -> ExerciseKind {
        self.config.kind
    }

    pub fn rep_count(&self) -> u32 {
        self.progress.count()
    }

    pub fn goal_reps(&self) -> u32 {
        self.progress.goal()
    }

    pub fn progress_fraction(&self) -> f32 {
        self.progress.fraction()
    }

    pub fn is_goal_reached(&self) -> bool {
        self.progress.is_reached()
    }

    /// Smoothed primary angle without pushing a new sample
    pub fn smoothed_angle(&self) -> f32 {
        self.smoother.mean()
    }

    /// Return to the initial phase and clear count and windows
    pub fn reset(&mut self) {
        match &mut self.machine {
            Machine::Cyclic(machine) => machine.reset(),
            Machine::Toggle(machine) => machine.reset(),
        }
        self.smoother.reset();
        if let Some(hip) = self.hip_smoother.as_mut() {
            hip.reset();
        }
        self.progress.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::config::ExerciseKind;

    /// Straight left arm: shoulder, elbow, wrist collinear
    fn straight_arm() -> JointSet {
        JointSet {
            shoulder: (0.5, 0.2),
            elbow: (0.5, 0.4),
            wrist: (0.5, 0.6),
            ..Default::default()
        }
    }

    /// Tightly bent left arm: wrist folded back up toward the shoulder
    fn bent_arm() -> JointSet {
        JointSet {
            shoulder: (0.5, 0.2),
            elbow: (0.5, 0.4),
            wrist: (0.55, 0.25),
            ..Default::default()
        }
    }

    fn arm_session(window_size: usize) -> ExerciseSession {
        let mut config = SessionConfig::new(ExerciseKind::Arm);
        config.window_size = window_size;
        ExerciseSession::new(config).unwrap()
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = SessionConfig::new(ExerciseKind::Arm);
        config.flexion_threshold = 120.0;
        config.extension_threshold = 90.0;
        assert!(ExerciseSession::new(config).is_err());
    }

    #[test]
    fn test_arm_counts_reps_through_cycle() {
        // Window of 1 so the smoother tracks the raw angle directly
        let mut session = arm_session(1);
        assert_eq!(session.phase_name(), "neutral");

        // Bend: below 90 -> flexion, first rep
        let update = session.process(&bent_arm());
        assert_eq!(update.phase, "flexion");
        assert_eq!(session.rep_count(), 1);

        // Straighten: above 120 -> extension, second rep
        let update = session.process(&straight_arm());
        assert_eq!(update.phase, "extension");
        assert_eq!(session.rep_count(), 2);

        // Bend again: back to neutral, no tick
        let update = session.process(&bent_arm());
        assert_eq!(update.phase, "neutral");
        assert!(update.transitioned);
        assert!(update.event.is_none());
        assert_eq!(session.rep_count(), 2);
    }

    #[test]
    fn test_warmup_biases_smoothed_angle_low() {
        let mut session = arm_session(10);
        let update = session.process(&straight_arm());
        // Mean of one ~180 sample and nine -1 sentinels: ~17 degrees
        assert!(update.smoothed_angle < 30.0);
    }

    #[test]
    fn test_goal_reached_freezes_session_count() {
        let mut config = SessionConfig::new(ExerciseKind::Arm);
        config.window_size = 1;
        config.goal_reps = 2;
        let mut session = ExerciseSession::new(config).unwrap();

        session.process(&bent_arm());
        let update = session.process(&straight_arm());
        assert_eq!(update.event, Some(ProgressEvent::GoalReached));
        assert!(session.is_goal_reached());

        // Keep exercising: phase still tracks, count stays frozen
        session.process(&bent_arm());
        session.process(&straight_arm());
        assert_eq!(session.rep_count(), 2);
    }

    #[test]
    fn test_sit_stand_uses_independent_angles() {
        let mut config = SessionConfig::new(ExerciseKind::SitStand);
        config.window_size = 1;
        let mut session = ExerciseSession::new(config).unwrap();
        assert_eq!(session.phase_name(), "standing");

        // Seated: trunk upright, thigh tipped slightly up, shin vertical.
        // Hip angle (shoulder-hip-knee) and knee angle (hip-knee-ankle)
        // both land near 79 degrees, below the flexion threshold.
        let seated = JointSet {
            shoulder: (0.5, 0.2),
            hip: (0.5, 0.5),
            knee: (0.65, 0.47),
            ankle: (0.65, 0.7),
            ..Default::default()
        };
        let update = session.process(&seated);
        assert_eq!(update.phase, "sitting");
        assert_eq!(session.rep_count(), 1);

        // Standing: everything vertical, both angles near 180
        let standing = JointSet {
            shoulder: (0.5, 0.2),
            hip: (0.5, 0.5),
            knee: (0.5, 0.7),
            ankle: (0.5, 0.9),
            ..Default::default()
        };
        let update = session.process(&standing);
        assert_eq!(update.phase, "standing");
        assert_eq!(session.rep_count(), 2);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut session = arm_session(1);
        session.process(&bent_arm());
        session.process(&straight_arm());
        assert_eq!(session.rep_count(), 2);

        session.reset();
        assert_eq!(session.phase_name(), "neutral");
        assert_eq!(session.rep_count(), 0);
        assert!((session.smoothed_angle() - -1.0).abs() < 1e-6);
    }
}
