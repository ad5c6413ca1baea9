//! Threshold-driven exercise phase classification
//!
//! Two fixed topologies: a three-state cycle for flex/extend exercises
//! (arm, leg) and a two-state toggle for sit-stand. Each machine consumes
//! smoothed angles and reports phase changes plus repetition ticks; it
//! never talks to rendering or audio, the caller forwards events.

/// Phase of a flex/extend exercise
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CyclicPhase {
    Neutral,
    Flexion,
    Extension,
}

impl CyclicPhase {
    pub fn name(&self) -> &'static str {
        match self {
            CyclicPhase::Neutral => "neutral",
            CyclicPhase::Flexion => "flexion",
            CyclicPhase::Extension => "extension",
        }
    }
}

/// Phase of a sit-stand exercise
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TogglePhase {
    Sitting,
    Standing,
}

impl TogglePhase {
    pub fn name(&self) -> &'static str {
        match self {
            TogglePhase::Sitting => "sitting",
            TogglePhase::Standing => "standing",
        }
    }
}

/// How the three-state cycle maps transitions to repetition ticks.
///
/// The legacy behavior ticks on both Neutral→Flexion and Flexion→Extension,
/// so one physical repetition counts twice. `PerCycle` instead ticks once
/// when the cycle closes (Extension→Neutral).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CountingMode {
    #[default]
    PerTransition,
    PerCycle,
}

/// Result of feeding one smoothed sample into a machine
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseChange {
    /// Phase entered by this transition
    pub entered: &'static str,
    /// Whether this transition counts as a repetition tick
    pub repetition: bool,
}

/// Reject NaN and sensor glitches outside the valid angle range.
/// A bad sample self-loops the machine instead of crashing it.
fn valid_angle(angle: f32) -> bool {
    (0.0..=180.0).contains(&angle)
}

/// Three-state cyclic machine: Neutral → Flexion → Extension → Neutral
pub struct CyclicMachine {
    /// Below this angle the limb counts as flexed
    flexion_threshold: f32,
    /// Above this angle the limb counts as extended
    extension_threshold: f32,
    counting: CountingMode,
    phase: CyclicPhase,
}

impl CyclicMachine {
    pub fn new(flexion_threshold: f32, extension_threshold: f32, counting: CountingMode) -> Self {
        Self {
            flexion_threshold,
            extension_threshold,
            counting,
            phase: CyclicPhase::Neutral,
        }
    }

    pub fn phase(&self) -> CyclicPhase {
        self.phase
    }

    /// Feed one smoothed angle. Only the condition for the current phase
    /// is evaluated; no match means the machine stays put with no event.
    pub fn update(&mut self, angle: f32) -> Option<PhaseChange> {
        if !valid_angle(angle) {
            return None;
        }

        let (next, ticks) = match self.phase {
            CyclicPhase::Neutral if angle < self.flexion_threshold => {
                (CyclicPhase::Flexion, self.counting == CountingMode::PerTransition)
            }
            CyclicPhase::Flexion if angle > self.extension_threshold => {
                (CyclicPhase::Extension, self.counting == CountingMode::PerTransition)
            }
            CyclicPhase::Extension if angle < self.flexion_threshold => {
                (CyclicPhase::Neutral, self.counting == CountingMode::PerCycle)
            }
            _ => return None,
        };

        self.phase = next;
        Some(PhaseChange {
            entered: next.name(),
            repetition: ticks,
        })
    }

    pub fn reset(&mut self) {
        self.phase = CyclicPhase::Neutral;
    }
}

/// Two-state toggle machine: Sitting ↔ Standing, driven by hip and knee
/// angles together. Both joints must cross a threshold to transition.
pub struct ToggleMachine {
    flexion_threshold: f32,
    extension_threshold: f32,
    phase: TogglePhase,
}

impl ToggleMachine {
    pub fn new(flexion_threshold: f32, extension_threshold: f32) -> Self {
        Self {
            flexion_threshold,
            extension_threshold,
            phase: TogglePhase::Standing,
        }
    }

    pub fn phase(&self) -> TogglePhase {
        self.phase
    }

    /// Feed one smoothed hip/knee angle pair. A single qualifying joint
    /// is not enough; partial crossings self-loop.
    pub fn update(&mut self, hip_angle: f32, knee_angle: f32) -> Option<PhaseChange> {
        if !valid_angle(hip_angle) || !valid_angle(knee_angle) {
            return None;
        }

        let next = match self.phase {
            TogglePhase::Sitting
                if hip_angle > self.extension_threshold
                    && knee_angle > self.extension_threshold =>
            {
                TogglePhase::Standing
            }
            TogglePhase::Standing
                if hip_angle < self.flexion_threshold && knee_angle < self.flexion_threshold =>
            {
                TogglePhase::Sitting
            }
            _ => return None,
        };

        self.phase = next;
        Some(PhaseChange {
            entered: next.name(),
            repetition: true,
        })
    }

    pub fn reset(&mut self) {
        self.phase = TogglePhase::Standing;
    }
}
