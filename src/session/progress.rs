//! Repetition progress tracking and reward events
//!
//! Counts repetition ticks toward a session goal. The last few reps get
//! a countdown, and hitting the goal fires a single launch event after
//! which the tracker freezes until the session resets.

/// Event emitted for each counted repetition
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressEvent {
    /// Normal rep, still far from the goal
    InProgress { count: u32 },
    /// Within the final countdown window (1..=3 reps remaining)
    Countdown { count: u32, remaining: u32 },
    /// Goal hit. Emitted exactly once per session.
    GoalReached,
}

impl ProgressEvent {
    pub fn name(&self) -> &'static str {
        match self {
            ProgressEvent::InProgress { .. } => "in-progress",
            ProgressEvent::Countdown { .. } => "countdown",
            ProgressEvent::GoalReached => "goal-reached",
        }
    }
}

/// Countdown kicks in when this many reps (or fewer) remain
const COUNTDOWN_WINDOW: u32 = 3;

/// Accumulates repetition ticks up to a fixed goal
pub struct RepProgress {
    goal: u32,
    count: u32,
    /// Latched once the goal is hit; further ticks are ignored
    reached: bool,
}

impl RepProgress {
    pub fn new(goal: u32) -> Self {
        Self {
            goal,
            count: 0,
            reached: false,
        }
    }

    /// Register one repetition. Returns the event to present, or None
    /// once the goal has already been reached (count stays frozen).
    pub fn tick(&mut self) -> Option<ProgressEvent> {
        if self.reached {
            return None;
        }

        self.count += 1;
        if self.count >= self.goal {
            self.reached = true;
            return Some(ProgressEvent::GoalReached);
        }

        let remaining = self.goal - self.count;
        if remaining <= COUNTDOWN_WINDOW {
            Some(ProgressEvent::Countdown {
                count: self.count,
                remaining,
            })
        } else {
            Some(ProgressEvent::InProgress { count: self.count })
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn goal(&self) -> u32 {
        self.goal
    }

    pub fn is_reached(&self) -> bool {
        self.reached
    }

    /// Fraction of the goal completed, for gradual reward visuals
    /// (the rocket climbs as reps accumulate)
    pub fn fraction(&self) -> f32 {
        (self.count as f32 / self.goal as f32).min(1.0)
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.reached = false;
    }
}
