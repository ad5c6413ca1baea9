//! Session control and per-frame output surface for JavaScript
//!
//! Owns the live `ExerciseSession` and exposes everything the JS side
//! renders or narrates: current phase, smoothed angle, rep count, and
//! the latest progress event. The core never draws or speaks itself.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use super::landmarks::current_joints;
use crate::motion::CountingMode;
use crate::session::{ExerciseKind, ExerciseSession, ProgressEvent, SessionConfig};

/// Live session plus the last reward event, for JS polling
#[derive(Default)]
struct SessionState {
    session: Option<ExerciseSession>,
    last_event: Option<ProgressEvent>,
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static SESSION: RefCell<SessionState> = RefCell::new(SessionState::default());
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Start a session for the given exercise ("arm", "leg", "sit-stand").
///
/// Thresholds are degrees; `count_per_cycle` switches the flex/extend
/// machines from the legacy two-ticks-per-cycle counting to one tick
/// per completed cycle. Invalid configuration rejects the call and
/// leaves any previous session untouched.
#[wasm_bindgen]
pub fn start_session(
    exercise: &str,
    flexion_threshold: f32,
    extension_threshold: f32,
    goal_reps: u32,
    window_size: usize,
    count_per_cycle: bool,
) -> Result<(), JsValue> {
    let kind = ExerciseKind::from_name(exercise)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown exercise '{}'", exercise)))?;

    let mut config = SessionConfig::new(kind);
    config.flexion_threshold = flexion_threshold;
    config.extension_threshold = extension_threshold;
    config.goal_reps = goal_reps;
    config.window_size = window_size;
    config.counting = if count_per_cycle {
        CountingMode::PerCycle
    } else {
        CountingMode::PerTransition
    };

    let session = ExerciseSession::new(config)?;
    SESSION.with(|state_cell| {
        let mut state = state_cell.borrow_mut();
        state.session = Some(session);
        state.last_event = None;
    });
    Ok(())
}

/// Start a session with default thresholds (90/120), goal 10, window 10
#[wasm_bindgen]
pub fn start_default_session(exercise: &str) -> Result<(), JsValue> {
    start_session(exercise, 90.0, 120.0, 10, 10, false)
}

/// Drop the live session (webcam closed / exercise switched)
#[wasm_bindgen]
pub fn end_session() {
    SESSION.with(|state_cell| {
        let mut state = state_cell.borrow_mut();
        state.session = None;
        state.last_event = None;
    });
}

#[wasm_bindgen]
pub fn has_session() -> bool {
    SESSION.with(|state_cell| state_cell.borrow().session.is_some())
}

/// Run the pipeline once against the current landmark frame.
///
/// Returns false when there is no session or no detection this frame;
/// a skipped frame mutates nothing.
#[wasm_bindgen]
pub fn process_frame() -> bool {
    let Some(joints) = current_joints() else {
        return false;
    };

    SESSION.with(|state_cell| {
        let mut state = state_cell.borrow_mut();
        let Some(session) = state.session.as_mut() else {
            return false;
        };

        let update = session.process(&joints);
        if update.event.is_some() {
            state.last_event = update.event;
        }
        true
    })
}

// ============================================================================
// OUTPUT GETTERS (polled by JS each frame)
// ============================================================================

/// Current phase name ("neutral", "flexion", ..., or "" with no session)
#[wasm_bindgen]
pub fn current_phase() -> String {
    with_session(|s| s.phase_name().to_string()).unwrap_or_default()
}

/// Smoothed primary angle in degrees (elbow or knee)
#[wasm_bindgen]
pub fn smoothed_angle() -> f32 {
    with_session(|s| s.smoothed_angle()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn rep_count() -> u32 {
    with_session(|s| s.rep_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn goal_reps() -> u32 {
    with_session(|s| s.goal_reps()).unwrap_or(0)
}

/// Fraction of the goal completed in [0,1], drives the rocket's climb
#[wasm_bindgen]
pub fn progress_fraction() -> f32 {
    with_session(|s| s.progress_fraction()).unwrap_or(0.0)
}

#[wasm_bindgen]
pub fn is_goal_reached() -> bool {
    with_session(|s| s.is_goal_reached()).unwrap_or(false)
}

/// Reps remaining if the last event was a countdown, -1 otherwise
#[wasm_bindgen]
pub fn countdown_remaining() -> i32 {
    SESSION.with(|state_cell| match state_cell.borrow().last_event {
        Some(ProgressEvent::Countdown { remaining, .. }) => remaining as i32,
        _ => -1,
    })
}

/// Name of the most recent progress event ("in-progress", "countdown",
/// "goal-reached", or "" before the first rep)
#[wasm_bindgen]
pub fn last_event_name() -> String {
    SESSION.with(|state_cell| {
        state_cell
            .borrow()
            .last_event
            .map(|e| e.name().to_string())
            .unwrap_or_default()
    })
}

/// Reset the live session to its initial state, keeping configuration
#[wasm_bindgen]
pub fn reset_session() {
    SESSION.with(|state_cell| {
        let mut state = state_cell.borrow_mut();
        if let Some(session) = state.session.as_mut() {
            session.reset();
        }
        state.last_event = None;
    });
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

fn with_session<T>(f: impl FnOnce(&ExerciseSession) -> T) -> Option<T> {
    SESSION.with(|state_cell| state_cell.borrow().session.as_ref().map(f))
}
