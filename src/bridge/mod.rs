//! Bridge module - JS ↔ Rust communication
//!
//! All #[wasm_bindgen] entry points live here.
//! Re-exports only in mod.rs, logic in submodules.

mod landmarks;
mod session;

pub use landmarks::{
    // WASM entry points
    update_landmarks,
    clear_landmarks,
    tracked_skeleton,
    // Internal API
    current_joints,
    Landmark,
    // Constants
    LEFT_SHOULDER, LEFT_ELBOW, LEFT_WRIST,
    LEFT_HIP, LEFT_KNEE, LEFT_ANKLE,
    TRACKED_SKELETON,
};

pub use session::{
    start_session,
    start_default_session,
    end_session,
    reset_session,
    has_session,
    process_frame,
    current_phase,
    smoothed_angle,
    rep_count,
    goal_reps,
    progress_fraction,
    is_goal_reached,
    countdown_remaining,
    last_event_name,
};
