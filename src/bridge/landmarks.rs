//! Landmark storage and JS bridge
//!
//! Receives MediaPipe Pose landmarks from JavaScript once per frame and
//! stores them for the exercise pipeline to read. A frame with no
//! detection is signalled with `clear_landmarks` and simply skipped.

use std::cell::RefCell;
use wasm_bindgen::prelude::*;

use crate::session::JointSet;

// ============================================================================
// LANDMARK INDICES (MediaPipe Pose - 33 total)
// ============================================================================

pub const LEFT_SHOULDER: usize = 11;
pub const LEFT_ELBOW: usize = 13;
pub const LEFT_WRIST: usize = 15;
pub const LEFT_HIP: usize = 23;
pub const LEFT_KNEE: usize = 25;
pub const LEFT_ANKLE: usize = 27;

/// Skeleton connections for the tracked left side (pairs of indices),
/// served to the JS overlay through `tracked_skeleton` so it draws the
/// same limbs the core classifies
pub const TRACKED_SKELETON: [(usize, usize); 5] = [
    (LEFT_SHOULDER, LEFT_ELBOW),
    (LEFT_ELBOW, LEFT_WRIST),
    (LEFT_SHOULDER, LEFT_HIP),
    (LEFT_HIP, LEFT_KNEE),
    (LEFT_KNEE, LEFT_ANKLE),
];

// ============================================================================
// LANDMARK DATA STRUCTURE
// ============================================================================

/// A single 3D landmark point (normalized coordinates)
#[derive(Clone, Copy, Default)]
pub struct Landmark {
    pub x: f32, // 0-1 normalized
    pub y: f32, // 0-1 normalized
    pub z: f32, // Relative depth (unused by the classifier)
}

/// Internal storage for current frame's landmarks
struct LandmarkStore {
    landmarks: [Landmark; 33],
    has_data: bool,
}

impl Default for LandmarkStore {
    fn default() -> Self {
        Self {
            landmarks: [Landmark::default(); 33],
            has_data: false,
        }
    }
}

// Thread-local storage (WASM is single-threaded)
thread_local! {
    static LANDMARKS: RefCell<LandmarkStore> = RefCell::new(LandmarkStore::default());
}

// ============================================================================
// WASM-BINDGEN ENTRY POINTS
// ============================================================================

/// Called from JavaScript with flat Float32Array of 99 values
/// (33 landmarks × 3 coordinates: x, y, z)
#[wasm_bindgen]
pub fn update_landmarks(data: &[f32]) {
    if data.len() != 99 {
        web_sys::console::warn_1(
            &format!("Invalid landmark data length: {} (expected 99)", data.len()).into(),
        );
        return;
    }

    LANDMARKS.with(|store_cell| {
        let mut store = store_cell.borrow_mut();

        for i in 0..33 {
            store.landmarks[i] = Landmark {
                x: data[i * 3],
                y: data[i * 3 + 1],
                z: data[i * 3 + 2],
            };
        }
        store.has_data = true;
    });
}

/// Called from JavaScript when pose detection found nothing this frame.
/// The next `process_frame` becomes a no-op, leaving all state untouched.
#[wasm_bindgen]
pub fn clear_landmarks() {
    LANDMARKS.with(|store_cell| {
        store_cell.borrow_mut().has_data = false;
    });
}

/// Skeleton connections as a flat index array for the JS overlay
/// ([11,13, 13,15, ...]: consecutive pairs of MediaPipe indices)
#[wasm_bindgen]
pub fn tracked_skeleton() -> Vec<u32> {
    TRACKED_SKELETON
        .iter()
        .flat_map(|&(a, b)| [a as u32, b as u32])
        .collect()
}

// ============================================================================
// INTERNAL API (no wasm_bindgen)
// ============================================================================

/// The tracked left-side joints for the current frame, or None on a
/// detection miss
pub fn current_joints() -> Option<JointSet> {
    LANDMARKS.with(|store_cell| {
        let store = store_cell.borrow();
        if !store.has_data {
            return None;
        }

        let point = |index: usize| {
            let lm = store.landmarks[index];
            (lm.x, lm.y)
        };
        Some(JointSet {
            shoulder: point(LEFT_SHOULDER),
            elbow: point(LEFT_ELBOW),
            wrist: point(LEFT_WRIST),
            hip: point(LEFT_HIP),
            knee: point(LEFT_KNEE),
            ankle: point(LEFT_ANKLE),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(index: usize, x: f32, y: f32) -> Vec<f32> {
        let mut data = vec![0.0; 99];
        data[index * 3] = x;
        data[index * 3 + 1] = y;
        data
    }

    #[test]
    fn test_update_then_read_joints() {
        let mut data = frame_with(LEFT_ELBOW, 0.4, 0.5);
        data[LEFT_WRIST * 3] = 0.3;
        update_landmarks(&data);

        let joints = current_joints().unwrap();
        assert_eq!(joints.elbow, (0.4, 0.5));
        assert_eq!(joints.wrist, (0.3, 0.0));

        clear_landmarks();
        assert!(current_joints().is_none());
    }

    #[test]
    fn test_tracked_skeleton_flattens_joint_pairs() {
        let flat = tracked_skeleton();
        assert_eq!(flat.len(), TRACKED_SKELETON.len() * 2);
        assert_eq!(&flat[..2], &[LEFT_SHOULDER as u32, LEFT_ELBOW as u32]);
        assert_eq!(&flat[8..], &[LEFT_KNEE as u32, LEFT_ANKLE as u32]);
    }
}
