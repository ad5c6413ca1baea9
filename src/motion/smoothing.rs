//! Moving-average smoothing for per-frame joint angles
//!
//! Pose detection jitters frame to frame; a fixed window of the last N
//! angles is averaged before any threshold comparison happens.

/// Default number of samples in the smoothing window
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Sentinel the window is pre-filled with before real samples arrive.
/// Early averages are pulled low until N real samples have been pushed.
const WARMUP_SENTINEL: f32 = -1.0;

/// Fixed-size FIFO window over recent angle samples
pub struct AngleSmoother {
    /// Circular buffer of the last N samples (oldest overwritten)
    window: Vec<f32>,

    /// Next slot to overwrite
    write_index: usize,
}

impl AngleSmoother {
    /// Create a smoother with the given window size. Session
    /// configuration validates the size before construction; a zero
    /// window has no meaningful mean.
    pub fn new(window_size: usize) -> Self {
        debug_assert!(window_size > 0, "smoothing window size must be > 0");
        Self {
            window: vec![WARMUP_SENTINEL; window_size],
            write_index: 0,
        }
    }

    /// Push a new sample, evicting the oldest, and return the updated
    /// mean of the whole window (sentinel slots included until full)
    pub fn push(&mut self, sample: f32) -> f32 {
        self.window[self.write_index] = sample;
        self.write_index = (self.write_index + 1) % self.window.len();
        self.mean()
    }

    /// Current mean of all window slots
    pub fn mean(&self) -> f32 {
        let sum: f32 = self.window.iter().sum();
        sum / self.window.len() as f32
    }

    /// Window capacity
    pub fn window_size(&self) -> usize {
        self.window.len()
    }

    /// Refill the window with the warm-up sentinel
    pub fn reset(&mut self) {
        self.window.fill(WARMUP_SENTINEL);
        self.write_index = 0;
    }
}

impl Default for AngleSmoother {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converges_to_constant_input() {
        let mut smoother = AngleSmoother::new(10);
        let mut out = 0.0;
        for _ in 0..10 {
            out = smoother.push(90.0);
        }
        assert!((out - 90.0).abs() < 1e-4);
    }

    #[test]
    fn test_warmup_biases_low() {
        let mut smoother = AngleSmoother::new(10);
        // One real sample among nine sentinels
        let out = smoother.push(180.0);
        let expected = (180.0 + 9.0 * -1.0) / 10.0;
        assert!((out - expected).abs() < 1e-4);
        assert!(out < 180.0);
    }

    #[test]
    fn test_output_bounded_by_window_contents() {
        let mut smoother = AngleSmoother::new(5);
        // Warm past the sentinels first
        for i in 0..5 {
            smoother.push(10.0 * (i + 1) as f32);
        }
        for i in 5..20 {
            let out = smoother.push(10.0 * (i + 1) as f32);
            let lo = 10.0 * (i - 3) as f32;
            let hi = 10.0 * (i + 1) as f32;
            assert!(out >= lo && out <= hi);
        }
    }

    #[test]
    #[should_panic(expected = "smoothing window size must be > 0")]
    fn test_zero_window_size_asserts() {
        AngleSmoother::new(0);
    }

    #[test]
    fn test_reset_restores_warmup_state() {
        let mut smoother = AngleSmoother::new(4);
        for _ in 0..4 {
            smoother.push(120.0);
        }
        smoother.reset();
        assert!((smoother.mean() - -1.0).abs() < 1e-6);
    }
}
