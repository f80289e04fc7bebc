//! Frame pacing
//!
//! Caps the frame rate against a monotonic millisecond clock supplied by the
//! front end (`performance.now()` in the browser, `Instant` natively).

/// Frames may start this much early to absorb vsync jitter
const SLACK_MS: f64 = 1.0;

/// Longest frame delta reported, so a stalled window does not produce a burst
const MAX_DELTA_MS: f64 = 250.0;

#[derive(Debug, Clone, Default)]
pub struct FramePacer {
    last_frame_ms: Option<f64>,
}

impl FramePacer {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn interval_ms(fps: u32) -> f64 {
        1000.0 / fps.max(1) as f64
    }

    /// Clock time at which the next frame is due
    pub fn deadline_ms(&self, fps: u32) -> f64 {
        match self.last_frame_ms {
            Some(last) => last + Self::interval_ms(fps),
            None => 0.0,
        }
    }

    /// Whether a frame is due at `now_ms`
    pub fn is_due(&self, now_ms: f64, fps: u32) -> bool {
        now_ms + SLACK_MS >= self.deadline_ms(fps)
    }

    /// Start a frame if one is due at `now_ms`
    ///
    /// Returns the elapsed milliseconds since the previous frame, or `None`
    /// if it is too early. The first call always starts a frame with one
    /// full interval of elapsed time.
    pub fn poll(&mut self, now_ms: f64, fps: u32) -> Option<f32> {
        let interval = Self::interval_ms(fps);
        let elapsed = match self.last_frame_ms {
            Some(last) => now_ms - last,
            None => interval,
        };
        if elapsed + SLACK_MS < interval {
            return None;
        }
        self.last_frame_ms = Some(now_ms);
        Some(elapsed.clamp(0.0, MAX_DELTA_MS) as f32)
    }
}
