use log::{info, trace};
use std::time::Instant;

/// Monotonic elapsed time source for the frame loop
pub struct FrameClock {
    start: Instant,
    pub frame_count: usize,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    #[must_use]
    pub fn new() -> Self {
        info!("Frame clock started");
        Self {
            start: Instant::now(),
            frame_count: 0,
        }
    }

    /// Call once per frame. Returns seconds since the clock was created.
    pub fn tick(&mut self) -> f32 {
        self.frame_count += 1;
        let elapsed = self.start.elapsed().as_secs_f32();
        trace!("tick frame_count={} elapsed={}", self.frame_count, elapsed);
        elapsed
    }
}
