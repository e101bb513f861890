//! Frame pacing for hosts
//!
//! The host feeds wall-clock time in; the clock says when a frame is due and
//! how long it was. The frame rate is clamped to a sane range.

use crate::consts::{MAX_FPS, MIN_FPS};

#[derive(Debug, Clone)]
pub struct FrameClock {
    target_fps: u32,
    since_last: f32,
}

impl FrameClock {
    pub fn new(target_fps: u32) -> Self {
        let mut clock = Self {
            target_fps: MAX_FPS,
            since_last: 0.0,
        };
        clock.set_target_fps(target_fps);
        clock
    }

    /// Clamp to [`MIN_FPS`, `MAX_FPS`]
    pub fn set_target_fps(&mut self, fps: u32) {
        self.target_fps = fps.clamp(MIN_FPS, MAX_FPS);
    }

    pub fn target_fps(&self) -> u32 {
        self.target_fps
    }

    /// Minimum seconds between frames
    pub fn frame_interval(&self) -> f32 {
        1.0 / self.target_fps as f32
    }

    /// Account `elapsed` seconds of wall time. Returns the frame's dt (all time
    /// since the previous frame) once at least one interval has passed.
    pub fn advance(&mut self, elapsed: f32) -> Option<f32> {
        self.since_last += elapsed;
        if self.since_last >= self.frame_interval() {
            Some(std::mem::take(&mut self.since_last))
        } else {
            None
        }
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(crate::consts::TARGET_FPS)
    }
}
