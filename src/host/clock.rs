//! Frame timing for the animation loop

use std::time::{Duration, Instant};

/// Timing handed to each animation step
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started
    pub elapsed: f32,
    /// Seconds since the previous frame, capped at [`FrameClock::MAX_DELTA`]
    pub delta: f32,
    /// Frames ticked before this one
    pub frame: u64,
}

/// Measures frame-to-frame time
#[derive(Clone, Debug)]
pub struct FrameClock {
    start: Instant,
    last: Option<Instant>,
    frame: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Longest delta reported, so a stalled window does not make animations jump
    pub const MAX_DELTA: Duration = Duration::from_millis(250);

    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { start, last: None, frame: 0 }
    }

    /// Restart timing from now
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advance to `now`; the first tick reports a zero delta
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let delta = self
            .last
            .map(|last| now.saturating_duration_since(last).min(Self::MAX_DELTA))
            .unwrap_or_default();
        self.last = Some(now);

        let time = FrameTime {
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            delta: delta.as_secs_f32(),
            frame: self.frame,
        };
        self.frame += 1;
        time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame
    }
}
