use std::time::Instant;

/// Frame metadata - frame number and timing info
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    pub number: u64,
    pub time: f32,
    pub delta: f32,
}

/// Frame clock - numbers frames and tracks delta time between them
#[derive(Debug)]
pub struct Clock {
    frame_number: u64,
    start: Instant,
    last_tick: Instant,
}

impl Clock {
    /// Create new clock starting now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            frame_number: 0,
            start: now,
            last_tick: now,
        }
    }

    /// Close the current frame and return its info.
    /// Delta is in seconds since the previous tick.
    pub fn tick(&mut self) -> FrameInfo {
        let now = Instant::now();
        let info = FrameInfo {
            number: self.frame_number,
            time: now.duration_since(self.start).as_secs_f32(),
            delta: now.duration_since(self.last_tick).as_secs_f32(),
        };
        self.frame_number += 1;
        self.last_tick = now;
        info
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_number
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
