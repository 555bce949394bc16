/// Self-contained timers - each accumulates delta time and decides when to fire
use std::thread;
use std::time::{Duration, Instant};

/// Yields fixed timesteps for a rate-driven budget, at most `max_steps` per tick.
/// Time beyond the cap is dropped; at most one timestep carries into the next tick.
#[derive(Debug, Clone)]
pub struct Accumulator {
    timestep: f32,
    accumulator: f32,
    max_steps: u8,
}

impl Accumulator {
    /// Create accumulator with fixed timestep
    pub fn new(hz: f32, max_steps: u8) -> Self {
        Self {
            timestep: 1.0 / hz,
            accumulator: 0.0,
            max_steps,
        }
    }

    /// Update with delta, returns iterator of fixed timesteps to execute
    pub fn tick(&mut self, delta: f32) -> impl Iterator<Item = f32> {
        self.accumulator += delta;

        let steps = (self.accumulator / self.timestep)
            .min(self.max_steps as f32) as usize;

        self.accumulator = (self.accumulator - steps as f32 * self.timestep).min(self.timestep);

        std::iter::repeat(self.timestep).take(steps)
    }

    /// Drop any carried time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

/// Frame-rate meter that reports once per interval
#[derive(Debug, Clone, Copy)]
pub struct FpsMeter {
    interval: f32,
    elapsed: f32,
    frames: u32,
}

impl FpsMeter {
    pub fn new(interval: f32) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            frames: 0,
        }
    }

    /// Count one frame; returns the average FPS when the interval closes
    pub fn tick(&mut self, delta: f32) -> Option<f32> {
        self.elapsed += delta;
        self.frames += 1;

        if self.elapsed >= self.interval {
            let fps = self.frames as f32 / self.elapsed;
            self.elapsed = 0.0;
            self.frames = 0;
            Some(fps)
        } else {
            None
        }
    }
}

/// Optional upper bound on frame rate
#[derive(Debug, Clone, Copy)]
pub struct FrameCap {
    min_interval: Duration,
}

impl FrameCap {
    /// None when `max_fps` does not give a representable frame interval
    pub fn new(max_fps: f32) -> Option<Self> {
        Duration::try_from_secs_f32(1.0 / max_fps)
            .ok()
            .map(|min_interval| Self { min_interval })
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Time left to sleep for a frame that started at `frame_start`
    pub fn remaining(&self, frame_start: Instant, now: Instant) -> Duration {
        self.min_interval
            .saturating_sub(now.saturating_duration_since(frame_start))
    }

    /// Sleep out the rest of the frame budget
    pub fn wait(&self, frame_start: Instant) {
        let remaining = self.remaining(frame_start, Instant::now());
        if !remaining.is_zero() {
            thread::sleep(remaining);
        }
    }
}
