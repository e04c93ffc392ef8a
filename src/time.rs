//! Frame clock feeding the per-frame callback.
//!
//! The animators only ever see `(elapsed, delta)` in seconds. [`FrameClock`]
//! produces that pair from wall time, with pause and time-scale support so a
//! paused scene yields zero-length steps and nothing moves.
//!
//! ```ignore
//! let mut clock = FrameClock::new();
//! loop {
//!     let (elapsed, delta) = clock.tick();
//!     scene.frame(elapsed, delta);
//! }
//! ```

use std::time::{Duration, Instant};

/// Wall-clock driven frame timing.
#[derive(Debug)]
pub struct FrameClock {
    last_tick: Instant,
    /// Scaled seconds accumulated while running.
    elapsed: f32,
    delta: f32,
    frames: u64,
    paused: bool,
    time_scale: f32,
    /// Longest step handed out, so a stalled window does not teleport particles.
    max_delta: f32,
    fps: f32,
    fps_frames: u64,
    fps_window_start: Instant,
}

impl FrameClock {
    const FPS_WINDOW: Duration = Duration::from_millis(500);

    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last_tick: now,
            elapsed: 0.0,
            delta: 0.0,
            frames: 0,
            paused: false,
            time_scale: 1.0,
            max_delta: 0.1,
            fps: 0.0,
            fps_frames: 0,
            fps_window_start: now,
        }
    }

    /// Advance to now and return `(elapsed, delta)` in seconds.
    pub fn tick(&mut self) -> (f32, f32) {
        let now = Instant::now();
        let raw = now.duration_since(self.last_tick).as_secs_f32();
        self.last_tick = now;
        self.step(raw)
    }

    /// Advance by an explicit wall-clock step. `raw_delta` must be non-negative.
    pub fn step(&mut self, raw_delta: f32) -> (f32, f32) {
        self.frames += 1;
        self.delta = if self.paused {
            0.0
        } else {
            raw_delta.min(self.max_delta) * self.time_scale
        };
        self.elapsed += self.delta;

        let now = Instant::now();
        let window = now.duration_since(self.fps_window_start);
        if window >= Self::FPS_WINDOW {
            self.fps = (self.frames - self.fps_frames) as f32 / window.as_secs_f32();
            self.fps_frames = self.frames;
            self.fps_window_start = now;
        }

        (self.elapsed, self.delta)
    }

    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    #[inline]
    pub fn delta(&self) -> f32 {
        self.delta
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frames
    }

    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    /// Set the time scale. Negative values clamp to 0.
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    #[inline]
    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
