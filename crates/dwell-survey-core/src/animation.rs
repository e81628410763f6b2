//! Tweening for growing targets

use std::time::Duration;

/// A linear tween with an optional start delay
#[derive(Debug, Clone)]
pub struct Tween {
    /// Start value
    pub start: f32,
    /// End value
    pub end: f32,
    /// Time before the value starts moving
    pub delay: Duration,
    /// Duration
    pub duration: Duration,
    /// Time since the tween was created
    elapsed: Duration,
}

impl Tween {
    /// Create a new tween
    pub fn new(start: f32, end: f32, duration: Duration) -> Self {
        Self {
            start,
            end,
            delay: Duration::ZERO,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    /// A tween that is already at its end value
    pub fn settled(value: f32) -> Self {
        Self::new(value, value, Duration::ZERO)
    }

    /// Hold the start value for `delay` before moving
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Update the tween
    pub fn update(&mut self, dt: Duration) {
        if !self.is_complete() {
            self.elapsed += dt;
        }
    }

    /// Progress (0-1) excluding the delay
    pub fn progress(&self) -> f32 {
        let moving = self.elapsed.saturating_sub(self.delay);
        if self.duration.is_zero() {
            return if self.elapsed >= self.delay { 1.0 } else { 0.0 };
        }
        (moving.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// Get current value
    pub fn value(&self) -> f32 {
        self.start + (self.end - self.start) * self.progress()
    }

    pub fn is_complete(&self) -> bool {
        self.elapsed >= self.delay + self.duration
    }
}
