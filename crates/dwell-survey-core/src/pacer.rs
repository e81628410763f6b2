//! Adaptive frame pacing
//!
//! The pacer schedules update ticks at a target rate and sleeps just enough
//! between them. It keeps a smoothed measurement of the achieved frame time
//! and, when the machine cannot keep up, lowers the target rate towards what
//! is actually achieved. The target is never raised again within a session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use dwell_survey_config::PacerConfig;
use tracing::{debug, info};

/// Pacer tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacerSettings {
    /// Starting and highest target rate (ticks per second)
    pub max_fps: f64,
    /// Lowest target rate
    pub min_fps: f64,
    /// Iterations between rate checks
    pub adjust_every: u32,
    /// Lower the target once achieved < target * ratio
    pub slowdown_ratio: f64,
    /// Weight kept by the smoothed frame time per sample
    pub smoothing: f64,
    /// Waits shorter than this are not slept
    pub timer_resolution: Duration,
}

impl Default for PacerSettings {
    fn default() -> Self {
        Self {
            max_fps: 70.0,
            min_fps: 15.0,
            adjust_every: 100,
            slowdown_ratio: 0.92,
            smoothing: 0.95,
            timer_resolution: Duration::from_millis(2),
        }
    }
}

impl From<&PacerConfig> for PacerSettings {
    fn from(config: &PacerConfig) -> Self {
        Self {
            max_fps: config.max_fps,
            min_fps: config.min_fps,
            adjust_every: config.adjust_every.max(1),
            slowdown_ratio: config.slowdown_ratio,
            smoothing: config.smoothing,
            timer_resolution: Duration::from_millis(config.timer_resolution_ms),
        }
    }
}

/// What the loop should do before dispatching this iteration's tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PacerStep {
    /// Sleep this long first, if ahead of schedule
    pub sleep: Option<Duration>,
    /// Target rate after this iteration
    pub target_fps: f64,
    /// Whether the target was lowered on this iteration
    pub adjusted: bool,
}

/// Adaptive tick scheduler
#[derive(Debug, Clone)]
pub struct FramePacer {
    settings: PacerSettings,
    target_fps: f64,
    frame_time_ms: f64,
    frame_count: u64,
    last_frame: Option<Instant>,
    next_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(mut settings: PacerSettings) -> Self {
        settings.adjust_every = settings.adjust_every.max(1);
        Self {
            settings,
            target_fps: settings.max_fps,
            frame_time_ms: 1000.0 / settings.max_fps,
            frame_count: 0,
            last_frame: None,
            next_frame: None,
        }
    }

    /// Account for an iteration starting at `now` and decide how long to
    /// wait before the tick.
    pub fn begin_iteration(&mut self, now: Instant) -> PacerStep {
        let last = self.last_frame.unwrap_or(now);
        let elapsed_ms = now.saturating_duration_since(last).as_secs_f64() * 1000.0;
        self.frame_time_ms = self.frame_time_ms * self.settings.smoothing
            + elapsed_ms * (1.0 - self.settings.smoothing);
        self.last_frame = Some(now);

        self.frame_count += 1;
        let adjusted = self.frame_count % u64::from(self.settings.adjust_every) == 0
            && self.maybe_slow_down();

        let next = self.next_frame.unwrap_or(now);
        let (scheduled, sleep) = if now > next {
            (now, None)
        } else {
            let wait = next - now;
            let sleep = (wait >= self.settings.timer_resolution).then(|| round_to_millis(wait));
            (next, sleep)
        };
        self.next_frame = Some(scheduled + self.interval());

        PacerStep {
            sleep,
            target_fps: self.target_fps,
            adjusted,
        }
    }

    /// Drive `on_tick` at the paced rate on the calling thread until
    /// `running` is cleared.
    pub fn run<F>(&mut self, running: &AtomicBool, mut on_tick: F)
    where
        F: FnMut(Instant),
    {
        info!(
            max_fps = self.settings.max_fps,
            min_fps = self.settings.min_fps,
            "Frame pacer started"
        );

        while running.load(Ordering::Acquire) {
            let step = self.begin_iteration(Instant::now());
            if let Some(sleep) = step.sleep {
                std::thread::sleep(sleep);
            }
            on_tick(Instant::now());
        }

        info!(
            target_fps = self.target_fps,
            achieved_fps = self.achieved_rate(),
            frames = self.frame_count,
            "Frame pacer stopped"
        );
    }

    /// Current target rate
    pub fn target_rate(&self) -> f64 {
        self.target_fps
    }

    /// Smoothed achieved rate
    pub fn achieved_rate(&self) -> f64 {
        if self.frame_time_ms <= 0.0 {
            return self.settings.max_fps;
        }
        1000.0 / self.frame_time_ms
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Time between scheduled ticks at the current target
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.target_fps)
    }

    fn maybe_slow_down(&mut self) -> bool {
        let achieved = self.achieved_rate();
        if achieved >= self.target_fps * self.settings.slowdown_ratio {
            return false;
        }

        let lowered = ((self.target_fps + achieved) / 2.0)
            .max(self.settings.min_fps)
            .min(self.target_fps);
        if lowered >= self.target_fps {
            return false;
        }

        debug!(
            from = self.target_fps,
            to = lowered,
            achieved,
            "Lowering target frame rate"
        );
        self.target_fps = lowered;
        true
    }
}

fn round_to_millis(d: Duration) -> Duration {
    Duration::from_millis((d.as_secs_f64() * 1000.0 + 0.5) as u64)
}
