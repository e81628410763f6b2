//! Dwell countdown

use std::time::Duration;

use super::{CountdownEvent, DwellSettings};

/// Observable timer state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
    /// Completed and not yet acknowledged
    Finished,
}

/// Countdown of `duration` steps, Idle → Running → Finished → Idle.
///
/// Completion is signalled once per run; the consumer must acknowledge it
/// with [`clear`](Self::clear) or [`take_finished`](Self::take_finished)
/// before the timer can be started again.
#[derive(Debug, Clone)]
pub struct DwellTimer {
    duration: u32,
    step: Duration,
    remaining: u32,
    accumulated: Duration,
    running: bool,
    finished: bool,
    stop_clears_finished: bool,
    events: Vec<CountdownEvent>,
}

impl DwellTimer {
    pub fn new(duration: u32, step: Duration) -> Self {
        Self {
            duration,
            step,
            remaining: duration,
            accumulated: Duration::ZERO,
            running: false,
            finished: false,
            stop_clears_finished: true,
            events: Vec::new(),
        }
    }

    pub fn from_settings(settings: &DwellSettings) -> Self {
        Self::new(settings.countdown_steps, settings.step)
            .with_stop_clears_finished(settings.stop_clears_finished)
    }

    /// Whether [`stop`](Self::stop) also drops an unacknowledged completion
    pub fn with_stop_clears_finished(mut self, clears: bool) -> Self {
        self.stop_clears_finished = clears;
        self
    }

    /// Begin a run. No-op while running or awaiting acknowledgement.
    pub fn start(&mut self) {
        if self.running || self.finished {
            return;
        }

        self.running = true;
        self.remaining = self.duration;
        self.accumulated = Duration::ZERO;
        self.events.push(CountdownEvent::Started(self.duration));
    }

    /// Abandon the current run
    pub fn stop(&mut self) {
        if self.stop_clears_finished {
            self.finished = false;
        }
        if !self.running {
            return;
        }

        self.running = false;
        self.remaining = self.duration;
        self.accumulated = Duration::ZERO;
    }

    /// Count down one step. Returns the event it produced, if running.
    pub fn tick(&mut self) -> Option<CountdownEvent> {
        if !self.running {
            return None;
        }

        self.remaining = self.remaining.saturating_sub(1);
        let event = if self.remaining == 0 {
            self.running = false;
            self.finished = true;
            CountdownEvent::Finished
        } else {
            CountdownEvent::Remaining(self.remaining)
        };

        self.events.push(event);
        Some(event)
    }

    /// Feed elapsed update time, ticking once per whole step
    pub fn advance(&mut self, dt: Duration) {
        if !self.running {
            return;
        }

        self.accumulated += dt;
        while self.running && self.accumulated >= self.step {
            self.accumulated -= self.step;
            self.tick();
        }
    }

    /// Acknowledge a completion: Finished → Idle
    pub fn clear(&mut self) {
        self.finished = false;
    }

    /// Check for a completion and acknowledge it in one go
    pub fn take_finished(&mut self) -> bool {
        std::mem::replace(&mut self.finished, false)
    }

    pub fn state(&self) -> TimerState {
        if self.running {
            TimerState::Running
        } else if self.finished {
            TimerState::Finished
        } else {
            TimerState::Idle
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Countdown events since the last drain
    pub fn drain_events(&mut self) -> Vec<CountdownEvent> {
        std::mem::take(&mut self.events)
    }
}
