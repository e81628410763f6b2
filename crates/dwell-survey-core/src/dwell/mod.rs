//! Dwell selection: hold a hand inside a target until the countdown ends
//!
//! A [`ChoiceEvaluator`] owns the accept and reject [`DwellTarget`]s of one
//! question and a single [`DwellTimer`] shared between them. Leaving both
//! targets abandons the countdown; finishing it yields one decision, after
//! which the evaluator stays silent until re-armed.

mod evaluator;
mod target;
mod timer;

use std::time::Duration;

use dwell_survey_config::DwellConfig;
use serde::Serialize;

pub use evaluator::ChoiceEvaluator;
pub use target::DwellTarget;
pub use timer::{DwellTimer, TimerState};

/// The two answers a question offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChoiceKind {
    Accept,
    Reject,
}

impl ChoiceKind {
    /// Boolean answer value
    pub fn value(&self) -> bool {
        matches!(self, ChoiceKind::Accept)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChoiceKind::Accept => "Yes",
            ChoiceKind::Reject => "No",
        }
    }

    /// Fill colour (RGB)
    pub fn colour(&self) -> (u8, u8, u8) {
        match self {
            ChoiceKind::Accept => (0, 128, 0),
            ChoiceKind::Reject => (255, 0, 0),
        }
    }
}

/// Countdown progress, used to drive the on-screen countdown text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownEvent {
    /// A dwell began with this many steps to go
    Started(u32),
    /// One step elapsed, this many remain
    Remaining(u32),
    /// The dwell completed
    Finished,
}

/// Tuning for targets and countdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DwellSettings {
    pub countdown_steps: u32,
    pub step: Duration,
    pub target_diameter: f32,
    pub grow_delay: Duration,
    pub grow: Duration,
    pub stop_clears_finished: bool,
}

impl Default for DwellSettings {
    fn default() -> Self {
        Self {
            countdown_steps: 3,
            step: Duration::from_secs(1),
            target_diameter: 120.0,
            grow_delay: Duration::from_secs(2),
            grow: Duration::from_secs(1),
            stop_clears_finished: true,
        }
    }
}

impl DwellSettings {
    /// Targets appear at full size immediately
    pub fn without_grow(mut self) -> Self {
        self.grow_delay = Duration::ZERO;
        self.grow = Duration::ZERO;
        self
    }
}

impl From<&DwellConfig> for DwellSettings {
    fn from(config: &DwellConfig) -> Self {
        Self {
            countdown_steps: config.countdown_steps,
            step: Duration::from_millis(config.step_ms),
            target_diameter: config.target_diameter,
            grow_delay: Duration::from_millis(config.grow_delay_ms),
            grow: Duration::from_millis(config.grow_ms),
            stop_clears_finished: config.stop_clears_finished,
        }
    }
}
