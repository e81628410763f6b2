//! Accept/reject decision for one question

use std::time::Duration;

use tracing::{debug, trace};

use super::{ChoiceKind, CountdownEvent, DwellSettings, DwellTarget, DwellTimer};
use crate::spatial::{Layout, Point2D};

/// Two targets sharing one countdown.
///
/// Accept is tested before reject, so a hand in each resolves to accept.
/// Moving straight from one target into the other keeps the countdown
/// running; only a tick with no hand in either target abandons it.
#[derive(Debug, Clone)]
pub struct ChoiceEvaluator {
    settings: DwellSettings,
    accept: Option<DwellTarget>,
    reject: Option<DwellTarget>,
    timer: DwellTimer,
    awaiting_rearm: bool,
}

impl ChoiceEvaluator {
    pub fn new(settings: DwellSettings) -> Self {
        Self {
            settings,
            accept: None,
            reject: None,
            timer: DwellTimer::from_settings(&settings),
            awaiting_rearm: false,
        }
    }

    /// Materialize both targets at their layout anchors (idempotent)
    pub fn create_choice(&mut self, layout: &Layout) {
        if self.accept.is_none() {
            self.accept = Some(DwellTarget::from_settings(
                ChoiceKind::Accept,
                layout.accept_center(),
                &self.settings,
            ));
        }
        if self.reject.is_none() {
            self.reject = Some(DwellTarget::from_settings(
                ChoiceKind::Reject,
                layout.reject_center(),
                &self.settings,
            ));
        }
    }

    /// Remove both targets, abandoning any dwell in progress
    pub fn delete_choice(&mut self) {
        self.accept = None;
        self.reject = None;
        self.timer.stop();
    }

    pub fn has_choice(&self) -> bool {
        self.accept.is_some() && self.reject.is_some()
    }

    /// Allow a new decision after one was emitted
    pub fn rearm(&mut self) {
        self.awaiting_rearm = false;
        self.timer.stop();
        self.timer.clear();
    }

    pub fn is_awaiting_rearm(&self) -> bool {
        self.awaiting_rearm
    }

    /// True while a countdown is running
    pub fn is_dwelling(&self) -> bool {
        self.timer.state() == super::TimerState::Running
    }

    /// Evaluate this tick's hand points. `dt` is the update time since the
    /// previous tick and drives the countdown.
    pub fn evaluate(&mut self, points: &[Point2D], dt: Duration) -> Option<ChoiceKind> {
        let (Some(accept), Some(reject)) = (&self.accept, &self.reject) else {
            self.timer.stop();
            return None;
        };

        if self.awaiting_rearm {
            self.timer.stop();
            return None;
        }

        let hit = if points.iter().any(|p| accept.contains_point(p)) {
            Some(ChoiceKind::Accept)
        } else if points.iter().any(|p| reject.contains_point(p)) {
            Some(ChoiceKind::Reject)
        } else {
            None
        };

        let Some(kind) = hit else {
            if self.is_dwelling() {
                trace!("Hand left the targets, countdown abandoned");
            }
            self.timer.stop();
            return None;
        };

        // The hand entered somewhere inside the last interval, so the tick
        // that starts the countdown credits nothing
        if self.is_dwelling() {
            self.timer.advance(dt);
        } else {
            self.timer.start();
        }

        if self.timer.take_finished() {
            debug!(choice = ?kind, "Dwell confirmed");
            self.awaiting_rearm = true;
            return Some(kind);
        }

        None
    }

    /// Advance target animations
    pub fn advance(&mut self, dt: Duration) {
        for target in self.accept.iter_mut().chain(self.reject.iter_mut()) {
            target.advance(dt);
        }
    }

    /// Present targets, accept first
    pub fn targets(&self) -> impl Iterator<Item = &DwellTarget> {
        self.accept.iter().chain(self.reject.iter())
    }

    /// Countdown events since the last drain
    pub fn drain_countdown(&mut self) -> Vec<CountdownEvent> {
        self.timer.drain_events()
    }
}
