//! Presence debounce for the question display

use std::time::{Duration, Instant};

use dwell_survey_config::PresenceConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceSettings {
    /// Time without anyone in view before the display turns off
    pub grace: Duration,
    /// Time without samples before a person is forgotten
    pub entity_timeout: Duration,
}

impl Default for PresenceSettings {
    fn default() -> Self {
        Self {
            grace: Duration::from_secs(5),
            entity_timeout: Duration::from_secs(1),
        }
    }
}

impl From<&PresenceConfig> for PresenceSettings {
    fn from(config: &PresenceConfig) -> Self {
        Self {
            grace: Duration::from_millis(config.grace_ms),
            entity_timeout: Duration::from_millis(config.entity_timeout_ms),
        }
    }
}

/// What the display should do this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceAction {
    Enable,
    Disable,
    Hold,
}

/// Turns the display on as soon as someone is present and off only after
/// nobody has been seen for the whole grace period, so momentary tracking
/// loss does not flicker the screen.
#[derive(Debug, Clone)]
pub struct PresenceMonitor {
    grace: Duration,
    last_seen: Option<Instant>,
}

impl PresenceMonitor {
    pub fn new(grace: Duration) -> Self {
        Self {
            grace,
            last_seen: None,
        }
    }

    /// Record a fresh sensor sample of anyone
    pub fn observe(&mut self, now: Instant) {
        self.last_seen = Some(match self.last_seen {
            Some(seen) => seen.max(now),
            None => now,
        });
    }

    pub fn decide(&self, now: Instant, present: bool, display_enabled: bool) -> PresenceAction {
        if present && !display_enabled {
            return PresenceAction::Enable;
        }
        if display_enabled && self.absent_for(now).map_or(true, |gone| gone > self.grace) {
            return PresenceAction::Disable;
        }
        PresenceAction::Hold
    }

    /// Time since anyone was last seen, `None` if nobody ever was
    pub fn absent_for(&self, now: Instant) -> Option<Duration> {
        self.last_seen
            .map(|seen| now.saturating_duration_since(seen))
    }

    pub fn last_seen(&self) -> Option<Instant> {
        self.last_seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(base: Instant, ms: u64) -> Instant {
        base + Duration::from_millis(ms)
    }

    #[test]
    fn test_enables_immediately() {
        let t0 = Instant::now();
        let mut monitor = PresenceMonitor::new(Duration::from_secs(5));
        assert_eq!(monitor.decide(t0, false, false), PresenceAction::Hold);

        monitor.observe(t0);
        assert_eq!(monitor.decide(t0, true, false), PresenceAction::Enable);
    }

    #[test]
    fn test_disables_only_after_grace() {
        let t0 = Instant::now();
        let mut monitor = PresenceMonitor::new(Duration::from_secs(5));
        monitor.observe(t0);

        assert_eq!(monitor.decide(at(t0, 1000), false, true), PresenceAction::Hold);
        assert_eq!(monitor.decide(at(t0, 5000), false, true), PresenceAction::Hold);
        assert_eq!(monitor.decide(at(t0, 5001), false, true), PresenceAction::Disable);
    }

    #[test]
    fn test_brief_loss_does_not_disable() {
        let t0 = Instant::now();
        let mut monitor = PresenceMonitor::new(Duration::from_secs(5));
        monitor.observe(t0);
        monitor.observe(at(t0, 4000));

        assert_eq!(monitor.decide(at(t0, 8000), false, true), PresenceAction::Hold);
    }

    #[test]
    fn test_reenables_after_disable() {
        let t0 = Instant::now();
        let mut monitor = PresenceMonitor::new(Duration::from_secs(5));
        monitor.observe(t0);
        assert_eq!(monitor.decide(at(t0, 6000), false, true), PresenceAction::Disable);

        monitor.observe(at(t0, 7000));
        assert_eq!(monitor.decide(at(t0, 7000), true, false), PresenceAction::Enable);
    }

    #[test]
    fn test_observe_never_moves_backwards() {
        let t0 = Instant::now();
        let mut monitor = PresenceMonitor::new(Duration::from_secs(5));
        monitor.observe(at(t0, 100));
        monitor.observe(t0);
        assert_eq!(monitor.last_seen(), Some(at(t0, 100)));
    }

    #[test]
    fn test_settings_from_config() {
        let settings = PresenceSettings::from(&PresenceConfig::default());
        assert_eq!(settings, PresenceSettings::default());
    }
}
