//! Scripted visitor for headless runs
//!
//! Repeats a fixed visit: walk in, hold "No", rest, hold "Yes", walk away
//! long enough for the display to switch off.

use std::time::{Duration, Instant};

use dwell_survey_core::{BodySample, Layout, Point2D, SensorEvent};

const VISITOR_ID: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Pose {
    Away,
    Resting,
    OnReject,
    OnAccept,
}

/// (phase end in seconds, pose)
const SCRIPT: [(u64, Pose); 6] = [
    (2, Pose::Away),
    (4, Pose::Resting),
    (9, Pose::OnReject),
    (11, Pose::Resting),
    (16, Pose::OnAccept),
    (24, Pose::Away),
];

pub struct ScriptedVisitor {
    layout: Layout,
    was_present: bool,
}

impl ScriptedVisitor {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            was_present: false,
        }
    }

    /// Script length before it repeats
    pub fn period() -> Duration {
        Duration::from_secs(SCRIPT[SCRIPT.len() - 1].0)
    }

    /// What the sensor would report `elapsed` into the run
    pub fn event_at(&mut self, elapsed: Duration, now: Instant) -> Option<SensorEvent> {
        let point = match pose_at(elapsed) {
            Pose::Away => None,
            Pose::Resting => Some(Point2D::new(
                self.layout.width * 0.1,
                self.layout.height * 0.9,
            )),
            Pose::OnReject => Some(self.layout.reject_center()),
            Pose::OnAccept => Some(self.layout.accept_center()),
        };

        let was_present = std::mem::replace(&mut self.was_present, point.is_some());
        match point {
            Some(point) => Some(SensorEvent::Sample(
                BodySample::new(VISITOR_ID, now).with_right(point),
            )),
            None if was_present => Some(SensorEvent::Lost {
                entity_id: VISITOR_ID,
            }),
            None => None,
        }
    }
}

fn pose_at(elapsed: Duration) -> Pose {
    let period = ScriptedVisitor::period().as_millis();
    let offset = (elapsed.as_millis() % period) as u64;
    SCRIPT
        .iter()
        .find(|(end, _)| offset < end * 1000)
        .map(|(_, pose)| *pose)
        .unwrap_or(Pose::Away)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn test_script_phases() {
        assert_eq!(pose_at(secs(0.5)), Pose::Away);
        assert_eq!(pose_at(secs(3.0)), Pose::Resting);
        assert_eq!(pose_at(secs(5.0)), Pose::OnReject);
        assert_eq!(pose_at(secs(13.0)), Pose::OnAccept);
        assert_eq!(pose_at(secs(20.0)), Pose::Away);
        // repeats
        assert_eq!(pose_at(secs(24.0 + 5.0)), Pose::OnReject);
    }

    #[test]
    fn test_lost_reported_once() {
        let layout = Layout::new(1280.0, 720.0).unwrap();
        let mut visitor = ScriptedVisitor::new(layout);
        let now = Instant::now();

        assert_eq!(visitor.event_at(secs(1.0), now), None);
        assert!(matches!(
            visitor.event_at(secs(5.0), now),
            Some(SensorEvent::Sample(s)) if s.right == Some(layout.reject_center())
        ));
        assert_eq!(
            visitor.event_at(secs(17.0), now),
            Some(SensorEvent::Lost { entity_id: VISITOR_ID })
        );
        assert_eq!(visitor.event_at(secs(18.0), now), None);
    }
}
