//! Per-person hand tracking registry

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::debug;

use super::TrackedPoint;
use crate::sensor::BodySample;
use crate::spatial::{Point2D, Segment};

/// Estimated hand positions of one tracked person for the current tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandPoints {
    pub entity_id: u32,
    pub left: Option<Point2D>,
    pub right: Option<Point2D>,
}

impl HandPoints {
    /// Both hands, skipping the ones never seen
    pub fn points(&self) -> impl Iterator<Item = Point2D> {
        self.left.into_iter().chain(self.right)
    }
}

#[derive(Debug, Clone)]
struct TrackedBody {
    left: Option<TrackedPoint>,
    right: Option<TrackedPoint>,
    last_sample: Instant,
}

/// Velocity-smoothed hands for every person currently in view.
///
/// Entries are created on first sighting and only removed through
/// [`evict`](Self::evict) or [`evict_stale`](Self::evict_stale).
#[derive(Debug, Default)]
pub struct HandTracking {
    bodies: BTreeMap<u32, TrackedBody>,
}

impl HandTracking {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a fresh sensor sample into the person's trackers
    pub fn update(&mut self, sample: &BodySample) {
        let now = sample.captured_at;
        let body = self.bodies.entry(sample.entity_id).or_insert_with(|| {
            debug!(entity = sample.entity_id, "Tracking new person");
            TrackedBody {
                left: None,
                right: None,
                last_sample: now,
            }
        });

        body.last_sample = now;
        track(&mut body.left, sample.left, now);
        track(&mut body.right, sample.right, now);
    }

    /// Forget a person the sensor reported as lost
    pub fn evict(&mut self, entity_id: u32) -> bool {
        let removed = self.bodies.remove(&entity_id).is_some();
        if removed {
            debug!(entity = entity_id, "Stopped tracking person");
        }
        removed
    }

    /// Forget everyone without a sample for longer than `timeout`.
    ///
    /// A hand that has gone unreported for as long is dropped on its own,
    /// even while the other hand keeps the person alive. Returns the number
    /// of people removed.
    pub fn evict_stale(&mut self, now: Instant, timeout: Duration) -> usize {
        let before = self.bodies.len();
        self.bodies.retain(|id, body| {
            let keep = now.saturating_duration_since(body.last_sample) <= timeout;
            if !keep {
                debug!(entity = *id, "Person timed out");
                return false;
            }
            for (side, slot) in [("left", &mut body.left), ("right", &mut body.right)] {
                let stale = slot
                    .as_ref()
                    .is_some_and(|t| now.saturating_duration_since(t.last_updated()) > timeout);
                if stale {
                    debug!(entity = *id, side, "Hand timed out");
                    *slot = None;
                }
            }
            true
        });
        before - self.bodies.len()
    }

    /// Hand estimates at `now` for every tracked person, by ascending id
    pub fn hand_points(&self, now: Instant) -> Vec<HandPoints> {
        self.bodies
            .iter()
            .map(|(id, body)| HandPoints {
                entity_id: *id,
                left: body.left.as_ref().map(|t| t.estimate(now).start()),
                right: body.right.as_ref().map(|t| t.estimate(now).start()),
            })
            .collect()
    }

    pub fn contains(&self, entity_id: u32) -> bool {
        self.bodies.contains_key(&entity_id)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

fn track(slot: &mut Option<TrackedPoint>, point: Option<Point2D>, now: Instant) {
    let Some(point) = point else {
        return;
    };

    let segment = Segment::from(point);
    match slot {
        Some(tracked) => tracked.update(segment, now),
        None => *slot = Some(TrackedPoint::new(segment, now)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u32, left: Option<(f32, f32)>, right: Option<(f32, f32)>, at: Instant) -> BodySample {
        BodySample {
            entity_id: id,
            left: left.map(|(x, y)| Point2D::new(x, y)),
            right: right.map(|(x, y)| Point2D::new(x, y)),
            captured_at: at,
        }
    }

    #[test]
    fn test_first_sighting_creates_entry() {
        let now = Instant::now();
        let mut hands = HandTracking::new();
        assert!(hands.is_empty());

        hands.update(&sample(3, Some((1.0, 2.0)), None, now));
        assert!(hands.contains(3));

        let points = hands.hand_points(now);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].left, Some(Point2D::new(1.0, 2.0)));
        assert_eq!(points[0].right, None);
        assert_eq!(points[0].points().count(), 1);
    }

    #[test]
    fn test_missing_hand_keeps_previous_tracker() {
        let t0 = Instant::now();
        let mut hands = HandTracking::new();
        hands.update(&sample(1, Some((0.0, 0.0)), Some((50.0, 50.0)), t0));
        hands.update(&sample(1, Some((10.0, 0.0)), None, t0 + Duration::from_millis(100)));

        let points = hands.hand_points(t0 + Duration::from_millis(100));
        assert_eq!(points[0].right, Some(Point2D::new(50.0, 50.0)));
        assert_eq!(points[0].left, Some(Point2D::new(10.0, 0.0)));
    }

    #[test]
    fn test_gap_is_bridged_by_extrapolation() {
        let t0 = Instant::now();
        let mut hands = HandTracking::new();
        hands.update(&sample(1, Some((0.0, 0.0)), None, t0));
        hands.update(&sample(1, Some((10.0, 0.0)), None, t0 + Duration::from_millis(100)));

        // No sample for the next 100ms: estimate keeps moving right
        let later = hands.hand_points(t0 + Duration::from_millis(200));
        let left = later[0].left.unwrap();
        assert!(left.x > 10.0);
    }

    #[test]
    fn test_evict() {
        let now = Instant::now();
        let mut hands = HandTracking::new();
        hands.update(&sample(1, Some((0.0, 0.0)), None, now));
        assert!(hands.evict(1));
        assert!(!hands.evict(1));
        assert!(hands.is_empty());
    }

    #[test]
    fn test_evict_stale() {
        let t0 = Instant::now();
        let mut hands = HandTracking::new();
        hands.update(&sample(1, Some((0.0, 0.0)), None, t0));
        hands.update(&sample(2, Some((0.0, 0.0)), None, t0 + Duration::from_millis(900)));

        let removed = hands.evict_stale(t0 + Duration::from_millis(1500), Duration::from_secs(1));
        assert_eq!(removed, 1);
        assert!(!hands.contains(1));
        assert!(hands.contains(2));
    }

    #[test]
    fn test_unreported_hand_dropped_while_other_keeps_person() {
        let t0 = Instant::now();
        let timeout = Duration::from_secs(1);
        let mut hands = HandTracking::new();
        hands.update(&sample(1, Some((0.0, 0.0)), Some((50.0, 50.0)), t0));
        hands.update(&sample(1, Some((10.0, 0.0)), Some((50.0, 50.0)), t0 + Duration::from_millis(100)));

        // Only the right hand from here on
        let mut now = t0;
        for ms in (200..=3000).step_by(100) {
            now = t0 + Duration::from_millis(ms);
            hands.update(&sample(1, None, Some((50.0, 50.0)), now));
            assert_eq!(hands.evict_stale(now, timeout), 0);
        }

        assert!(hands.contains(1));
        let points = hands.hand_points(now);
        assert_eq!(points[0].left, None);
        assert_eq!(points[0].right, Some(Point2D::new(50.0, 50.0)));

        // Left hand comes back as a fresh tracker at rest
        hands.update(&sample(1, Some((300.0, 0.0)), None, now));
        let later = hands.hand_points(now + Duration::from_millis(500));
        assert_eq!(later[0].left, Some(Point2D::new(300.0, 0.0)));
    }

    #[test]
    fn test_points_ordered_by_entity() {
        let now = Instant::now();
        let mut hands = HandTracking::new();
        hands.update(&sample(5, Some((0.0, 0.0)), None, now));
        hands.update(&sample(2, Some((0.0, 0.0)), None, now));

        let ids: Vec<u32> = hands.hand_points(now).iter().map(|h| h.entity_id).collect();
        assert_eq!(ids, vec![2, 5]);
        assert_eq!(hands.len(), 2);
    }
}
