//! Velocity-smoothed estimator for a single joint or bone

use std::time::{Duration, Instant};

use crate::spatial::Segment;

/// Weight kept from the previous velocity on each update
const SMOOTHING: f32 = 0.8;

/// Updates closer together than this are treated as this far apart, so a
/// burst of samples cannot blow the velocity up.
const MIN_UPDATE_INTERVAL_MS: f32 = 10.0;

/// A tracked segment with smoothed endpoint velocities (units per second)
#[derive(Debug, Clone)]
pub struct TrackedPoint {
    segment: Segment,
    last_segment: Segment,
    vx: f32,
    vy: f32,
    vx2: f32,
    vy2: f32,
    last_updated: Instant,
}

impl TrackedPoint {
    /// Start tracking at the first sighting, at rest
    pub fn new(segment: Segment, now: Instant) -> Self {
        Self {
            segment,
            last_segment: segment,
            vx: 0.0,
            vy: 0.0,
            vx2: 0.0,
            vy2: 0.0,
            last_updated: now,
        }
    }

    /// Fold in a genuine sensor reading
    pub fn update(&mut self, segment: Segment, now: Instant) {
        self.last_segment = self.segment;
        self.segment = segment;

        let elapsed_ms = millis(now.saturating_duration_since(self.last_updated));
        let fps = 1000.0 / elapsed_ms.max(MIN_UPDATE_INTERVAL_MS);
        self.last_updated = now;

        let (cur, prev) = (self.segment, self.last_segment);
        self.vx = smooth(self.vx, (cur.x1 - prev.x1) * fps);
        self.vy = smooth(self.vy, (cur.y1 - prev.y1) * fps);

        if !cur.is_point() {
            self.vx2 = smooth(self.vx2, (cur.x2 - prev.x2) * fps);
            self.vy2 = smooth(self.vy2, (cur.y2 - prev.y2) * fps);
        }
    }

    /// Where the segment should be at `now`, extrapolated from the last
    /// reading. Does not touch the filter state.
    pub fn estimate(&self, now: Instant) -> Segment {
        let dt = millis(now.saturating_duration_since(self.last_updated)) / 1000.0;
        let mut estimate = self.segment;

        estimate.x1 += self.vx * dt;
        estimate.y1 += self.vy * dt;

        if self.segment.is_point() {
            estimate.x2 = estimate.x1;
            estimate.y2 = estimate.y1;
        } else {
            estimate.x2 += self.vx2 * dt;
            estimate.y2 += self.vy2 * dt;
        }

        estimate
    }

    /// Smoothed velocity of the first endpoint
    pub fn velocity(&self) -> (f32, f32) {
        (self.vx, self.vy)
    }

    /// Smoothed velocity of the second endpoint (zero for point segments)
    pub fn end_velocity(&self) -> (f32, f32) {
        (self.vx2, self.vy2)
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn last_segment(&self) -> Segment {
        self.last_segment
    }

    pub fn last_updated(&self) -> Instant {
        self.last_updated
    }
}

fn smooth(previous: f32, sample: f32) -> f32 {
    previous * SMOOTHING + sample * (1.0 - SMOOTHING)
}

fn millis(d: Duration) -> f32 {
    d.as_secs_f32() * 1000.0
}
