//! Tracked segments: a single joint or a bone between two joints

use super::Point2D;

/// One or two endpoints plus a hit radius.
///
/// A segment whose endpoints coincide is a point (a single joint such as a
/// hand); otherwise it is a line (a bone).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub radius: f32,
}

impl Segment {
    /// A single joint
    pub fn point(x: f32, y: f32) -> Self {
        Self {
            x1: x,
            y1: y,
            x2: x,
            y2: y,
            radius: 1.0,
        }
    }

    /// A bone between two joints
    pub fn line(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            radius: 1.0,
        }
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    /// True when both endpoints coincide
    pub fn is_point(&self) -> bool {
        self.x1 == self.x2 && self.y1 == self.y2
    }

    pub fn start(&self) -> Point2D {
        Point2D::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point2D {
        Point2D::new(self.x2, self.y2)
    }
}

impl From<Point2D> for Segment {
    fn from(p: Point2D) -> Self {
        Segment::point(p.x, p.y)
    }
}
