//! Playfield geometry

use dwell_survey_config::DwellConfig;

use super::Point2D;
use crate::error::{KioskError, Result};

/// Playfield size and where the choice targets sit on it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    /// Accept anchor as fractions of the playfield
    pub accept_anchor: (f32, f32),
    /// Reject anchor as fractions of the playfield
    pub reject_anchor: (f32, f32),
}

impl Layout {
    /// Layout with the reference anchors: accept at (33%, 25%), reject at (66%, 25%)
    pub fn new(width: f32, height: f32) -> Result<Self> {
        if width <= 0.0 || height <= 0.0 {
            return Err(KioskError::InvalidLayout(format!(
                "playfield must have a positive size, got {}x{}",
                width, height
            )));
        }

        Ok(Self {
            width,
            height,
            accept_anchor: (0.33, 0.25),
            reject_anchor: (0.66, 0.25),
        })
    }

    /// Take the target anchors from the dwell configuration
    pub fn with_anchors(mut self, dwell: &DwellConfig) -> Self {
        self.accept_anchor = (dwell.accept_x, dwell.targets_y);
        self.reject_anchor = (dwell.reject_x, dwell.targets_y);
        self
    }

    pub fn accept_center(&self) -> Point2D {
        self.project(self.accept_anchor)
    }

    pub fn reject_center(&self) -> Point2D {
        self.project(self.reject_anchor)
    }

    /// Screen centre, where countdown text flies from
    pub fn center(&self) -> Point2D {
        Point2D::new(self.width / 2.0, self.height / 2.0)
    }

    fn project(&self, (fx, fy): (f32, f32)) -> Point2D {
        Point2D::new(self.width * fx, self.height * fy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_anchors() {
        let layout = Layout::new(1000.0, 800.0).unwrap();
        assert!(layout.accept_center().distance(&Point2D::new(330.0, 200.0)) < 1e-3);
        assert!(layout.reject_center().distance(&Point2D::new(660.0, 200.0)) < 1e-3);
        assert_eq!(layout.center(), Point2D::new(500.0, 400.0));
    }

    #[test]
    fn test_rejects_empty_playfield() {
        assert!(Layout::new(0.0, 100.0).is_err());
    }

    #[test]
    fn test_anchors_from_config() {
        let dwell = DwellConfig {
            accept_x: 0.25,
            reject_x: 0.75,
            targets_y: 0.5,
            ..DwellConfig::default()
        };
        let layout = Layout::new(100.0, 100.0).unwrap().with_anchors(&dwell);
        assert_eq!(layout.accept_center(), Point2D::new(25.0, 50.0));
        assert_eq!(layout.reject_center(), Point2D::new(75.0, 50.0));
    }
}
