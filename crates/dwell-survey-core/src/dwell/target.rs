//! Circular dwell targets

use std::time::Duration;

use super::{ChoiceKind, DwellSettings};
use crate::animation::Tween;
use crate::spatial::Point2D;

/// A circular answer region.
///
/// Hit testing always uses the radius the target currently presents, so a
/// target still growing in only accepts hands inside its visible part.
#[derive(Debug, Clone)]
pub struct DwellTarget {
    kind: ChoiceKind,
    center: Point2D,
    diameter: f32,
    size: Tween,
}

impl DwellTarget {
    /// A target shown at full size straight away
    pub fn new(kind: ChoiceKind, center: Point2D, diameter: f32) -> Self {
        Self {
            kind,
            center,
            diameter,
            size: Tween::settled(diameter),
        }
    }

    /// A target that grows from nothing after `delay`
    pub fn growing(
        kind: ChoiceKind,
        center: Point2D,
        diameter: f32,
        delay: Duration,
        duration: Duration,
    ) -> Self {
        Self {
            kind,
            center,
            diameter,
            size: Tween::new(0.0, diameter, duration).with_delay(delay),
        }
    }

    /// Build a target according to the dwell settings
    pub fn from_settings(kind: ChoiceKind, center: Point2D, settings: &DwellSettings) -> Self {
        if settings.grow.is_zero() && settings.grow_delay.is_zero() {
            Self::new(kind, center, settings.target_diameter)
        } else {
            Self::growing(
                kind,
                center,
                settings.target_diameter,
                settings.grow_delay,
                settings.grow,
            )
        }
    }

    /// Strictly inside the current radius
    pub fn contains_point(&self, point: &Point2D) -> bool {
        self.center.distance(point) < self.current_radius()
    }

    pub fn current_radius(&self) -> f32 {
        self.size.value() / 2.0
    }

    /// Advance the grow animation
    pub fn advance(&mut self, dt: Duration) {
        self.size.update(dt);
    }

    pub fn is_fully_grown(&self) -> bool {
        self.size.is_complete()
    }

    pub fn kind(&self) -> ChoiceKind {
        self.kind
    }

    pub fn center(&self) -> Point2D {
        self.center
    }

    pub fn diameter(&self) -> f32 {
        self.diameter
    }

    pub fn colour(&self) -> (u8, u8, u8) {
        self.kind.colour()
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }
}
