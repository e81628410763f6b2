//! Keyboard-driven visitor for terminal development
//!
//! Maps key presses to body samples so the kiosk can be exercised without a
//! depth sensor. Arrow keys move the visitor's right hand across the
//! playfield; space makes the visitor walk in or out of view.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use dwell_survey_core::{BodySample, Layout, Point2D, SensorEvent};

const VISITOR_ID: u32 = 1;

/// Simulates one visitor from keyboard input
pub struct KeyboardVisitor {
    /// Hand position as fractions of the playfield
    hand_x: f32,
    hand_y: f32,
    /// Fraction moved per key press
    speed: f32,
    present: bool,
    layout: Layout,
}

impl KeyboardVisitor {
    pub fn new(layout: Layout) -> Self {
        Self {
            hand_x: 0.5,
            hand_y: 0.5,
            speed: 0.03,
            present: false,
            layout,
        }
    }

    /// Apply a key press. Returns an event to publish right away, if any.
    pub fn process_key(&mut self, key: KeyEvent, now: Instant) -> Option<SensorEvent> {
        if key.kind != KeyEventKind::Press {
            return None;
        }

        match key.code {
            KeyCode::Up => self.hand_y = (self.hand_y - self.speed).max(0.0),
            KeyCode::Down => self.hand_y = (self.hand_y + self.speed).min(1.0),
            KeyCode::Left => self.hand_x = (self.hand_x - self.speed).max(0.0),
            KeyCode::Right => self.hand_x = (self.hand_x + self.speed).min(1.0),
            KeyCode::Char(' ') => {
                self.present = !self.present;
                if !self.present {
                    return Some(SensorEvent::Lost {
                        entity_id: VISITOR_ID,
                    });
                }
            }
            KeyCode::Char('r') | KeyCode::Char('R') => self.reset(),
            _ => return None,
        }

        self.sample(now)
    }

    /// The visitor's current sample, `None` while out of view. Published
    /// every loop iteration so the kiosk keeps seeing a still hand.
    pub fn sample(&self, now: Instant) -> Option<SensorEvent> {
        self.present.then(|| {
            SensorEvent::Sample(BodySample::new(VISITOR_ID, now).with_right(self.hand_point()))
        })
    }

    pub fn hand_point(&self) -> Point2D {
        Point2D::new(
            self.hand_x * self.layout.width,
            self.hand_y * self.layout.height,
        )
    }

    pub fn is_present(&self) -> bool {
        self.present
    }

    /// Hand back to the centre, visitor out of view
    pub fn reset(&mut self) {
        self.hand_x = 0.5;
        self.hand_y = 0.5;
        self.present = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    fn visitor() -> KeyboardVisitor {
        KeyboardVisitor::new(Layout::new(1000.0, 500.0).unwrap())
    }

    #[test]
    fn test_absent_until_space() {
        let mut sim = visitor();
        let now = Instant::now();
        assert!(sim.sample(now).is_none());
        assert!(sim.process_key(press(KeyCode::Up), now).is_none());

        let event = sim.process_key(press(KeyCode::Char(' ')), now);
        assert!(matches!(event, Some(SensorEvent::Sample(_))));
        assert!(sim.is_present());
    }

    #[test]
    fn test_hand_movement() {
        let mut sim = visitor();
        let now = Instant::now();
        sim.process_key(press(KeyCode::Char(' ')), now);

        let Some(SensorEvent::Sample(sample)) = sim.process_key(press(KeyCode::Left), now) else {
            panic!("Expected a sample");
        };
        let hand = sample.right.unwrap();
        assert!(hand.x < 500.0);
        assert_eq!(hand.y, 250.0);
    }

    #[test]
    fn test_hand_stays_on_playfield() {
        let mut sim = visitor();
        let now = Instant::now();
        for _ in 0..100 {
            sim.process_key(press(KeyCode::Up), now);
        }
        assert_eq!(sim.hand_point().y, 0.0);
    }

    #[test]
    fn test_leaving_reports_lost() {
        let mut sim = visitor();
        let now = Instant::now();
        sim.process_key(press(KeyCode::Char(' ')), now);
        let event = sim.process_key(press(KeyCode::Char(' ')), now);
        assert_eq!(event, Some(SensorEvent::Lost { entity_id: VISITOR_ID }));
        assert!(sim.sample(now).is_none());
    }

    #[test]
    fn test_unmapped_key_ignored() {
        let mut sim = visitor();
        sim.process_key(press(KeyCode::Char(' ')), Instant::now());
        assert!(sim.process_key(press(KeyCode::Char('x')), Instant::now()).is_none());
    }
}
