//! Plain-data render snapshot produced once per tick

use serde::Serialize;

use crate::dwell::{ChoiceKind, DwellTarget};
use crate::flow::Question;
use crate::overlay::OverlayView;
use crate::spatial::{Layout, Point2D};
use crate::tracking::HandPoints;

/// Prompt text of the active question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptView {
    pub text: String,
    pub font_size: f32,
    /// Horizontal centre, top edge
    pub position: Point2D,
}

impl PromptView {
    pub(crate) fn from_question(question: &Question, layout: &Layout) -> Self {
        Self {
            text: question.prompt().to_string(),
            font_size: question.font_size(),
            position: Point2D::new(layout.width / 2.0, layout.height * 0.6),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TargetView {
    pub kind: ChoiceKind,
    pub center: Point2D,
    pub radius: f32,
    pub colour: (u8, u8, u8),
    pub label: &'static str,
}

impl From<&DwellTarget> for TargetView {
    fn from(target: &DwellTarget) -> Self {
        let kind = target.kind();
        Self {
            kind,
            center: target.center(),
            radius: target.current_radius(),
            colour: target.colour(),
            label: target.label(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HandView {
    pub entity_id: u32,
    pub point: Point2D,
}

/// Everything a renderer needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneFrame {
    pub width: f32,
    pub height: f32,
    pub prompt: Option<PromptView>,
    pub targets: Vec<TargetView>,
    pub overlays: Vec<OverlayView>,
    pub hands: Vec<HandView>,
    /// The attract screen should show instead of a question
    pub idle: bool,
}

impl SceneFrame {
    /// An idle frame with nothing on it
    pub fn empty(layout: &Layout) -> Self {
        Self {
            width: layout.width,
            height: layout.height,
            prompt: None,
            targets: Vec::new(),
            overlays: Vec::new(),
            hands: Vec::new(),
            idle: true,
        }
    }

    pub(crate) fn with_hands(mut self, hands: &[HandPoints]) -> Self {
        self.hands = hands
            .iter()
            .flat_map(|h| {
                h.points().map(move |point| HandView {
                    entity_id: h.entity_id,
                    point,
                })
            })
            .collect();
        self
    }
}
