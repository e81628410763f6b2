//! Transient "flying" text overlays
//!
//! Text spawned at a point grows and fades out over about a hundred frames.
//! Used for the countdown digits, the vote confirmation and the greeting.

use crate::spatial::Point2D;

const FADE_PER_FRAME: f32 = 0.01;

#[derive(Debug, Clone)]
struct FlyingText {
    text: String,
    center: Point2D,
    font_size: f32,
    grow: f32,
    alpha: f32,
}

impl FlyingText {
    fn new(text: String, size: f32, center: Point2D) -> Self {
        Self {
            text,
            center,
            font_size: size.max(1.0),
            grow: size.max(0.0).sqrt() * 0.4,
            alpha: 1.0,
        }
    }

    fn advance(&mut self) {
        self.alpha = (self.alpha - FADE_PER_FRAME).max(0.0);
        self.font_size += self.grow;
    }
}

/// How an overlay should be drawn this frame
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OverlayView {
    pub text: String,
    pub center: Point2D,
    pub font_size: f32,
    /// 0 (invisible) to 1 (opaque)
    pub opacity: f32,
}

/// Owned collection of live overlays
#[derive(Debug, Clone, Default)]
pub struct OverlayLayer {
    texts: Vec<FlyingText>,
}

impl OverlayLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, text: impl Into<String>, size: f32, center: Point2D) {
        self.texts.push(FlyingText::new(text.into(), size, center));
    }

    /// One frame: drop faded overlays, then grow and fade the rest
    pub fn advance(&mut self) {
        self.texts.retain(|t| t.alpha > 0.0);
        for text in &mut self.texts {
            text.advance();
        }
    }

    pub fn views(&self) -> Vec<OverlayView> {
        self.texts
            .iter()
            .map(|t| OverlayView {
                text: t.text.clone(),
                center: t.center,
                font_size: t.font_size.max(1.0),
                opacity: t.alpha.powf(1.5),
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.texts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.texts.is_empty()
    }
}
