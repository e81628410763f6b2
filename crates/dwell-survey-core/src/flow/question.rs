//! A single survey question

use crate::dwell::{ChoiceEvaluator, DwellSettings};
use crate::spatial::Layout;

/// A yes/no question with its own choice evaluator
#[derive(Debug, Clone)]
pub struct Question {
    id: i64,
    prompt: String,
    font_size: f32,
    evaluator: ChoiceEvaluator,
    display_enabled: bool,
}

impl Question {
    pub fn new(id: i64, prompt: impl Into<String>, font_size: f32, settings: DwellSettings) -> Self {
        Self {
            id,
            prompt: prompt.into(),
            font_size,
            evaluator: ChoiceEvaluator::new(settings),
            display_enabled: false,
        }
    }

    pub fn id(&self) -> i64 {
        self.id
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Whether the prompt is currently materialized
    pub fn is_display_enabled(&self) -> bool {
        self.display_enabled
    }

    pub fn evaluator(&self) -> &ChoiceEvaluator {
        &self.evaluator
    }

    pub(crate) fn evaluator_mut(&mut self) -> &mut ChoiceEvaluator {
        &mut self.evaluator
    }

    /// Show the prompt and its targets
    pub(crate) fn enable_display(&mut self, layout: &Layout) {
        self.display_enabled = true;
        self.evaluator.create_choice(layout);
    }

    /// Hide the prompt and remove its targets
    pub(crate) fn disable_display(&mut self) {
        self.display_enabled = false;
        self.evaluator.delete_choice();
    }
}
