//! Ordered questions with a single wrapping cursor

use std::time::Duration;

use tracing::{debug, info};

use super::Question;
use crate::dwell::{CountdownEvent, DwellSettings};
use crate::remote::Answer;
use crate::spatial::{Layout, Point2D};

/// The survey state machine.
///
/// Exactly one question is active at a time. Its display (prompt and
/// targets) is switched on and off by the caller according to presence;
/// moving the cursor always switches the old question's display off.
#[derive(Debug, Clone)]
pub struct SurveyFlow {
    questions: Vec<Question>,
    index: usize,
    layout: Layout,
    settings: DwellSettings,
    countdown: Vec<CountdownEvent>,
}

impl SurveyFlow {
    pub fn new(layout: Layout, settings: DwellSettings) -> Self {
        Self {
            questions: Vec::new(),
            index: 0,
            layout,
            settings,
            countdown: Vec::new(),
        }
    }

    /// Append a question; the cursor does not move
    pub fn add_question(&mut self, prompt: impl Into<String>, font_size: f32, id: i64) {
        self.questions
            .push(Question::new(id, prompt, font_size, self.settings));
    }

    /// Show the active question's prompt and targets
    pub fn activate_display(&mut self) {
        let layout = self.layout;
        if let Some(question) = self.questions.get_mut(self.index) {
            if !question.is_display_enabled() {
                debug!(question = question.id(), "Display enabled");
                question.evaluator_mut().rearm();
            }
            question.enable_display(&layout);
        }
    }

    /// Hide the active question's prompt and targets, dropping any dwell
    pub fn deactivate_display(&mut self) {
        if let Some(question) = self.questions.get_mut(self.index) {
            if question.is_display_enabled() {
                debug!(question = question.id(), "Display disabled");
            }
            question.disable_display();
        }
    }

    /// Move to the next question, wrapping after the last one
    pub fn advance(&mut self) {
        if self.questions.is_empty() {
            return;
        }

        self.deactivate_display();
        self.index = (self.index + 1) % self.questions.len();
        self.arm_active();
    }

    /// Move to the previous question, stopping at the first one
    pub fn retreat(&mut self) {
        if self.questions.is_empty() {
            return;
        }

        self.deactivate_display();
        self.index = self.index.saturating_sub(1);
        self.arm_active();
    }

    /// Evaluate the hand points against the active question. A confirmed
    /// dwell yields its answer and advances the cursor.
    pub fn check_answer(&mut self, points: &[Point2D], dt: Duration) -> Option<Answer> {
        let question = self.questions.get_mut(self.index)?;
        let decision = question.evaluator_mut().evaluate(points, dt);
        self.countdown
            .extend(question.evaluator_mut().drain_countdown());

        let kind = decision?;
        let answer = Answer::new(question.id(), kind.value());
        info!(
            question = answer.question_id,
            value = answer.value,
            "Answer confirmed"
        );

        self.advance();
        Some(answer)
    }

    /// True iff the active question has its prompt materialized
    pub fn is_display_enabled(&self) -> bool {
        self.active_question()
            .map(Question::is_display_enabled)
            .unwrap_or(false)
    }

    /// Advance target animations of the active question
    pub fn advance_animations(&mut self, dt: Duration) {
        if let Some(question) = self.questions.get_mut(self.index) {
            question.evaluator_mut().advance(dt);
        }
    }

    /// Countdown events produced since the last drain
    pub fn drain_countdown(&mut self) -> Vec<CountdownEvent> {
        std::mem::take(&mut self.countdown)
    }

    pub fn active_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn active_index(&self) -> usize {
        self.index
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    fn arm_active(&mut self) {
        if let Some(question) = self.questions.get_mut(self.index) {
            question.evaluator_mut().rearm();
            debug!(question = question.id(), index = self.index, "Question active");
        }
    }
}
