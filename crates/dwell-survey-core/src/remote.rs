//! Remote collaborator boundary
//!
//! The core never talks to the network itself. It hands confirmed answers to
//! an [`AnswerSubmitter`] and is populated from a [`QuestionSource`] at
//! startup; HTTP implementations live in `dwell-survey-remote`.

use std::sync::Mutex;

use async_trait::async_trait;
use serde::Serialize;

/// A confirmed decision for one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub question_id: i64,
    pub value: bool,
}

impl Answer {
    pub fn new(question_id: i64, value: bool) -> Self {
        Self { question_id, value }
    }
}

/// A question as delivered by a question source
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionRecord {
    pub id: i64,
    pub text: String,
    /// Prompt size override, the kiosk default otherwise
    pub font_size: Option<f32>,
}

impl QuestionRecord {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            font_size: None,
        }
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }
}

/// Fire-and-forget answer delivery.
///
/// `submit` is called on the update thread and must return without waiting
/// for the delivery to complete. Failures stay inside the implementation.
pub trait AnswerSubmitter: Send + Sync {
    fn submit(&self, answer: Answer);
}

/// Where the survey questions come from
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_questions(&self) -> anyhow::Result<Vec<QuestionRecord>>;
}

/// Keeps every submitted answer in memory
#[derive(Debug, Default)]
pub struct RecordingSubmitter {
    answers: Mutex<Vec<Answer>>,
}

impl RecordingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers submitted so far, in order
    pub fn answers(&self) -> Vec<Answer> {
        self.answers
            .lock()
            .map(|answers| answers.clone())
            .unwrap_or_default()
    }
}

impl AnswerSubmitter for RecordingSubmitter {
    fn submit(&self, answer: Answer) {
        if let Ok(mut answers) = self.answers.lock() {
            answers.push(answer);
        }
    }
}

/// Serves a fixed list of questions
#[derive(Debug, Clone, Default)]
pub struct StaticQuestionSource {
    records: Vec<QuestionRecord>,
}

impl StaticQuestionSource {
    pub fn new(records: Vec<QuestionRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch_questions(&self) -> anyhow::Result<Vec<QuestionRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_submitter() {
        let submitter = RecordingSubmitter::new();
        submitter.submit(Answer::new(2, false));
        submitter.submit(Answer::new(4, true));
        assert_eq!(
            submitter.answers(),
            vec![Answer::new(2, false), Answer::new(4, true)]
        );
    }

    #[tokio::test]
    async fn test_static_source() {
        let source = StaticQuestionSource::new(vec![QuestionRecord::new(2, "Coffee?")]);
        let records = source.fetch_questions().await.unwrap();
        assert_eq!(records, vec![QuestionRecord::new(2, "Coffee?")]);
    }
}
