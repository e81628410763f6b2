//! HTTP collaborators of the dwell-survey kiosk
//!
//! - [`HttpQuestionSource`] loads the question list once at startup
//! - [`HttpAnswerSubmitter`] posts each confirmed answer without blocking
//!   the update thread

mod error;
pub mod payload;
mod source;
mod submitter;

pub use error::{RemoteError, Result};
pub use payload::AnswerPayload;
pub use source::HttpQuestionSource;
pub use submitter::{HttpAnswerSubmitter, StatsSnapshot, SubmissionStats};

/// Join a base URL and an endpoint path with exactly one slash between them
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
