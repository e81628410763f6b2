//! Survey question flow

mod question;
mod survey;

pub use question::Question;
pub use survey::SurveyFlow;
