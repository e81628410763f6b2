/// Errors raised when assembling a kiosk session.
///
/// Nothing inside the update tick returns these; they only guard
/// construction input.
#[derive(Debug, thiserror::Error)]
pub enum KioskError {
    #[error("Survey has no questions")]
    EmptySurvey,

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),
}

pub type Result<T> = std::result::Result<T, KioskError>;
