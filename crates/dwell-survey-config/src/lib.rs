//! dwell-survey-config: configuration for the dwell-survey kiosk
//!
//! Every section is defaulted so an empty (or absent) file yields a working
//! kiosk with the reference tuning: 70/15 fps pacer, 3 second dwell, 5 second
//! presence grace and two built-in questions.

pub mod config;
mod error;

pub use config::{
    DisplayConfig, DwellConfig, KioskConfig, LoggingConfig, PacerConfig, PresenceConfig,
    QuestionConfig, RemoteConfig,
};
pub use error::{ConfigError, Result};
