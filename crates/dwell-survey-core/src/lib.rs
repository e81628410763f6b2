//! dwell-survey-core: interaction core of a gesture-driven survey kiosk
//!
//! This crate turns noisy per-frame hand coordinates into yes/no answers:
//! - Velocity-smoothed hand tracking that bridges sensor frame gaps
//! - Circular dwell targets with a countdown that confirms a choice
//! - A wrapping question flow that submits each answer exactly once
//! - Presence debounce, transient overlays and a plain-data scene snapshot
//! - An adaptive frame pacer driving the whole update on one thread
//!
//! Sensor acquisition, drawing and network transport stay outside: they talk
//! to the core through [`sensor::SensorFeed`], [`scene::SceneFrame`] and the
//! traits in [`remote`].

pub mod animation;
pub mod dwell;
pub mod error;
pub mod flow;
pub mod kiosk;
pub mod overlay;
pub mod pacer;
pub mod presence;
pub mod remote;
pub mod scene;
pub mod sensor;
pub mod spatial;
pub mod tracking;

// Re-export commonly used types
pub use dwell::{ChoiceEvaluator, ChoiceKind, CountdownEvent, DwellSettings, DwellTarget, DwellTimer};
pub use error::{KioskError, Result};
pub use flow::{Question, SurveyFlow};
pub use kiosk::{Kiosk, KioskSettings};
pub use overlay::{OverlayLayer, OverlayView};
pub use pacer::{FramePacer, PacerSettings, PacerStep};
pub use presence::{PresenceAction, PresenceMonitor, PresenceSettings};
pub use remote::{
    Answer, AnswerSubmitter, QuestionRecord, QuestionSource, RecordingSubmitter, StaticQuestionSource,
};
pub use scene::{HandView, PromptView, SceneFrame, TargetView};
pub use sensor::{BodySample, SensorEvent, SensorFeed, SensorInbox};
pub use spatial::{Layout, Point2D, Segment};
pub use tracking::{HandPoints, HandTracking, TrackedPoint};
