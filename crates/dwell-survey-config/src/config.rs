//! Kiosk configuration sections and file discovery

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{ConfigError, Result};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level kiosk configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KioskConfig {
    pub display: DisplayConfig,
    pub pacer: PacerConfig,
    pub dwell: DwellConfig,
    pub presence: PresenceConfig,
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
    /// Questions used when no remote source is configured or it fails
    pub questions: Vec<QuestionConfig>,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            display: DisplayConfig::default(),
            pacer: PacerConfig::default(),
            dwell: DwellConfig::default(),
            presence: PresenceConfig::default(),
            remote: RemoteConfig::default(),
            logging: LoggingConfig::default(),
            questions: vec![
                QuestionConfig::new(2, "Did you enjoy this presentation?"),
                QuestionConfig::new(4, "Do you like the city of Toulon?"),
            ],
        }
    }
}

/// Playfield geometry and static text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Playfield width in scene units
    pub width: f32,
    /// Playfield height in scene units
    pub height: f32,
    /// Text flown in from the centre at startup
    pub greeting: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            greeting: Some("Hey there!".to_string()),
        }
    }
}

/// Adaptive frame pacing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacerConfig {
    /// Ceiling and starting target rate (updates per second)
    pub max_fps: f64,
    /// Floor the target rate never drops below
    pub min_fps: f64,
    /// Iterations between rate adjustments
    pub adjust_every: u32,
    /// Achieved/target ratio under which the target is lowered
    pub slowdown_ratio: f64,
    /// Weight retained by the smoothed frame time on each sample
    pub smoothing: f64,
    /// Shortest wait worth sleeping for
    pub timer_resolution_ms: u64,
}

impl Default for PacerConfig {
    fn default() -> Self {
        Self {
            max_fps: 70.0,
            min_fps: 15.0,
            adjust_every: 100,
            slowdown_ratio: 0.92,
            smoothing: 0.95,
            timer_resolution_ms: 2,
        }
    }
}

/// Dwell targets and countdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DwellConfig {
    /// Countdown steps a hand must stay inside a target
    pub countdown_steps: u32,
    /// Length of one countdown step
    pub step_ms: u64,
    /// Fully grown target diameter
    pub target_diameter: f32,
    /// Delay before a new target starts growing
    pub grow_delay_ms: u64,
    /// Time a target takes to reach full size (0 = appear fully grown)
    pub grow_ms: u64,
    /// Horizontal anchor of the accept target, as a fraction of width
    pub accept_x: f32,
    /// Horizontal anchor of the reject target, as a fraction of width
    pub reject_x: f32,
    /// Vertical anchor of both targets, as a fraction of height
    pub targets_y: f32,
    /// Whether stopping a countdown also drops an unconsumed completion
    pub stop_clears_finished: bool,
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            countdown_steps: 3,
            step_ms: 1000,
            target_diameter: 120.0,
            grow_delay_ms: 2000,
            grow_ms: 1000,
            accept_x: 0.33,
            reject_x: 0.66,
            targets_y: 0.25,
            stop_clears_finished: true,
        }
    }
}

/// Presence debounce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Time without any tracked person before the display is disabled
    pub grace_ms: u64,
    /// Time without samples before a tracked person is forgotten
    pub entity_timeout_ms: u64,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            grace_ms: 5000,
            entity_timeout_ms: 1000,
        }
    }
}

/// Remote question source and answer sink
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Base URL of the survey service; `None` keeps the kiosk offline
    pub base_url: Option<String>,
    pub questions_path: String,
    pub answers_path: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            questions_path: "/Question/All".to_string(),
            answers_path: "/Answer/Add".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive when `RUST_LOG` is unset
    pub level: String,
    /// Log file used while the terminal renderer owns the screen
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// A built-in survey question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionConfig {
    pub id: i64,
    pub text: String,
    #[serde(default = "default_font_size")]
    pub font_size: f32,
}

fn default_font_size() -> f32 {
    40.0
}

impl QuestionConfig {
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
            font_size: default_font_size(),
        }
    }
}

impl KioskConfig {
    /// Load configuration from an explicit path, the per-user config
    /// directory, or built-in defaults, in that order.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = toml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `<config dir>/dwell-survey/config.toml` for the current user
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "raisemyvoice", "dwell-survey")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Reject settings the kiosk cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        let (width, height) = (self.display.width, self.display.height);
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return invalid(format!(
                "display size must be positive, got {}x{}",
                width, height
            ));
        }
        let (min_fps, max_fps) = (self.pacer.min_fps, self.pacer.max_fps);
        if !(min_fps.is_finite() && max_fps.is_finite() && min_fps > 0.0 && min_fps <= max_fps) {
            return invalid(format!(
                "pacer bounds must satisfy 0 < min_fps <= max_fps, got {}..{}",
                min_fps, max_fps
            ));
        }
        if !(self.pacer.slowdown_ratio > 0.0 && self.pacer.slowdown_ratio <= 1.0) {
            return invalid(format!(
                "pacer.slowdown_ratio must be in (0, 1], got {}",
                self.pacer.slowdown_ratio
            ));
        }
        if self.pacer.adjust_every == 0 {
            return invalid("pacer.adjust_every must be at least 1".to_string());
        }
        if !(0.0..1.0).contains(&self.pacer.smoothing) {
            return invalid(format!(
                "pacer.smoothing must be in [0, 1), got {}",
                self.pacer.smoothing
            ));
        }
        if self.dwell.countdown_steps == 0 || self.dwell.step_ms == 0 {
            return invalid("dwell countdown must have at least one non-empty step".to_string());
        }
        let diameter = self.dwell.target_diameter;
        if !(diameter.is_finite() && diameter > 0.0) {
            return invalid(format!(
                "dwell.target_diameter must be positive, got {}",
                diameter
            ));
        }
        let anchors = [self.dwell.accept_x, self.dwell.reject_x, self.dwell.targets_y];
        if anchors.iter().any(|a| !a.is_finite()) {
            return invalid(format!(
                "dwell anchors must be finite, got accept_x={} reject_x={} targets_y={}",
                anchors[0], anchors[1], anchors[2]
            ));
        }
        if self.questions.is_empty() {
            return invalid("at least one built-in question is required".to_string());
        }

        Ok(())
    }
}
