//! The kiosk session: one owner for all interaction state
//!
//! A [`Kiosk`] is created once at startup and ticked from the paced update
//! thread. Each tick folds in the sensor samples that arrived since the
//! previous one, applies the presence policy, evaluates hands against the
//! active question and returns a [`SceneFrame`] to draw.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dwell_survey_config::KioskConfig;
use tracing::{debug, info, warn};

use crate::dwell::{CountdownEvent, DwellSettings};
use crate::error::{KioskError, Result};
use crate::flow::SurveyFlow;
use crate::overlay::OverlayLayer;
use crate::presence::{PresenceAction, PresenceMonitor, PresenceSettings};
use crate::remote::{AnswerSubmitter, QuestionRecord};
use crate::scene::{PromptView, SceneFrame, TargetView};
use crate::sensor::SensorInbox;
use crate::spatial::{Layout, Point2D};
use crate::tracking::HandTracking;

const COUNTDOWN_FONT_SIZE: f32 = 100.0;
const DEFAULT_PROMPT_SIZE: f32 = 40.0;

/// Everything tunable about a session
#[derive(Debug, Clone, PartialEq)]
pub struct KioskSettings {
    pub dwell: DwellSettings,
    pub presence: PresenceSettings,
    /// Prompt size for questions that do not carry their own
    pub prompt_font_size: f32,
    /// Shown once when the session starts
    pub greeting: Option<String>,
}

impl Default for KioskSettings {
    fn default() -> Self {
        Self {
            dwell: DwellSettings::default(),
            presence: PresenceSettings::default(),
            prompt_font_size: DEFAULT_PROMPT_SIZE,
            greeting: None,
        }
    }
}

impl From<&KioskConfig> for KioskSettings {
    fn from(config: &KioskConfig) -> Self {
        Self {
            dwell: DwellSettings::from(&config.dwell),
            presence: PresenceSettings::from(&config.presence),
            prompt_font_size: DEFAULT_PROMPT_SIZE,
            greeting: config.display.greeting.clone(),
        }
    }
}

pub struct Kiosk {
    layout: Layout,
    settings: KioskSettings,
    flow: SurveyFlow,
    hands: HandTracking,
    presence: PresenceMonitor,
    overlays: OverlayLayer,
    inbox: SensorInbox,
    submitter: Arc<dyn AnswerSubmitter>,
    last_tick: Option<Instant>,
    ticks: u64,
    answers: u64,
}

impl Kiosk {
    pub fn new(
        layout: Layout,
        questions: &[QuestionRecord],
        settings: KioskSettings,
        inbox: SensorInbox,
        submitter: Arc<dyn AnswerSubmitter>,
    ) -> Result<Self> {
        if questions.is_empty() {
            return Err(KioskError::EmptySurvey);
        }

        let mut flow = SurveyFlow::new(layout, settings.dwell);
        for record in questions {
            let size = record.font_size.unwrap_or(settings.prompt_font_size);
            flow.add_question(record.text.clone(), size, record.id);
        }

        let mut overlays = OverlayLayer::new();
        if let Some(greeting) = &settings.greeting {
            overlays.spawn(greeting.clone(), layout.width / 30.0, layout.center());
        }

        info!(
            questions = flow.len(),
            width = layout.width,
            height = layout.height,
            "Kiosk session created"
        );

        Ok(Self {
            layout,
            presence: PresenceMonitor::new(settings.presence.grace),
            settings,
            flow,
            hands: HandTracking::new(),
            overlays,
            inbox,
            submitter,
            last_tick: None,
            ticks: 0,
            answers: 0,
        })
    }

    /// Run one update at `now` and describe what to draw
    pub fn tick(&mut self, now: Instant) -> SceneFrame {
        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last_tick = Some(now);
        self.ticks += 1;

        self.ingest_sensor(now);

        let present = !self.hands.is_empty();
        let action = self
            .presence
            .decide(now, present, self.flow.is_display_enabled());
        if action == PresenceAction::Enable {
            debug!("Visitor present, showing question");
            self.flow.activate_display();
        }

        let hands = self.hands.hand_points(now);
        let points: Vec<Point2D> = hands.iter().flat_map(|h| h.points()).collect();
        if let Some(answer) = self.flow.check_answer(&points, dt) {
            self.answers += 1;
            self.submitter.submit(answer);
        }

        if action == PresenceAction::Disable && self.flow.is_display_enabled() {
            debug!("Nobody in view, hiding question");
            self.flow.deactivate_display();
        }

        self.flow.advance_animations(dt);
        self.spawn_countdown();
        self.overlays.advance();

        self.frame().with_hands(&hands)
    }

    fn ingest_sensor(&mut self, now: Instant) {
        let was_connected = !self.inbox.is_disconnected();
        let batch = self.inbox.drain();
        for sample in batch.samples.values() {
            self.hands.update(sample);
            self.presence.observe(sample.captured_at);
        }
        for entity_id in &batch.lost {
            self.hands.evict(*entity_id);
        }
        self.hands
            .evict_stale(now, self.settings.presence.entity_timeout);

        if was_connected && self.inbox.is_disconnected() {
            warn!("Sensor feed closed, no further samples will arrive");
        }
    }

    fn spawn_countdown(&mut self) {
        let center = self.layout.center();
        for event in self.flow.drain_countdown() {
            let text = match event {
                CountdownEvent::Started(n) | CountdownEvent::Remaining(n) => n.to_string(),
                CountdownEvent::Finished => "Voted!".to_string(),
            };
            self.overlays.spawn(text, COUNTDOWN_FONT_SIZE, center);
        }
    }

    fn frame(&self) -> SceneFrame {
        let mut frame = SceneFrame::empty(&self.layout);
        frame.overlays = self.overlays.views();

        if let Some(question) = self
            .flow
            .active_question()
            .filter(|q| q.is_display_enabled())
        {
            frame.idle = false;
            frame.prompt = Some(PromptView::from_question(question, &self.layout));
            frame.targets = question
                .evaluator()
                .targets()
                .map(TargetView::from)
                .collect();
        }

        frame
    }

    pub fn flow(&self) -> &SurveyFlow {
        &self.flow
    }

    pub fn hands(&self) -> &HandTracking {
        &self.hands
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn settings(&self) -> &KioskSettings {
        &self.settings
    }

    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Answers handed to the submitter so far
    pub fn answer_count(&self) -> u64 {
        self.answers
    }

    /// True once every sensor feed has been dropped
    pub fn sensor_disconnected(&self) -> bool {
        self.inbox.is_disconnected()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::RecordingSubmitter;
    use crate::sensor::{BodySample, SensorEvent, SensorFeed};

    fn kiosk(greeting: Option<&str>) -> (Kiosk, SensorFeed, Arc<RecordingSubmitter>) {
        let (feed, inbox) = SensorInbox::channel();
        let submitter = Arc::new(RecordingSubmitter::new());
        let settings = KioskSettings {
            dwell: DwellSettings::default().without_grow(),
            greeting: greeting.map(str::to_string),
            ..KioskSettings::default()
        };
        let kiosk = Kiosk::new(
            Layout::new(1000.0, 800.0).unwrap(),
            &[QuestionRecord::new(2, "Coffee?"), QuestionRecord::new(4, "Tea?")],
            settings,
            inbox,
            submitter.clone(),
        )
        .unwrap();
        (kiosk, feed, submitter)
    }

    #[test]
    fn test_empty_survey_rejected() {
        let (_, inbox) = SensorInbox::channel();
        let result = Kiosk::new(
            Layout::new(100.0, 100.0).unwrap(),
            &[],
            KioskSettings::default(),
            inbox,
            Arc::new(RecordingSubmitter::new()),
        );
        assert!(matches!(result, Err(KioskError::EmptySurvey)));
    }

    #[test]
    fn test_idle_without_visitors() {
        let (mut kiosk, _feed, _) = kiosk(None);
        let frame = kiosk.tick(Instant::now());
        assert!(frame.idle);
        assert!(frame.prompt.is_none());
        assert!(frame.targets.is_empty());
    }

    #[test]
    fn test_greeting_overlay() {
        let (mut kiosk, _feed, _) = kiosk(Some("Hey there!"));
        let frame = kiosk.tick(Instant::now());
        assert_eq!(frame.overlays.len(), 1);
        assert_eq!(frame.overlays[0].text, "Hey there!");
    }

    #[test]
    fn test_visitor_shows_question() {
        let (mut kiosk, feed, _) = kiosk(None);
        let now = Instant::now();
        feed.publish(SensorEvent::Sample(
            BodySample::new(1, now).with_right(Point2D::new(10.0, 10.0)),
        ));

        let frame = kiosk.tick(now);
        assert!(!frame.idle);
        assert_eq!(frame.prompt.as_ref().map(|p| p.text.as_str()), Some("Coffee?"));
        assert_eq!(frame.targets.len(), 2);
        assert_eq!(frame.hands.len(), 1);
    }

    #[test]
    fn test_countdown_overlays() {
        let (mut kiosk, feed, submitter) = kiosk(None);
        let t0 = Instant::now();
        let accept = kiosk.layout().accept_center();

        let mut texts = Vec::new();
        for i in 0..4u64 {
            let now = t0 + Duration::from_secs(i);
            feed.publish(SensorEvent::Sample(BodySample::new(1, now).with_left(accept)));
            let frame = kiosk.tick(now);
            texts.extend(frame.overlays.into_iter().map(|o| o.text));
        }

        assert!(texts.contains(&"3".to_string()));
        assert!(texts.contains(&"Voted!".to_string()));
        assert_eq!(submitter.answers().len(), 1);
        assert_eq!(kiosk.answer_count(), 1);
    }
}
