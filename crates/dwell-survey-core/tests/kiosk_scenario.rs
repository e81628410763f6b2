use std::sync::Arc;
use std::time::{Duration, Instant};

use dwell_survey_core::{
    Answer, BodySample, DwellSettings, Kiosk, KioskSettings, Layout, Point2D, QuestionRecord,
    RecordingSubmitter, SensorEvent, SensorFeed, SensorInbox,
};

const STEP: Duration = Duration::from_secs(1);

struct Harness {
    kiosk: Kiosk,
    feed: SensorFeed,
    submitter: Arc<RecordingSubmitter>,
    t0: Instant,
    elapsed: Duration,
}

impl Harness {
    fn new() -> Self {
        let (feed, inbox) = SensorInbox::channel();
        let submitter = Arc::new(RecordingSubmitter::new());
        let settings = KioskSettings {
            dwell: DwellSettings::default().without_grow(),
            ..KioskSettings::default()
        };
        let kiosk = Kiosk::new(
            Layout::new(1280.0, 720.0).unwrap(),
            &[
                QuestionRecord::new(2, "Did you enjoy this presentation?"),
                QuestionRecord::new(4, "Do you like the city of Toulon?"),
            ],
            settings,
            inbox,
            submitter.clone(),
        )
        .unwrap();

        Self {
            kiosk,
            feed,
            submitter,
            t0: Instant::now(),
            elapsed: Duration::ZERO,
        }
    }

    fn now(&self) -> Instant {
        self.t0 + self.elapsed
    }

    /// One tick, optionally with a visitor's right hand at `hand`
    fn step(&mut self, hand: Option<Point2D>) -> dwell_survey_core::SceneFrame {
        self.elapsed += STEP;
        let now = self.now();
        if let Some(point) = hand {
            self.feed
                .publish(SensorEvent::Sample(BodySample::new(1, now).with_right(point)));
        }
        self.kiosk.tick(now)
    }
}

#[test]
fn test_reject_dwell_records_answer_and_moves_on() {
    let mut h = Harness::new();

    // Nobody in view: question hidden
    let frame = h.step(None);
    assert!(frame.idle);
    assert!(!h.kiosk.flow().is_display_enabled());

    // A visitor walks in away from the targets
    let frame = h.step(Some(Point2D::new(10.0, 700.0)));
    assert!(!frame.idle);
    assert_eq!(frame.targets.len(), 2);
    assert_eq!(h.kiosk.flow().active_question().unwrap().id(), 2);

    // and holds a hand on "No"
    let reject = h.kiosk.layout().reject_center();
    let mut ticks = 0;
    while h.submitter.answers().is_empty() {
        h.step(Some(reject));
        ticks += 1;
        assert!(ticks <= 4, "dwell took too long");
    }

    assert_eq!(h.submitter.answers(), vec![Answer::new(2, false)]);
    assert_eq!(h.kiosk.flow().active_question().unwrap().id(), 4);
}

#[test]
fn test_leaving_a_target_resets_the_countdown() {
    let mut h = Harness::new();
    let accept = h.kiosk.layout().accept_center();
    let away = Point2D::new(10.0, 700.0);

    h.step(Some(away));
    for _ in 0..3 {
        h.step(Some(accept));
    }
    h.step(Some(away));
    for _ in 0..3 {
        h.step(Some(accept));
    }
    assert!(h.submitter.answers().is_empty());

    h.step(Some(accept));
    assert_eq!(h.submitter.answers(), vec![Answer::new(2, true)]);
}

#[test]
fn test_display_survives_short_absence() {
    let mut h = Harness::new();
    h.step(Some(Point2D::new(10.0, 700.0)));
    assert!(h.kiosk.flow().is_display_enabled());

    // Gone for four seconds: within the grace period
    for _ in 0..4 {
        h.step(None);
    }
    assert!(h.kiosk.flow().is_display_enabled());

    // Past the grace period
    for _ in 0..2 {
        h.step(None);
    }
    assert!(!h.kiosk.flow().is_display_enabled());

    // Back again: shown immediately
    let frame = h.step(Some(Point2D::new(10.0, 700.0)));
    assert!(!frame.idle);
}

#[test]
fn test_survey_wraps_after_last_question() {
    let mut h = Harness::new();
    let accept = h.kiosk.layout().accept_center();

    // The hand never leaves "Yes": each answer moves the cursor on and the
    // presence policy brings the next question up on a later tick
    for _ in 0..3 {
        let before = h.submitter.answers().len();
        let mut ticks = 0;
        while h.submitter.answers().len() == before {
            h.step(Some(accept));
            ticks += 1;
            assert!(ticks <= 5);
        }
    }

    let ids: Vec<i64> = h.submitter.answers().iter().map(|a| a.question_id).collect();
    assert_eq!(ids, vec![2, 4, 2]);
}

#[test]
fn test_lost_visitor_is_forgotten() {
    let mut h = Harness::new();
    h.step(Some(Point2D::new(10.0, 700.0)));
    assert_eq!(h.kiosk.hands().len(), 1);

    h.feed.publish(SensorEvent::Lost { entity_id: 1 });
    let frame = h.step(None);
    assert!(h.kiosk.hands().is_empty());
    assert!(frame.hands.is_empty());
}

#[test]
fn test_unreported_hand_cannot_vote() {
    let mut h = Harness::new();
    let y = h.kiosk.layout().accept_center().y;
    let rest = Point2D::new(10.0, 700.0);

    // Left hand seen twice, drifting right towards "Yes"
    for x in [200.0, 300.0] {
        h.elapsed += STEP;
        let now = h.now();
        h.feed.publish(SensorEvent::Sample(
            BodySample::new(1, now)
                .with_left(Point2D::new(x, y))
                .with_right(rest),
        ));
        h.kiosk.tick(now);
    }

    // From here on only the right hand is reported, away from both targets
    let mut frame = h.step(Some(rest));
    for _ in 0..20 {
        frame = h.step(Some(rest));
    }

    assert!(h.submitter.answers().is_empty());
    assert_eq!(frame.hands.len(), 1);
    assert_eq!(frame.hands[0].point, rest);
    assert_eq!(h.kiosk.hands().len(), 1);
}
