//! dwell-survey-app: terminal kiosk runner
//!
//! Wires the interaction core to its collaborators:
//! - questions from the survey backend, or the built-in list
//! - answers posted to the backend, or logged when offline
//! - a keyboard visitor and terminal renderer, or a scripted visitor when
//!   headless
//!
//! The kiosk is ticked by the frame pacer on a dedicated thread. A tokio
//! runtime carries the HTTP traffic.

pub mod cli;
pub mod logging;
pub mod renderer;
pub mod simulator;
pub mod visitor;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use dwell_survey_config::KioskConfig;
use dwell_survey_core::{
    Answer, AnswerSubmitter, FramePacer, Kiosk, KioskSettings, Layout, PacerSettings,
    QuestionRecord, QuestionSource, SceneFrame, SensorFeed, SensorInbox,
};
use dwell_survey_remote::{HttpAnswerSubmitter, HttpQuestionSource, SubmissionStats};
use tokio::runtime::Runtime;
use tracing::{error, info, warn};

use cli::Cli;
use renderer::TerminalRenderer;
use simulator::KeyboardVisitor;
use visitor::ScriptedVisitor;

const INPUT_POLL: Duration = Duration::from_millis(30);

/// Answer sink used when no backend is reachable
#[derive(Debug, Default)]
pub struct LoggedAnswers;

impl AnswerSubmitter for LoggedAnswers {
    fn submit(&self, answer: Answer) {
        info!(
            question = answer.question_id,
            value = answer.value,
            "Answer recorded locally"
        );
    }
}

/// The configured fallback questions
pub fn builtin_questions(config: &KioskConfig) -> Vec<QuestionRecord> {
    config
        .questions
        .iter()
        .map(|q| QuestionRecord::new(q.id, q.text.clone()).with_font_size(q.font_size))
        .collect()
}

/// Questions from the backend when reachable, the built-in list otherwise
pub fn load_questions(
    runtime: &Runtime,
    source: Option<&dyn QuestionSource>,
    config: &KioskConfig,
) -> Vec<QuestionRecord> {
    let Some(source) = source else {
        info!("No question source configured, using built-in questions");
        return builtin_questions(config);
    };

    match runtime.block_on(source.fetch_questions()) {
        Ok(records) if !records.is_empty() => records,
        Ok(_) => {
            warn!("Question source returned no questions, using built-in questions");
            builtin_questions(config)
        }
        Err(e) => {
            warn!("Failed to load questions, using built-in questions: {:#}", e);
            builtin_questions(config)
        }
    }
}

/// Kiosk plus the collaborators that outlive it
struct Session {
    kiosk: Kiosk,
    feed: SensorFeed,
    stats: Option<Arc<SubmissionStats>>,
}

fn build_session(cli: &Cli, config: &KioskConfig, runtime: &Runtime) -> Result<Session> {
    let layout = Layout::new(config.display.width, config.display.height)
        .context("Invalid display size")?
        .with_anchors(&config.dwell);

    let online = !cli.offline && config.remote.base_url.is_some();
    let client = reqwest::Client::new();

    let source = if online {
        Some(HttpQuestionSource::from_config(client.clone(), &config.remote)?)
    } else {
        None
    };
    let questions = load_questions(
        runtime,
        source.as_ref().map(|s| s as &dyn QuestionSource),
        config,
    );

    let (submitter, stats): (Arc<dyn AnswerSubmitter>, _) = if online {
        let http = HttpAnswerSubmitter::from_config(client, &config.remote, runtime.handle().clone())?;
        info!(url = http.url(), "Posting answers to backend");
        let stats = http.stats();
        (Arc::new(http), Some(stats))
    } else {
        (Arc::new(LoggedAnswers), None)
    };

    let (feed, inbox) = SensorInbox::channel();
    let kiosk = Kiosk::new(
        layout,
        &questions,
        KioskSettings::from(config),
        inbox,
        submitter,
    )?;

    Ok(Session { kiosk, feed, stats })
}

/// Entry point shared by the binary
pub fn run(cli: Cli) -> Result<()> {
    let config = KioskConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let target = logging::LogTarget::for_mode(&config.logging, cli.headless);
    logging::init(&config.logging, &target, cli.verbose)?;
    info!("dwell-survey v{} starting", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    let session = build_session(&cli, &config, &runtime)?;
    let pacer = FramePacer::new(PacerSettings::from(&config.pacer));

    let result = if cli.headless {
        run_headless(session.kiosk, session.feed, pacer, cli.ticks)
    } else {
        run_terminal(session.kiosk, session.feed, pacer)
    };

    if let Some(stats) = &session.stats {
        let snapshot = stats.snapshot();
        info!(
            submitted = snapshot.submitted,
            acknowledged = snapshot.acknowledged,
            failed = snapshot.failed,
            pending = snapshot.pending(),
            "Answer delivery summary"
        );
    }

    // In-flight submissions are abandoned
    runtime.shutdown_background();
    result
}

/// Tick the kiosk `ticks` times against the scripted visitor
fn run_headless(mut kiosk: Kiosk, feed: SensorFeed, mut pacer: FramePacer, ticks: u64) -> Result<()> {
    let running = AtomicBool::new(true);
    let mut visitor = ScriptedVisitor::new(*kiosk.layout());
    let started = Instant::now();
    let mut was_idle = true;

    pacer.run(&running, |now| {
        if let Some(event) = visitor.event_at(now.saturating_duration_since(started), now) {
            feed.publish(event);
        }

        let frame = kiosk.tick(now);
        if frame.idle != was_idle {
            was_idle = frame.idle;
            info!(
                idle = frame.idle,
                question = frame.prompt.as_ref().map(|p| p.text.as_str()).unwrap_or(""),
                "Display changed"
            );
        }

        if kiosk.tick_count() >= ticks {
            running.store(false, Ordering::Release);
        }
    });

    info!(
        ticks = kiosk.tick_count(),
        answers = kiosk.answer_count(),
        "Headless run finished"
    );
    Ok(())
}

/// Interactive run: keyboard on this thread, kiosk and drawing on the pacer thread
fn run_terminal(mut kiosk: Kiosk, feed: SensorFeed, mut pacer: FramePacer) -> Result<()> {
    let renderer = TerminalRenderer::enter().context("Failed to set up terminal")?;
    let renderer = Arc::new(Mutex::new(Some(renderer)));
    let running = Arc::new(AtomicBool::new(true));
    let mut visitor = KeyboardVisitor::new(*kiosk.layout());

    let update = {
        let running = running.clone();
        let renderer = renderer.clone();
        thread::Builder::new()
            .name("kiosk-update".to_string())
            .spawn(move || {
                pacer.run(&running, |now| {
                    let frame = kiosk.tick(now);
                    if let Err(e) = draw(&renderer, &frame) {
                        error!("Render failed: {}", e);
                        running.store(false, Ordering::Release);
                    }
                });
            })
            .context("Failed to spawn update thread")?
    };

    let input = input_loop(&running, &feed, &mut visitor);
    running.store(false, Ordering::Release);

    if update.join().is_err() {
        error!("Update thread panicked");
    }

    let renderer = renderer
        .lock()
        .map_err(|_| anyhow::anyhow!("Renderer lock poisoned"))?
        .take();
    if let Some(renderer) = renderer {
        renderer.leave().context("Failed to restore terminal")?;
    }

    input
}

fn draw(renderer: &Mutex<Option<TerminalRenderer>>, frame: &SceneFrame) -> std::io::Result<()> {
    match renderer.lock() {
        Ok(mut guard) => match guard.as_mut() {
            Some(renderer) => renderer.draw(frame),
            None => Ok(()),
        },
        Err(_) => Err(std::io::Error::other("renderer lock poisoned")),
    }
}

fn input_loop(running: &AtomicBool, feed: &SensorFeed, visitor: &mut KeyboardVisitor) -> Result<()> {
    while running.load(Ordering::Acquire) {
        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                let quit = matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
                    || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL));
                if quit {
                    info!("Quit requested");
                    break;
                }
                if let Some(event) = visitor.process_key(key, Instant::now()) {
                    feed.publish(event);
                }
            }
        }

        // A still hand is still a hand
        if let Some(event) = visitor.sample(Instant::now()) {
            feed.publish(event);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwell_survey_core::StaticQuestionSource;

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .unwrap()
    }

    struct FailingSource;

    #[async_trait::async_trait]
    impl QuestionSource for FailingSource {
        async fn fetch_questions(&self) -> anyhow::Result<Vec<QuestionRecord>> {
            anyhow::bail!("backend down")
        }
    }

    #[test]
    fn test_builtin_questions_keep_font_size() {
        let records = builtin_questions(&KioskConfig::default());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 2);
        assert_eq!(records[1].id, 4);
        assert_eq!(records[0].font_size, Some(40.0));
    }

    #[test]
    fn test_remote_questions_preferred() {
        let source = StaticQuestionSource::new(vec![QuestionRecord::new(9, "Remote?")]);
        let records = load_questions(&runtime(), Some(&source), &KioskConfig::default());
        assert_eq!(records, vec![QuestionRecord::new(9, "Remote?")]);
    }

    #[test]
    fn test_fallback_on_failure_or_empty() {
        let config = KioskConfig::default();
        let rt = runtime();

        let records = load_questions(&rt, Some(&FailingSource), &config);
        assert_eq!(records, builtin_questions(&config));

        let empty = StaticQuestionSource::new(Vec::new());
        let records = load_questions(&rt, Some(&empty), &config);
        assert_eq!(records, builtin_questions(&config));

        assert_eq!(load_questions(&rt, None, &config), builtin_questions(&config));
    }

    #[test]
    fn test_offline_session_uses_builtin_questions() {
        let cli = Cli {
            config: None,
            headless: true,
            ticks: 10,
            offline: true,
            verbose: false,
        };
        let session = build_session(&cli, &KioskConfig::default(), &runtime()).unwrap();
        assert!(session.stats.is_none());
        assert_eq!(session.kiosk.flow().len(), 2);
    }
}
