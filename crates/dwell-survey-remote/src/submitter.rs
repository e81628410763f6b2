use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dwell_survey_config::RemoteConfig;
use dwell_survey_core::{Answer, AnswerSubmitter};
use reqwest::Client;
use tokio::runtime::Handle;
use tracing::{debug, warn};

use crate::error::{RemoteError, Result};
use crate::join_url;
use crate::payload::AnswerPayload;

/// Delivery counters, for logs and diagnostics only
#[derive(Debug, Default)]
pub struct SubmissionStats {
    submitted: AtomicU64,
    acknowledged: AtomicU64,
    failed: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub submitted: u64,
    pub acknowledged: u64,
    pub failed: u64,
}

impl StatsSnapshot {
    /// Deliveries still in flight
    pub fn pending(&self) -> u64 {
        self.submitted
            .saturating_sub(self.acknowledged + self.failed)
    }
}

impl SubmissionStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            submitted: self.submitted.load(Ordering::Relaxed),
            acknowledged: self.acknowledged.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }
}

/// Posts each answer on the runtime and returns immediately.
///
/// There is no retry and no timeout beyond the client's own; pending posts
/// are dropped when the runtime shuts down.
#[derive(Debug, Clone)]
pub struct HttpAnswerSubmitter {
    client: Client,
    url: Arc<str>,
    runtime: Handle,
    stats: Arc<SubmissionStats>,
}

impl HttpAnswerSubmitter {
    pub fn new(client: Client, url: impl Into<String>, runtime: Handle) -> Self {
        Self {
            client,
            url: Arc::from(url.into()),
            runtime,
            stats: Arc::new(SubmissionStats::default()),
        }
    }

    pub fn from_config(client: Client, config: &RemoteConfig, runtime: Handle) -> Result<Self> {
        let base = config.base_url.as_deref().ok_or(RemoteError::NotConfigured)?;
        Ok(Self::new(client, join_url(base, &config.answers_path), runtime))
    }

    pub fn stats(&self) -> Arc<SubmissionStats> {
        self.stats.clone()
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl AnswerSubmitter for HttpAnswerSubmitter {
    fn submit(&self, answer: Answer) {
        self.stats.submitted.fetch_add(1, Ordering::Relaxed);

        let client = self.client.clone();
        let url = self.url.clone();
        let stats = self.stats.clone();
        let payload = AnswerPayload::from(answer);

        self.runtime.spawn(async move {
            match client.post(&*url).json(&payload).send().await {
                Ok(response) if response.status().is_success() => {
                    stats.acknowledged.fetch_add(1, Ordering::Relaxed);
                    debug!(
                        question = answer.question_id,
                        status = response.status().as_u16(),
                        "Answer delivered"
                    );
                }
                Ok(response) => {
                    stats.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        question = answer.question_id,
                        status = response.status().as_u16(),
                        "Answer rejected by server"
                    );
                }
                Err(e) => {
                    stats.failed.fetch_add(1, Ordering::Relaxed);
                    warn!(question = answer.question_id, "Failed to deliver answer: {}", e);
                }
            }
        });
    }
}
