use async_trait::async_trait;
use dwell_survey_config::RemoteConfig;
use dwell_survey_core::{QuestionRecord, QuestionSource};
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{RemoteError, Result};
use crate::payload::parse_questions;
use crate::join_url;

/// Loads the survey questions from the backend
#[derive(Debug, Clone)]
pub struct HttpQuestionSource {
    client: Client,
    url: String,
}

impl HttpQuestionSource {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(client: Client, config: &RemoteConfig) -> Result<Self> {
        let base = config.base_url.as_deref().ok_or(RemoteError::NotConfigured)?;
        Ok(Self::new(client, join_url(base, &config.questions_path)))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub async fn fetch(&self) -> Result<Vec<QuestionRecord>> {
        debug!(url = %self.url, "Fetching questions");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| RemoteError::Request {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        let document: Value = response.json().await.map_err(|source| RemoteError::Request {
            url: self.url.clone(),
            source,
        })?;

        let records = parse_questions(&document).map_err(|reason| RemoteError::Payload {
            url: self.url.clone(),
            reason,
        })?;

        info!(count = records.len(), url = %self.url, "Questions loaded");
        Ok(records)
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch_questions(&self) -> anyhow::Result<Vec<QuestionRecord>> {
        Ok(self.fetch().await?)
    }
}
