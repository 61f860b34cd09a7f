//! Client for a Rasa-compatible NLU server (`POST /model/parse`).

use super::types::{Classification, ClassifierError, IntentClassifier};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct ParseRequest<'a> {
    text: &'a str,
}

pub struct RasaClassifier {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl RasaClassifier {
    /// # Arguments
    /// * `base_url` - Root URL of the NLU server (e.g., "http://localhost:5005").
    /// * `timeout` - Per-request timeout.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout,
        }
    }
}

#[async_trait]
impl IntentClassifier for RasaClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        let url = format!("{}/model/parse", self.base_url);
        debug!(url = %url, text_len = text.len(), "Sending text to classifier");

        let response = self
            .client
            .post(&url)
            .json(&ParseRequest { text })
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ClassifierError::Timeout
                } else {
                    ClassifierError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let classification: Classification = response.json().await.map_err(|e| {
            ClassifierError::InvalidResponse(format!("Failed to parse classifier response: {}", e))
        })?;

        debug!(
            intent = ?classification.intent_name(),
            confidence = classification.confidence(),
            entities = classification.entities.len(),
            "Classifier response"
        );
        Ok(classification)
    }

    fn name(&self) -> &str {
        "rasa"
    }
}
