use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Errors that can occur when talking to the classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request timed out")]
    Timeout,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedIntent {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub confidence: f64,
}

/// A typed value extracted from the text, e.g. `song = "Thriller"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "entity")]
    pub kind: String,
    #[serde(deserialize_with = "value_as_string")]
    pub value: String,
}

impl Entity {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Entity {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// Extractors may emit numbers or booleans; the engine works on text.
fn value_as_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    })
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub intent: ClassifiedIntent,
    #[serde(default)]
    pub entities: Vec<Entity>,
}

impl Classification {
    pub fn new(intent: &str, confidence: f64, entities: Vec<Entity>) -> Self {
        Classification {
            intent: ClassifiedIntent {
                name: Some(intent.to_string()),
                confidence,
            },
            entities,
        }
    }

    pub fn intent_name(&self) -> Option<&str> {
        self.intent.name.as_deref()
    }

    pub fn confidence(&self) -> f64 {
        self.intent.confidence
    }

    /// First entity of the given type.
    pub fn entity(&self, kind: &str) -> Option<&str> {
        self.entities
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.value.trim())
            .filter(|v| !v.is_empty())
    }

    /// Every entity of the given type, in extraction order.
    pub fn entities_of(&self, kind: &str) -> Vec<&str> {
        self.entities
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| e.value.trim())
            .filter(|v| !v.is_empty())
            .collect()
    }
}

#[async_trait]
pub trait IntentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError>;

    /// Human-readable backend name, for logs.
    fn name(&self) -> &str;
}
