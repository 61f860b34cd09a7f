use super::types::{Classification, ClassifierError, IntentClassifier};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// Answers from a fixed table keyed by the exact message text. Unknown
/// text gets an empty, zero-confidence classification. Used to drive the
/// engine deterministically without an NLU server.
#[derive(Debug, Default)]
pub struct ScriptedClassifier {
    answers: RwLock<HashMap<String, Classification>>,
    failing: RwLock<bool>,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, text: &str, classification: Classification) -> Self {
        self.insert(text, classification);
        self
    }

    pub fn insert(&self, text: &str, classification: Classification) {
        if let Ok(mut answers) = self.answers.write() {
            answers.insert(text.to_string(), classification);
        }
    }

    /// Makes every following call fail as if the service were unreachable.
    pub fn set_failing(&self, failing: bool) {
        if let Ok(mut flag) = self.failing.write() {
            *flag = failing;
        }
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        if self.failing.read().map(|f| *f).unwrap_or(false) {
            return Err(ClassifierError::Connection("scripted failure".to_string()));
        }
        let answers = self
            .answers
            .read()
            .map_err(|_| ClassifierError::Connection("script lock poisoned".to_string()))?;
        Ok(answers.get(text).cloned().unwrap_or_default())
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
