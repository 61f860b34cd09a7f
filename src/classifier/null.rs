use super::types::{Classification, ClassifierError, IntentClassifier};
use async_trait::async_trait;

/// Used when no classifier is configured: every free-text message comes
/// back with zero confidence, so only slash commands do anything.
#[derive(Debug, Default)]
pub struct NullClassifier;

#[async_trait]
impl IntentClassifier for NullClassifier {
    async fn classify(&self, _text: &str) -> Result<Classification, ClassifierError> {
        Ok(Classification::default())
    }

    fn name(&self) -> &str {
        "null"
    }
}
