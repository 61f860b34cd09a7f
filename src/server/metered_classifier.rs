use crate::classifier::{Classification, ClassifierError, IntentClassifier};
use crate::server::metrics::record_classifier_latency;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Records the latency of every classification, failed ones included.
pub struct MeteredClassifier {
    inner: Arc<dyn IntentClassifier>,
}

impl MeteredClassifier {
    pub fn new(inner: Arc<dyn IntentClassifier>) -> Self {
        MeteredClassifier { inner }
    }
}

#[async_trait]
impl IntentClassifier for MeteredClassifier {
    async fn classify(&self, text: &str) -> Result<Classification, ClassifierError> {
        let start = Instant::now();
        let result = self.inner.classify(text).await;
        record_classifier_latency(start.elapsed());
        if let Err(err) = &result {
            warn!("Classifier '{}' failed: {}", self.inner.name(), err);
        }
        result
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
