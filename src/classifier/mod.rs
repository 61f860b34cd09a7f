//! Intent classifier abstraction.
//!
//! Free text is sent to an external NLU service that answers with an
//! intent name, a confidence and typed entities. The engine only sees the
//! [`IntentClassifier`] trait.

mod null;
mod rasa;
mod scripted;
mod types;

pub use null::NullClassifier;
pub use rasa::RasaClassifier;
pub use scripted::ScriptedClassifier;
pub use types::{Classification, ClassifiedIntent, ClassifierError, Entity, IntentClassifier};
