use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseAction {
    Message,
    Welcome,
    Exit,
}

/// One outbound chat line.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseRecord {
    pub action: ResponseAction,
    pub message: String,
}

impl ResponseRecord {
    pub fn message(message: impl Into<String>) -> Self {
        ResponseRecord {
            action: ResponseAction::Message,
            message: message.into(),
        }
    }

    pub fn welcome() -> Self {
        ResponseRecord {
            action: ResponseAction::Welcome,
            message: "Hello, I'm your music bot. How can I help you?".to_string(),
        }
    }

    pub fn goodbye() -> Self {
        ResponseRecord {
            action: ResponseAction::Exit,
            message: "It was nice talking to you. Bye".to_string(),
        }
    }
}

/// Records produced by a single turn, drained in the order they were
/// pushed.
#[derive(Debug, Default)]
pub struct ResponseQueue {
    records: Vec<ResponseRecord>,
}

impl ResponseQueue {
    pub fn push(&mut self, message: impl Into<String>) {
        self.records.push(ResponseRecord::message(message));
    }

    pub fn push_record(&mut self, record: ResponseRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ResponseRecord> {
        self.records
    }
}
