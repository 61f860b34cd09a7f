use super::RequestsLoggingLevel;
use crate::dialogue::DialogueSettings;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub requests_logging_level: RequestsLoggingLevel,
    pub port: u16,
    pub metrics_port: u16,
    pub frontend_dir_path: Option<String>,
    /// Settings handed to the dialogue engine of every chat session.
    pub dialogue: DialogueSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            requests_logging_level: RequestsLoggingLevel::Path,
            port: 3002,
            metrics_port: 9092,
            frontend_dir_path: None,
            dialogue: DialogueSettings::default(),
        }
    }
}
