//! Wire types for client-side log reporting.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warning")]
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Client log entry received from the site or the admin console
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientLogEntry {
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub level: LogLevel,
    pub message: String,
    /// Page the entry was raised on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Batch of client logs
#[derive(Debug, Deserialize, Serialize)]
pub struct ClientLogBatch {
    pub logs: Vec<ClientLogEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LogResponse {
    pub success: bool,
    pub received: usize,
    pub processed: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_defaults_and_warning_alias() {
        let entry: ClientLogEntry =
            serde_json::from_str(r#"{"level":"warning","message":"slow image"}"#).unwrap();
        assert_eq!(entry.level, LogLevel::Warn);
        assert!(entry.timestamp.is_empty());

        let entry: ClientLogEntry = serde_json::from_str(r#"{"message":"hi"}"#).unwrap();
        assert_eq!(entry.level, LogLevel::Info);
    }
}
