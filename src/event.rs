//! Log event model shipped to the ingestion endpoint.
//!
//! The wire body is a JSON array of [`LogEvent`]s. The shipper always sends
//! a one-element array.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Field key carrying the environment tag.
pub const ENV_FIELD: &str = "env";

/// Field key carrying the severity level.
pub const LEVEL_FIELD: &str = "level";

/// Log severity levels, named the way the ingestion side expects them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Lowercase name used in the `level` field.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => LogLevel::Trace,
            tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warn,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

/// One unit of work for the sender loop.
///
/// Fields are private so an event cannot change once it has been queued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Tags attached to the message (at least `env` and `level`)
    fields: HashMap<String, String>,

    /// Rendered messages, currently always exactly one
    messages: Vec<String>,
}

impl LogEvent {
    /// Create an event tagged with `environment` and `level`.
    pub fn new(environment: impl Into<String>, level: LogLevel, message: impl Into<String>) -> Self {
        let mut fields = HashMap::with_capacity(2);
        fields.insert(ENV_FIELD.to_string(), environment.into());
        fields.insert(LEVEL_FIELD.to_string(), level.as_str().to_string());

        Self {
            fields,
            messages: vec![message.into()],
        }
    }

    pub fn fields(&self) -> &HashMap<String, String> {
        &self.fields
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// The `env` tag, if present.
    pub fn environment(&self) -> Option<&str> {
        self.fields.get(ENV_FIELD).map(String::as_str)
    }

    /// The `level` tag, if present.
    pub fn level(&self) -> Option<&str> {
        self.fields.get(LEVEL_FIELD).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_level_names() {
        let levels = [
            (tracing::Level::TRACE, "trace"),
            (tracing::Level::DEBUG, "debug"),
            (tracing::Level::INFO, "info"),
            (tracing::Level::WARN, "warn"),
            (tracing::Level::ERROR, "error"),
        ];

        for (level, name) in levels {
            let level = LogLevel::from(level);
            assert_eq!(level.as_str(), name);
            assert_eq!(level.to_string(), name);
        }
    }

    #[test]
    fn test_level_from_tracing() {
        assert_eq!(LogLevel::from(tracing::Level::INFO), LogLevel::Info);
        assert_eq!(LogLevel::from(tracing::Level::ERROR), LogLevel::Error);
        assert_eq!(LogLevel::from(tracing::Level::TRACE), LogLevel::Trace);
    }

    #[test]
    fn test_new_event_fields() {
        let event = LogEvent::new("test", LogLevel::Warn, "disk almost full");

        assert_eq!(event.fields().len(), 2);
        assert_eq!(event.environment(), Some("test"));
        assert_eq!(event.level(), Some("warn"));
        assert_eq!(event.messages(), ["disk almost full".to_string()]);
    }

    #[test]
    fn test_batch_wire_shape() {
        let event = LogEvent::new("prod", LogLevel::Info, "test 1");
        let body = serde_json::to_value(std::slice::from_ref(&event)).unwrap();

        assert_eq!(
            body,
            json!([{
                "fields": {"env": "prod", "level": "info"},
                "messages": ["test 1"]
            }])
        );
    }

    #[test]
    fn test_decoded_body_matches_event() {
        let event = LogEvent::new("staging", LogLevel::Error, "quote \" and unicode é");
        let body = serde_json::to_string(&[event.clone()]).unwrap();

        let decoded: Vec<LogEvent> = serde_json::from_str(&body).unwrap();
        assert_eq!(decoded, vec![event]);
    }

    #[test]
    fn test_empty_environment_is_kept() {
        let event = LogEvent::new("", LogLevel::Debug, "");
        assert_eq!(event.environment(), Some(""));
        assert_eq!(event.messages(), ["".to_string()]);
    }
}
