//! Moderation log records.
//!
//! A [`LogRecord`] is one line of the shared moderation log: who did what to
//! whom, and how severe it is. Records are append-only. The timestamp is never
//! taken from the local clock; it stays `None` until the store materialises
//! its own time for the record.

use super::document::{self, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Target placeholder for records that are not about a player.
pub const NO_TARGET: &str = "N/A";

/// Author name used for records written on behalf of the panel itself.
pub const SYSTEM_AUTHOR: &str = "System";

/// Severity / category of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Warn,
    Error,
    System,
}

impl LogKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::System => "system",
        }
    }

    /// Parses a stored kind; anything unrecognised reads as `Info`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "warn" => Self::Warn,
            "error" => Self::Error,
            "system" => Self::System,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Store-assigned time, in milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ServerTime(i64);

impl ServerTime {
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    #[must_use]
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// Wall-clock rendering as `HH:MM:SS` (UTC).
    #[must_use]
    pub fn clock(self) -> String {
        chrono::DateTime::from_timestamp_millis(self.0).map_or_else(
            || "--:--:--".to_string(),
            |dt| dt.format("%H:%M:%S").to_string(),
        )
    }
}

/// One entry of the shared moderation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// `None` until the store has assigned its time.
    pub timestamp: Option<ServerTime>,
    pub admin_identity: String,
    pub admin_name: String,
    pub action: String,
    pub target_user: String,
    pub kind: LogKind,
}

impl LogRecord {
    /// Creates an unstamped record with no target.
    pub fn new(
        admin_identity: impl Into<String>,
        admin_name: impl Into<String>,
        action: impl Into<String>,
        kind: LogKind,
    ) -> Self {
        Self {
            timestamp: None,
            admin_identity: admin_identity.into(),
            admin_name: admin_name.into(),
            action: action.into(),
            target_user: NO_TARGET.to_string(),
            kind,
        }
    }

    #[must_use]
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target_user = target.into();
        self
    }

    /// Name shown for the author: the admin name, else the raw identity.
    #[must_use]
    pub fn author(&self) -> &str {
        if self.admin_name.is_empty() {
            &self.admin_identity
        } else {
            &self.admin_name
        }
    }

    /// The target player, if the record has one.
    #[must_use]
    pub fn target(&self) -> Option<&str> {
        let target = self.target_user.as_str();
        (!target.is_empty() && target != NO_TARGET).then_some(target)
    }

    /// Time used for ordering; unstamped records count as the epoch.
    #[must_use]
    pub fn sort_millis(&self) -> i64 {
        self.timestamp.map_or(0, ServerTime::millis)
    }

    /// Display time, or `--:--:--` while the record is unstamped.
    #[must_use]
    pub fn clock(&self) -> String {
        self.timestamp
            .map_or_else(|| "--:--:--".to_string(), ServerTime::clock)
    }

    /// Encodes the record for appending, asking the store to stamp it.
    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("timestamp".into(), document::server_timestamp());
        doc.insert("adminId".into(), Value::from(self.admin_identity.clone()));
        doc.insert("adminName".into(), Value::from(self.admin_name.clone()));
        doc.insert("action".into(), Value::from(self.action.clone()));
        doc.insert("targetUser".into(), Value::from(self.target_user.clone()));
        doc.insert("type".into(), Value::from(self.kind.as_str()));
        doc
    }

    /// Decodes a stored document, defaulting anything missing or mistyped.
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        let text = |key: &str| document::str_field(doc, key).unwrap_or_default().to_string();

        let target_user = document::str_field(doc, "targetUser")
            .filter(|t| !t.is_empty())
            .unwrap_or(NO_TARGET)
            .to_string();

        Self {
            timestamp: document::int_field(doc, "timestamp").map(ServerTime::from_millis),
            admin_identity: text("adminId"),
            admin_name: text("adminName"),
            action: text("action"),
            target_user,
            kind: document::str_field(doc, "type").map_or(LogKind::Info, LogKind::parse),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn document_asks_store_for_timestamp() {
        let record = LogRecord::new("uid-1", "Steve", "BAN against Alex", LogKind::Error)
            .with_target("Alex");
        let doc = record.to_document();

        assert!(document::is_server_timestamp(&doc["timestamp"]));
        assert_eq!(doc["adminId"], "uid-1");
        assert_eq!(doc["targetUser"], "Alex");
        assert_eq!(doc["type"], "error");
    }

    #[test]
    fn decoding_defaults_untrusted_fields() {
        let doc = json!({ "adminId": "uid-9", "action": 3, "type": "loud", "timestamp": "soon" });
        let record = LogRecord::from_document(doc.as_object().unwrap());

        assert_eq!(record.timestamp, None);
        assert_eq!(record.action, "");
        assert_eq!(record.kind, LogKind::Info);
        assert_eq!(record.target_user, NO_TARGET);
        assert_eq!(record.author(), "uid-9");
        assert_eq!(record.target(), None);
    }

    #[test]
    fn decodes_stamped_document() {
        let doc = json!({
            "timestamp": 1_700_000_000_000_i64,
            "adminId": "uid-1",
            "adminName": "Steve",
            "action": "KICK against Alex",
            "targetUser": "Alex",
            "type": "warn",
        });
        let record = LogRecord::from_document(doc.as_object().unwrap());

        assert_eq!(record.sort_millis(), 1_700_000_000_000);
        assert_eq!(record.kind, LogKind::Warn);
        assert_eq!(record.target(), Some("Alex"));
        assert_eq!(record.clock(), "22:13:20");
    }

    #[test]
    fn unstamped_record_shows_placeholder_clock() {
        let record = LogRecord::new("uid", "", "hello", LogKind::Info);
        assert_eq!(record.clock(), "--:--:--");
        assert_eq!(record.sort_millis(), 0);
    }
}
