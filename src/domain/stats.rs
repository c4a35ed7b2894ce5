//! Aggregate community statistics shown on the dashboard.
//!
//! The counters are illustrative only. Nothing in the panel derives them from
//! the moderation log; they are whatever the shared stats document holds.

use super::document::{self, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Shown when the stats document has no upcoming event.
pub const NO_EVENT: &str = "N/A";

/// Snapshot of the shared stats document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub total_users: i64,
    pub active_bans: i64,
    pub daily_reports: i64,
    pub next_event: String,
}

impl StatsSnapshot {
    /// Values written when the stats document does not exist yet.
    #[must_use]
    pub fn seed() -> Self {
        Self {
            total_users: 1000,
            active_bans: 5,
            daily_reports: 42,
            next_event: "Community Tag".to_string(),
        }
    }

    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("totalUsers".into(), Value::from(self.total_users));
        doc.insert("activeBans".into(), Value::from(self.active_bans));
        doc.insert("dailyReports".into(), Value::from(self.daily_reports));
        doc.insert("nextEvent".into(), Value::from(self.next_event.clone()));
        doc
    }

    /// Decodes the stats document; missing counters read as zero.
    #[must_use]
    pub fn from_document(doc: &Document) -> Self {
        Self {
            total_users: document::int_field(doc, "totalUsers").unwrap_or(0),
            active_bans: document::int_field(doc, "activeBans").unwrap_or(0),
            daily_reports: document::int_field(doc, "dailyReports").unwrap_or(0),
            next_event: document::str_field(doc, "nextEvent")
                .filter(|e| !e.is_empty())
                .unwrap_or(NO_EVENT)
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn partial_document_defaults() {
        let doc = json!({ "activeBans": 9 });
        let stats = StatsSnapshot::from_document(doc.as_object().unwrap());
        assert_eq!(stats.total_users, 0);
        assert_eq!(stats.active_bans, 9);
        assert_eq!(stats.next_event, NO_EVENT);
    }

    #[test]
    fn seed_document_has_every_field() {
        let doc = StatsSnapshot::seed().to_document();
        assert_eq!(doc.len(), 4);
        assert_eq!(StatsSnapshot::from_document(&doc), StatsSnapshot::seed());
    }
}
