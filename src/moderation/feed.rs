//! Log Feed Projector: a live, ordered, bounded view of the moderation log.
//!
//! The store makes no ordering promise, so every delivery is decoded, sorted
//! newest-first by server time and truncated to the window. The whole window
//! is rebuilt on each delivery; nothing is patched incrementally.

use crate::domain::{Document, LogRecord};

/// Default window size.
pub const DEFAULT_FEED_LIMIT: usize = 50;

/// Ordered window over the most recent log records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogFeedProjector {
    limit: usize,
    records: Vec<LogRecord>,
    active: bool,
}

impl Default for LogFeedProjector {
    fn default() -> Self {
        Self::new(DEFAULT_FEED_LIMIT)
    }
}

impl LogFeedProjector {
    /// Creates an inactive projector. A zero `limit` falls back to the default.
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit: if limit == 0 { DEFAULT_FEED_LIMIT } else { limit },
            records: Vec::new(),
            active: false,
        }
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Marks the projector subscribed. Returns `false` if it already was,
    /// in which case no new upstream subscription should be opened.
    pub fn subscribe(&mut self) -> bool {
        !std::mem::replace(&mut self.active, true)
    }

    /// Stops accepting deliveries. The last window stays visible.
    pub fn unsubscribe(&mut self) {
        self.active = false;
    }

    /// Rebuilds the window from an upstream delivery.
    ///
    /// Deliveries after [`unsubscribe`](Self::unsubscribe) are ignored.
    /// Returns `true` if the visible window changed.
    pub fn apply(&mut self, documents: &[Document]) -> bool {
        if !self.active {
            tracing::debug!(count = documents.len(), "ignoring delivery while unsubscribed");
            return false;
        }

        let records: Vec<LogRecord> = documents.iter().map(LogRecord::from_document).collect();
        let window = project(records, self.limit);

        if window == self.records {
            return false;
        }

        tracing::debug!(visible = window.len(), delivered = documents.len(), "log feed updated");
        self.records = window;
        true
    }

    /// Visible records, newest first.
    #[must_use]
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }
}

/// Orders records newest-first and keeps at most `limit` of them.
///
/// Unstamped records count as the epoch and therefore sort last. The sort is
/// stable, so equal timestamps keep their delivery order.
#[must_use]
pub fn project(mut records: Vec<LogRecord>, limit: usize) -> Vec<LogRecord> {
    records.sort_by_key(|r| std::cmp::Reverse(r.sort_millis()));
    records.truncate(limit);
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(ts: Option<i64>, action: &str) -> Document {
        let mut value = json!({ "adminId": "uid", "action": action, "type": "info" });
        if let Some(ts) = ts {
            value["timestamp"] = json!(ts);
        }
        value.as_object().cloned().unwrap_or_default()
    }

    fn actions(feed: &LogFeedProjector) -> Vec<&str> {
        feed.records().iter().map(|r| r.action.as_str()).collect()
    }

    #[test]
    fn orders_newest_first_with_unstamped_last() {
        let mut feed = LogFeedProjector::default();
        feed.subscribe();
        feed.apply(&[doc(None, "pending"), doc(Some(50), "older"), doc(Some(100), "newer")]);
        assert_eq!(actions(&feed), vec!["newer", "older", "pending"]);
    }

    #[test]
    fn keeps_only_the_most_recent_window() {
        let mut feed = LogFeedProjector::default();
        feed.subscribe();
        let docs: Vec<Document> = (0..75).map(|i| doc(Some(i), &format!("a{i}"))).collect();
        feed.apply(&docs);

        assert_eq!(feed.records().len(), DEFAULT_FEED_LIMIT);
        assert_eq!(feed.records()[0].sort_millis(), 74);
        assert_eq!(feed.records()[49].sort_millis(), 25);
    }

    #[test]
    fn ignores_deliveries_after_unsubscribe() {
        let mut feed = LogFeedProjector::default();
        assert!(feed.subscribe());
        assert!(!feed.subscribe());
        assert!(feed.apply(&[doc(Some(1), "first")]));

        feed.unsubscribe();
        assert!(!feed.apply(&[doc(Some(2), "second")]));
        assert_eq!(actions(&feed), vec!["first"]);
    }

    #[test]
    fn identical_delivery_reports_no_change() {
        let mut feed = LogFeedProjector::new(0);
        assert_eq!(feed.limit(), DEFAULT_FEED_LIMIT);
        feed.subscribe();
        let docs = vec![doc(Some(1), "x")];
        assert!(feed.apply(&docs));
        assert!(!feed.apply(&docs));
    }
}
