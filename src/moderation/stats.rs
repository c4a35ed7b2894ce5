//! Stats Projector: the dashboard counters and their one-time seed.

use crate::domain::{Document, StatsSnapshot};

/// Latest stats snapshot plus the seed bookkeeping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsProjector {
    snapshot: Option<StatsSnapshot>,
    seeded: bool,
    active: bool,
}

impl StatsProjector {
    /// Marks the projector subscribed; `false` if it already was.
    pub fn subscribe(&mut self) -> bool {
        !std::mem::replace(&mut self.active, true)
    }

    pub fn unsubscribe(&mut self) {
        self.active = false;
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Snapshot to display; `None` until the document has been observed.
    #[must_use]
    pub const fn snapshot(&self) -> Option<&StatsSnapshot> {
        self.snapshot.as_ref()
    }

    /// Applies a delivery of the stats document.
    ///
    /// The first time the document is observed missing, returns the seed
    /// fields to merge-upsert. Later absences return `None`: the seed is a
    /// convenience, and racing initialisers are tolerated by the merge.
    pub fn apply(&mut self, document: Option<&Document>) -> Option<Document> {
        if !self.active {
            return None;
        }

        if let Some(doc) = document {
            self.snapshot = Some(StatsSnapshot::from_document(doc));
            return None;
        }

        if std::mem::replace(&mut self.seeded, true) {
            tracing::debug!("stats document still absent, seed already requested");
            return None;
        }

        tracing::info!("stats document missing, seeding defaults");
        Some(StatsSnapshot::seed().to_document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seeds_exactly_once() {
        let mut stats = StatsProjector::default();
        stats.subscribe();

        let seed = stats.apply(None).unwrap();
        assert_eq!(seed["totalUsers"], 1000);
        assert_eq!(seed["nextEvent"], "Community Tag");
        assert!(stats.apply(None).is_none());
        assert!(stats.snapshot().is_none());
    }

    #[test]
    fn present_document_updates_snapshot() {
        let mut stats = StatsProjector::default();
        stats.subscribe();
        let doc = json!({ "totalUsers": 7, "nextEvent": "" });

        assert!(stats.apply(doc.as_object()).is_none());
        let snapshot = stats.snapshot().unwrap();
        assert_eq!(snapshot.total_users, 7);
        assert_eq!(snapshot.daily_reports, 0);
        assert_eq!(snapshot.next_event, "N/A");
    }

    #[test]
    fn inactive_projector_ignores_deliveries() {
        let mut stats = StatsProjector::default();
        assert!(stats.apply(None).is_none());
        assert!(stats.subscribe());
        assert!(!stats.subscribe());
    }
}
