//! Storage record models for the document store.
//!
//! These types describe how documents sit on disk and how changes are handed
//! back to subscribers. They are separate from the typed domain records, which
//! are decoded from [`Document`]s by the moderation layer.

use crate::domain::Document;
use serde::{Deserialize, Serialize};

/// Handle returned by a subscribe call, used to match notifications and to
/// unsubscribe.
pub type SubscriptionId = u64;

/// One document of a collection, as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Store-assigned id, unique within the collection.
    pub id: String,

    /// Document fields with server values already resolved.
    pub fields: Document,
}

impl StoredDocument {
    /// Creates a stored document with a fresh random id.
    ///
    /// # Examples
    ///
    /// ```
    /// use modpanel::domain::Document;
    /// use modpanel::storage::StoredDocument;
    ///
    /// let a = StoredDocument::new(Document::new());
    /// let b = StoredDocument::new(Document::new());
    /// assert_ne!(a.id, b.id);
    /// ```
    #[must_use]
    pub fn new(fields: Document) -> Self {
        Self {
            id: uuid::Uuid::new_v4().simple().to_string(),
            fields,
        }
    }
}

/// What changed for a subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Current window of a collection subscription.
    Collection(Vec<Document>),

    /// Current state of a document subscription; `None` if absent.
    Document(Option<Document>),

    /// The subscription could not be served.
    ///
    /// Delivered once per failure streak; the next successful read delivers
    /// the full state again.
    Failed(String),
}

/// A queued delivery for one subscription.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subscription: SubscriptionId,
    pub change: Change,
}
