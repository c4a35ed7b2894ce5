//! JSON file-based document store.
//!
//! One JSON file holds every collection and document of the panel and is
//! shared by all plugin instances on the host. Each instance keeps an
//! in-memory copy, reloads it before every read or write so changes from
//! other instances are never clobbered, and saves with an atomic write
//! (write-to-temp + rename) so readers never see a torn file.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(n) - reparses the whole file
//! - **Write**: O(n) - reparses, then serializes the whole dataset
//! - **Best for**: a moderation log in the low thousands of entries

use crate::domain::document::{self, Document};
use crate::domain::error::{ModPanelError, Result};
use crate::storage::backend::Store;
use crate::storage::models::{Change, Notification, StoredDocument, SubscriptionId};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};
use std::path::{Path, PathBuf};

/// Store container format, serialized as the whole file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoreData {
    /// Version of the file format for future migrations.
    version: u32,

    /// Incremented by every write from any instance.
    #[serde(default)]
    revision: u64,

    /// Last server time handed out, in Unix milliseconds.
    #[serde(default)]
    last_server_time: i64,

    /// Append-only collections, oldest document first.
    #[serde(default)]
    collections: BTreeMap<String, Vec<StoredDocument>>,

    /// Single mutable documents keyed by path.
    #[serde(default)]
    documents: BTreeMap<String, Document>,
}

impl Default for StoreData {
    fn default() -> Self {
        Self {
            version: 1,
            revision: 0,
            last_server_time: 0,
            collections: BTreeMap::new(),
            documents: BTreeMap::new(),
        }
    }
}

impl StoreData {
    /// Hands out the next server time: wall clock, but strictly increasing
    /// across every instance sharing the file.
    fn next_server_time(&mut self) -> i64 {
        let now = chrono::Utc::now().timestamp_millis();
        self.last_server_time = now.max(self.last_server_time.saturating_add(1));
        self.last_server_time
    }

    /// Replaces server-timestamp placeholders with a freshly issued time.
    fn resolve_server_values(&mut self, fields: &mut Document) {
        if !fields.values().any(document::is_server_timestamp) {
            return;
        }
        let now = self.next_server_time();
        for value in fields.values_mut() {
            if document::is_server_timestamp(value) {
                *value = Value::from(now);
            }
        }
    }

    fn view(&self, target: &Target) -> Change {
        match target {
            Target::Collection { path, limit } => {
                let docs = self.collections.get(path).map_or_else(Vec::new, |docs| {
                    let start = docs.len().saturating_sub(*limit);
                    docs[start..].iter().map(|d| d.fields.clone()).collect()
                });
                Change::Collection(docs)
            }
            Target::Document { path } => Change::Document(self.documents.get(path).cloned()),
        }
    }
}

#[derive(Debug, Clone)]
enum Target {
    Collection { path: String, limit: usize },
    Document { path: String },
}

#[derive(Debug, Clone)]
struct Subscription {
    target: Target,
    /// Last state delivered, used to suppress duplicate deliveries.
    last: Option<Change>,
    /// A failure has been delivered and no success since.
    failed: bool,
}

/// JSON file document store.
///
/// # Thread Safety
///
/// `Send` but not `Sync`: owned by the single worker thread. Several
/// processes may share the file; every write is reload-modify-save with no
/// locking, so concurrent writers are last-write-wins per field.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "revision": 12,
///   "last_server_time": 1700000000000,
///   "collections": {
///     "artifacts/demo/public/data/moderation_logs": [
///       { "id": "6f1c…", "fields": { "action": "KICK against Alex", "timestamp": 1700000000000 } }
///     ]
///   },
///   "documents": {
///     "artifacts/demo/public/data/stats/user_stats": { "totalUsers": 1000 }
///   }
/// }
/// ```
pub struct JsonDocumentStore {
    file_path: PathBuf,
    data: StoreData,
    dirty: bool,
    subscriptions: BTreeMap<SubscriptionId, Subscription>,
    next_subscription: SubscriptionId,
    pending: VecDeque<Notification>,
}

impl JsonDocumentStore {
    /// Creates or opens a JSON document store.
    ///
    /// Parent directories are created automatically. A missing or empty file
    /// is an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Parent directory creation fails
    /// - File exists but contains invalid JSON
    /// - File permissions prevent reading
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON document store");

        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let data = Self::load_from_file(&file_path)?.unwrap_or_default();

        tracing::debug!(
            revision = data.revision,
            collections = data.collections.len(),
            documents = data.documents.len(),
            "document store initialized"
        );

        Ok(Self {
            file_path,
            data,
            dirty: false,
            subscriptions: BTreeMap::new(),
            next_subscription: 1,
            pending: VecDeque::new(),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Reads the file; `None` if it does not exist or is blank.
    fn load_from_file(path: &Path) -> Result<Option<StoreData>> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = std::fs::read_to_string(path)?;
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let data: StoreData = serde_json::from_str(&contents).map_err(|e| {
            ModPanelError::StoreUnavailable(format!("failed to parse {}: {e}", path.display()))
        })?;

        tracing::trace!(revision = data.revision, "loaded store data");
        Ok(Some(data))
    }

    /// Saves the in-memory data with an atomic write.
    ///
    /// The temporary file name is unique per write so two instances saving
    /// at once never share one.
    fn save_to_file(&mut self) -> Result<()> {
        if !self.dirty {
            tracing::trace!("skipping save, no changes");
            return Ok(());
        }

        let json = serde_json::to_string_pretty(&self.data).map_err(|e| {
            ModPanelError::StoreUnavailable(format!("failed to serialize store: {e}"))
        })?;

        let tmp_path = self
            .file_path
            .with_extension(format!("{}.tmp", uuid::Uuid::new_v4().simple()));

        std::fs::write(&tmp_path, json)?;
        if let Err(e) = std::fs::rename(&tmp_path, &self.file_path) {
            let _ = std::fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        self.dirty = false;
        tracing::debug!(revision = self.data.revision, "store saved");
        Ok(())
    }

    /// Replaces the in-memory copy with the file contents.
    ///
    /// Returns `true` if the file differed from what this instance last saw.
    fn reload(&mut self) -> Result<bool> {
        let Some(latest) = Self::load_from_file(&self.file_path)? else {
            return Ok(false);
        };

        if latest == self.data {
            return Ok(false);
        }

        tracing::debug!(
            from_revision = self.data.revision,
            to_revision = latest.revision,
            "store changed on disk"
        );
        self.data = latest;
        Ok(true)
    }

    /// Reload, apply `op`, bump the revision, save, then notify.
    ///
    /// If the save fails the in-memory copy is rolled back, so a write
    /// reported as failed is never persisted later.
    fn write<T>(&mut self, op: impl FnOnce(&mut StoreData) -> T) -> Result<T> {
        self.reload()?;

        let before = self.data.clone();
        let result = op(&mut self.data);
        self.data.revision = self.data.revision.saturating_add(1);
        self.dirty = true;

        if let Err(e) = self.save_to_file() {
            tracing::warn!(error = %e, "save failed, discarding write");
            self.data = before;
            self.dirty = false;
            return Err(e);
        }

        self.publish();
        Ok(result)
    }

    /// Queues a delivery for every subscription whose view changed.
    fn publish(&mut self) {
        for (id, subscription) in &mut self.subscriptions {
            let change = self.data.view(&subscription.target);
            if subscription.last.as_ref() == Some(&change) {
                continue;
            }
            subscription.last = Some(change.clone());
            subscription.failed = false;
            self.pending.push_back(Notification {
                subscription: *id,
                change,
            });
        }
    }

    /// Queues a failure for every subscription not already failing.
    fn fail_all(&mut self, message: &str) {
        for (id, subscription) in &mut self.subscriptions {
            if subscription.failed {
                continue;
            }
            subscription.failed = true;
            subscription.last = None;
            self.pending.push_back(Notification {
                subscription: *id,
                change: Change::Failed(message.to_string()),
            });
        }
    }

    fn subscribe(&mut self, target: Target) -> Result<SubscriptionId> {
        self.reload()?;

        let id = self.next_subscription;
        self.next_subscription += 1;

        tracing::debug!(subscription = id, target = ?target, "subscription opened");

        self.subscriptions.insert(
            id,
            Subscription {
                target,
                last: None,
                failed: false,
            },
        );
        self.publish();
        Ok(id)
    }
}

impl Store for JsonDocumentStore {
    fn subscribe_collection(&mut self, path: &str, limit: usize) -> Result<SubscriptionId> {
        let _span = tracing::debug_span!("json_subscribe_collection", path = %path, limit).entered();
        self.subscribe(Target::Collection {
            path: path.to_string(),
            limit,
        })
    }

    fn subscribe_document(&mut self, path: &str) -> Result<SubscriptionId> {
        let _span = tracing::debug_span!("json_subscribe_document", path = %path).entered();
        self.subscribe(Target::Document {
            path: path.to_string(),
        })
    }

    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool {
        let removed = self.subscriptions.remove(&subscription).is_some();
        self.pending.retain(|n| n.subscription != subscription);
        tracing::debug!(subscription, removed, "subscription closed");
        removed
    }

    fn get_document(&mut self, path: &str) -> Result<Option<Document>> {
        let _span = tracing::debug_span!("json_get_document", path = %path).entered();

        if self.reload()? {
            self.publish();
        }
        Ok(self.data.documents.get(path).cloned())
    }

    fn append(&mut self, path: &str, mut record: Document) -> Result<String> {
        let _span = tracing::debug_span!("json_append", path = %path).entered();

        let id = self.write(|data| {
            data.resolve_server_values(&mut record);
            let stored = StoredDocument::new(record);
            let id = stored.id.clone();
            data.collections.entry(path.to_string()).or_default().push(stored);
            id
        })?;

        tracing::debug!(document_id = %id, "document appended");
        Ok(id)
    }

    fn upsert_merge(&mut self, path: &str, mut fields: Document) -> Result<()> {
        let _span = tracing::debug_span!("json_upsert_merge", path = %path, fields = fields.len())
            .entered();

        self.write(|data| {
            data.resolve_server_values(&mut fields);
            data.documents
                .entry(path.to_string())
                .or_default()
                .extend(fields);
        })
    }

    fn refresh(&mut self) -> Result<bool> {
        match self.reload() {
            Ok(changed) => {
                self.publish();
                Ok(changed)
            }
            Err(e) => {
                tracing::warn!(error = %e, "store refresh failed");
                self.fail_all(&e.to_string());
                Err(e)
            }
        }
    }

    fn drain_notifications(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }
}

impl Drop for JsonDocumentStore {
    fn drop(&mut self) {
        if self.dirty {
            tracing::debug!("saving dirty store on drop");
            if let Err(e) = self.save_to_file() {
                tracing::error!(error = %e, "failed to save on drop");
            }
        }
    }
}
