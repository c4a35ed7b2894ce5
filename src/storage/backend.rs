//! Document store abstraction.
//!
//! This module defines the [`Store`] trait: the small set of operations the
//! panel needs from a shared, document-oriented backend with live
//! subscriptions. The worker thread is the only caller.
//!
//! # Subscriptions
//!
//! Subscriptions are not callbacks. Each subscribe call returns a
//! [`SubscriptionId`]; deliveries are queued inside the store and collected
//! with [`Store::drain_notifications`], which the worker calls after every
//! operation. A fresh subscription always queues its current state, so
//! delivery is at-least-once.

use crate::domain::error::Result;
use crate::domain::Document;
use crate::storage::models::{Notification, SubscriptionId};

/// Abstraction over shared document stores.
///
/// # Implementations
///
/// - [`JsonDocumentStore`](crate::storage::JsonDocumentStore): a JSON file
///   shared by every plugin instance on the host
///
/// # Examples
///
/// ```no_run
/// use modpanel::storage::{JsonDocumentStore, Store};
/// use std::path::PathBuf;
///
/// let mut store = JsonDocumentStore::new(PathBuf::from("/tmp/store.json"))?;
/// let sub = store.subscribe_collection("artifacts/demo/public/data/moderation_logs", 50)?;
/// for notification in store.drain_notifications() {
///     assert_eq!(notification.subscription, sub);
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Store: Send {
    /// Subscribes to the most recent `limit` documents of a collection.
    ///
    /// No ordering is promised within a delivered window.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn subscribe_collection(&mut self, path: &str, limit: usize) -> Result<SubscriptionId>;

    /// Subscribes to a single document, delivered as `None` while absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn subscribe_document(&mut self, path: &str) -> Result<SubscriptionId>;

    /// Cancels a subscription and drops its queued deliveries.
    ///
    /// Returns `false` if the id was unknown.
    fn unsubscribe(&mut self, subscription: SubscriptionId) -> bool;

    /// Reads a document once, without subscribing.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn get_document(&mut self, path: &str) -> Result<Option<Document>>;

    /// Appends a document to a collection and returns its id.
    ///
    /// Server-timestamp placeholders among the top-level fields are replaced
    /// by the store's own clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn append(&mut self, path: &str, record: Document) -> Result<String>;

    /// Merges top-level `fields` into a document, creating it if absent.
    ///
    /// Fields not named in `fields` keep whatever value the latest stored
    /// version has, including values written by other clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn upsert_merge(&mut self, path: &str, fields: Document) -> Result<()>;

    /// Picks up writes made by other clients since the last read.
    ///
    /// Returns `true` if anything changed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read. Affected subscriptions
    /// also receive a [`Change::Failed`](crate::storage::Change::Failed).
    fn refresh(&mut self) -> Result<bool>;

    /// Takes every queued notification, oldest first.
    fn drain_notifications(&mut self) -> Vec<Notification>;
}
