//! Storage layer for the shared moderation data.
//!
//! This module provides the document store the worker thread talks to: the
//! moderation log collection, the stats document and the per-admin settings
//! documents all live behind the [`Store`] trait.
//!
//! # Modules
//!
//! - `backend`: Store trait abstraction for backend implementations
//! - `json`: JSON file-based store shared between plugin instances
//! - `models`: On-disk and notification types
//! - `paths`: Namespaced document paths

pub mod backend;
pub mod json;
pub mod models;
pub mod paths;

pub use backend::Store;
pub use json::JsonDocumentStore;
pub use models::{Change, Notification, StoredDocument, SubscriptionId};
pub use paths::StorePaths;
