//! Domain layer for the moderation panel.
//!
//! Core types and rules, independent of Zellij APIs and of how documents are
//! persisted. The storage and worker layers only ever move
//! [`Document`]s around; everything that gives those documents meaning lives
//! here.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`action`]: Action kinds and their fixed form policies
//! - [`document`]: Untyped store documents and defensive accessors
//! - [`record`]: Moderation log records
//! - [`profile`]: Identities and per-admin settings
//! - [`stats`]: Dashboard statistics snapshot
//! - [`submission`]: Pending action submissions
//!
//! # Examples
//!
//! ```
//! use modpanel::domain::{ActionKind, LogKind};
//!
//! let policy = ActionKind::parse("ban").policy();
//! assert!(policy.requires_reason && !policy.requires_duration);
//! assert_eq!(policy.accent.log_kind(), LogKind::Error);
//! ```

pub mod action;
pub mod document;
pub mod error;
pub mod profile;
pub mod record;
pub mod stats;
pub mod submission;

pub use action::{Accent, ActionKind, ActionPolicy};
pub use document::Document;
pub use error::{ModPanelError, Result, ValidationError};
pub use profile::{AdminProfile, Identity, ThemeChoice};
pub use record::{LogKind, LogRecord, ServerTime, NO_TARGET, SYSTEM_AUTHOR};
pub use stats::{StatsSnapshot, NO_EVENT};
pub use submission::PendingSubmission;
