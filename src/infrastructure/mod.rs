//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module provides the external collaborators that are not the shared
//! store: sandbox path handling (the host filesystem is mounted under
//! `/host`), the local preference file and the identity provider.

pub mod identity;
pub mod paths;
pub mod preferences;

pub use identity::{IdentityProvider, LocalIdentityProvider};
pub use paths::{expand_tilde, get_data_dir, resolve_file};
pub use preferences::{JsonPreferences, PreferenceStore, THEME_KEY};
