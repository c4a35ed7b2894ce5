//! Document paths inside the shared store.
//!
//! Everything lives under `artifacts/{app_id}` so several panels can share
//! one store file without seeing each other's data.

use crate::domain::Identity;

/// Path builder for one application namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    app_id: String,
}

impl StorePaths {
    /// Creates paths for `app_id`. Slashes are replaced so the id cannot
    /// escape its namespace.
    #[must_use]
    pub fn new(app_id: &str) -> Self {
        let app_id = app_id.trim().replace('/', "_");
        Self {
            app_id: if app_id.is_empty() {
                crate::DEFAULT_APP_ID.to_string()
            } else {
                app_id
            },
        }
    }

    #[must_use]
    pub fn app_id(&self) -> &str {
        &self.app_id
    }

    fn public(&self, name: &str) -> String {
        format!("artifacts/{}/public/data/{name}", self.app_id)
    }

    /// Shared moderation log collection.
    #[must_use]
    pub fn logs(&self) -> String {
        self.public("moderation_logs")
    }

    /// Shared stats document.
    #[must_use]
    pub fn stats(&self) -> String {
        self.public("stats/user_stats")
    }

    /// Per-identity settings document.
    #[must_use]
    pub fn settings(&self, identity: &Identity) -> String {
        format!(
            "artifacts/{}/users/{}/settings/profile",
            self.app_id,
            identity.as_str().replace('/', "_")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_namespaced_by_app_id() {
        let paths = StorePaths::new("mc-server");
        assert_eq!(paths.logs(), "artifacts/mc-server/public/data/moderation_logs");
        assert_eq!(paths.stats(), "artifacts/mc-server/public/data/stats/user_stats");
        assert_eq!(
            paths.settings(&Identity::new("uid-1")),
            "artifacts/mc-server/users/uid-1/settings/profile"
        );
    }

    #[test]
    fn blank_or_nested_app_ids_are_sanitised() {
        assert_eq!(StorePaths::new("  ").app_id(), crate::DEFAULT_APP_ID);
        assert_eq!(StorePaths::new("a/b").app_id(), "a_b");
    }
}
