//! Admin identity and per-identity profile settings.

use super::document::{self, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Opaque user handle issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// UI colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeChoice {
    #[default]
    Dark,
    Light,
}

impl ThemeChoice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Human label used in feed messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Parses a stored preference. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }
}

/// Display name and theme for the admin behind an identity.
///
/// An empty `display_name` means nobody is logged in: the login prompt is
/// shown and actions cannot execute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    pub display_name: String,
    pub theme: ThemeChoice,
}

impl AdminProfile {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.display_name.is_empty()
    }

    #[must_use]
    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("displayName".into(), Value::from(self.display_name.clone()));
        doc.insert("theme".into(), Value::from(self.theme.as_str()));
        doc
    }

    /// Decodes a stored settings document.
    ///
    /// `fallback_theme` applies when the document has no usable theme, which
    /// is how a locally remembered theme survives before the first save.
    #[must_use]
    pub fn from_document(doc: &Document, fallback_theme: ThemeChoice) -> Self {
        Self {
            display_name: document::str_field(doc, "displayName")
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            theme: document::str_field(doc, "theme")
                .and_then(ThemeChoice::parse)
                .unwrap_or(fallback_theme),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn profile_document_round_trip() {
        let profile = AdminProfile {
            display_name: "Steve".into(),
            theme: ThemeChoice::Light,
        };
        let decoded = AdminProfile::from_document(&profile.to_document(), ThemeChoice::Dark);
        assert_eq!(decoded, profile);
    }

    #[test]
    fn missing_theme_uses_fallback() {
        let doc = json!({ "displayName": "  Alex " });
        let profile = AdminProfile::from_document(doc.as_object().unwrap(), ThemeChoice::Light);
        assert_eq!(profile.display_name, "Alex");
        assert_eq!(profile.theme, ThemeChoice::Light);
        assert!(profile.is_authenticated());
    }

    #[test]
    fn default_profile_is_logged_out() {
        assert!(!AdminProfile::default().is_authenticated());
        assert_eq!(ThemeChoice::Dark.toggled(), ThemeChoice::Light);
    }
}
