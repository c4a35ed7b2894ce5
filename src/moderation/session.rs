//! Session Manager: identity, admin profile and the login state machine.
//!
//! [`SessionState`] is the single owner of "who is using the panel". Every
//! transition returns the [`SessionEffect`]s it needs performed (store writes,
//! subscription changes, identity requests) instead of performing them, so the
//! state machine stays synchronous and testable without a store.
//!
//! ```text
//!   LoggedOut ──login(name)──▶ LoggedIn ──change_theme(t)──▶ LoggedIn
//!       ▲                          │
//!       └────────logout────────────┘
//! ```

use crate::domain::{AdminProfile, Identity, LogKind, LogRecord, ThemeChoice, SYSTEM_AUTHOR};

/// Identity reported in records written before the provider has answered.
pub const ANON_IDENTITY: &str = "anon_user";

/// Author of records written while nobody is logged in.
pub const ANON_AUTHOR: &str = "Anon";

/// Login state, derived from the profile's display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    LoggedOut,
    LoggedIn,
}

/// Side effects requested by a session transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEffect {
    /// Append a record to the shared log.
    Append(LogRecord),
    /// Persist the profile under the identity's settings document.
    SaveProfile {
        identity: Identity,
        profile: AdminProfile,
    },
    /// Read the settings document of a freshly established identity.
    LoadProfile(Identity),
    /// Start the log and stats subscriptions unless already running.
    SubscribeFeeds,
    /// Stop the log and stats subscriptions.
    UnsubscribeFeeds,
    /// Sign out of the identity provider and ask for a new identity.
    RenewIdentity,
    /// Show a transient message next to the footer.
    Notice(String),
}

/// Current identity and profile of the panel user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    identity: Option<Identity>,
    profile: AdminProfile,
    /// A `LoadProfile` for the current identity has not been answered yet.
    profile_pending: bool,
    /// The profile was changed locally while that load was in flight.
    edited_while_loading: bool,
}

impl SessionState {
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if self.profile.is_authenticated() {
            SessionPhase::LoggedIn
        } else {
            SessionPhase::LoggedOut
        }
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    /// Identity written into records, or [`ANON_IDENTITY`] before sign-in.
    #[must_use]
    pub fn identity_str(&self) -> &str {
        self.identity.as_ref().map_or(ANON_IDENTITY, Identity::as_str)
    }

    #[must_use]
    pub const fn profile(&self) -> &AdminProfile {
        &self.profile
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.profile.display_name
    }

    #[must_use]
    pub const fn theme(&self) -> ThemeChoice {
        self.profile.theme
    }

    /// The admin name, or [`ANON_AUTHOR`] while logged out.
    #[must_use]
    pub fn author(&self) -> &str {
        match self.phase() {
            SessionPhase::LoggedIn => self.display_name(),
            SessionPhase::LoggedOut => ANON_AUTHOR,
        }
    }

    /// A record authored by the current admin.
    pub fn record(&self, action: impl Into<String>, kind: LogKind) -> LogRecord {
        LogRecord::new(self.identity_str(), self.author(), action, kind)
    }

    /// A record authored by the panel itself.
    pub fn system_record(&self, action: impl Into<String>, kind: LogKind) -> LogRecord {
        LogRecord::new(self.identity_str(), SYSTEM_AUTHOR, action, kind)
    }

    /// Applies a theme remembered in local preferences before any profile
    /// has been loaded.
    pub fn apply_preferred_theme(&mut self, theme: ThemeChoice) {
        self.profile.theme = theme;
    }

    /// Reacts to the identity provider's change stream.
    ///
    /// A new identity loads its profile and starts the live feeds. `None`
    /// (signed out) drops the identity and the admin name.
    pub fn on_identity(&mut self, identity: Option<Identity>) -> Vec<SessionEffect> {
        if self.identity == identity {
            return vec![];
        }

        tracing::debug!(identity = ?identity, "identity changed");

        match identity {
            Some(identity) => {
                self.identity = Some(identity.clone());
                self.profile_pending = true;
                self.edited_while_loading = false;
                vec![SessionEffect::LoadProfile(identity), SessionEffect::SubscribeFeeds]
            }
            None => {
                self.identity = None;
                self.profile_pending = false;
                self.profile.display_name.clear();
                vec![]
            }
        }
    }

    /// The identity provider failed to initialise or sign in.
    ///
    /// Leaves the session logged out and reports the failure as a system
    /// record.
    pub fn on_identity_failed(&mut self, message: &str) -> Vec<SessionEffect> {
        tracing::warn!(error = %message, "identity provider failed");

        self.identity = None;
        self.profile_pending = false;
        self.profile.display_name.clear();

        let text = format!("Database initialisation failed: {message}");
        vec![
            SessionEffect::Append(self.system_record(text.clone(), LogKind::System)),
            SessionEffect::Notice(text),
        ]
    }

    /// Installs the profile read for `identity`.
    ///
    /// Profiles arriving for an identity that is no longer current are
    /// dropped. So is a profile read before a local login, logout or theme
    /// change: that change was saved after the read and is the newer state.
    /// Returns `true` if the profile was applied.
    pub fn on_profile_loaded(&mut self, identity: &Identity, profile: AdminProfile) -> bool {
        if self.identity.as_ref() != Some(identity) {
            tracing::debug!(identity = %identity, "discarding stale profile");
            return false;
        }

        self.profile_pending = false;
        if std::mem::take(&mut self.edited_while_loading) {
            tracing::debug!(identity = %identity, "profile changed locally since load, keeping local copy");
            return false;
        }

        self.profile = profile;
        true
    }

    fn mark_edited(&mut self) {
        if self.profile_pending {
            self.edited_while_loading = true;
        }
    }

    /// `LoggedOut --login(name)--> LoggedIn`.
    ///
    /// A blank name appends an error record and keeps the session logged
    /// out. Logging in before the identity provider has answered only raises
    /// a notice, since the profile has nowhere to be persisted yet.
    pub fn login(&mut self, name: &str) -> Vec<SessionEffect> {
        let name = name.trim();

        if name.is_empty() {
            return vec![SessionEffect::Append(
                self.system_record("Please enter your admin name.", LogKind::Error),
            )];
        }

        let Some(identity) = self.identity.clone() else {
            return vec![SessionEffect::Notice(
                "Still signing in, try again in a moment".to_string(),
            )];
        };

        tracing::info!(admin = %name, identity = %identity, "admin logged in");

        self.profile.display_name = name.to_string();
        self.mark_edited();

        vec![
            SessionEffect::SaveProfile {
                identity,
                profile: self.profile.clone(),
            },
            SessionEffect::Append(
                self.record("Logged in successfully as admin.", LogKind::System),
            ),
            SessionEffect::SubscribeFeeds,
        ]
    }

    /// `LoggedIn --logout--> LoggedOut`.
    ///
    /// The farewell record is authored by the outgoing admin. The cleared
    /// name is persisted so a reload also starts logged out, then the feeds
    /// are torn down and a new identity is requested.
    pub fn logout(&mut self) -> Vec<SessionEffect> {
        if self.phase() == SessionPhase::LoggedOut {
            return vec![];
        }

        tracing::info!(admin = %self.profile.display_name, "admin logged out");

        let farewell = self.record("Logged out successfully.", LogKind::System);
        self.profile.display_name.clear();
        self.mark_edited();

        let mut effects = vec![SessionEffect::Append(farewell)];
        if let Some(identity) = self.identity.clone() {
            effects.push(SessionEffect::SaveProfile {
                identity,
                profile: self.profile.clone(),
            });
        }
        effects.push(SessionEffect::UnsubscribeFeeds);
        effects.push(SessionEffect::RenewIdentity);
        effects
    }

    /// `LoggedIn --change_theme(t)--> LoggedIn`.
    ///
    /// Also allowed while logged out; the theme is then saved with the
    /// empty-name profile so it still survives a reload.
    pub fn change_theme(&mut self, theme: ThemeChoice) -> Vec<SessionEffect> {
        if self.profile.theme == theme {
            return vec![];
        }

        self.profile.theme = theme;
        self.mark_edited();

        let mut effects = Vec::with_capacity(2);
        if let Some(identity) = self.identity.clone() {
            effects.push(SessionEffect::SaveProfile {
                identity,
                profile: self.profile.clone(),
            });
        }
        effects.push(SessionEffect::Append(self.record(
            format!("Theme changed to: {}", theme.label()),
            LogKind::Info,
        )));
        effects
    }
}
