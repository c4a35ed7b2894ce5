//! Identity provider.
//!
//! Issues the opaque [`Identity`] that scopes an admin's settings document.
//! Anonymous identities are random and remembered across reloads; token
//! sign-in derives a stable identity from the token so the same token always
//! maps to the same settings.

use crate::domain::error::{ModPanelError, Result};
use crate::domain::Identity;
use crate::infrastructure::preferences::PreferenceStore;
use uuid::Uuid;

/// Preference key holding the remembered anonymous identity.
const ANONYMOUS_KEY: &str = "anonymous_identity";

/// Namespace for identities derived from auth tokens.
const TOKEN_NAMESPACE: Uuid = Uuid::from_u128(0x6d6f_6470_616e_656c_8000_0000_0000_0001);

/// Source of user identities.
///
/// Identity changes are queued rather than pushed: the event loop collects
/// them with [`drain_changes`](Self::drain_changes). `None` in the stream
/// means "signed out".
pub trait IdentityProvider: Send {
    /// Signs in with a custom token, or anonymously when `token` is `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ModPanelError::Identity`] if the token is rejected or the
    /// identity cannot be persisted.
    fn sign_in(&mut self, token: Option<&str>) -> Result<Identity>;

    /// Signs out. The next anonymous sign-in yields a new identity.
    ///
    /// # Errors
    ///
    /// Returns an error if the remembered identity cannot be forgotten.
    fn sign_out(&mut self) -> Result<()>;

    fn current(&self) -> Option<&Identity>;

    /// Takes the queued identity changes, oldest first.
    fn drain_changes(&mut self) -> Vec<Option<Identity>>;
}

/// Identity provider backed by a local preference file.
#[derive(Debug)]
pub struct LocalIdentityProvider<P> {
    preferences: P,
    current: Option<Identity>,
    changes: Vec<Option<Identity>>,
}

impl<P: PreferenceStore> LocalIdentityProvider<P> {
    pub const fn new(preferences: P) -> Self {
        Self {
            preferences,
            current: None,
            changes: Vec::new(),
        }
    }

    fn anonymous(&mut self) -> Result<Identity> {
        if let Some(existing) = self.preferences.get(ANONYMOUS_KEY).filter(|v| !v.is_empty()) {
            return Ok(Identity::new(existing));
        }

        let minted = Uuid::new_v4().to_string();
        self.preferences
            .set(ANONYMOUS_KEY, &minted)
            .map_err(|e| ModPanelError::Identity(format!("cannot remember identity: {e}")))?;

        tracing::debug!(identity = %minted, "minted anonymous identity");
        Ok(Identity::new(minted))
    }

    fn from_token(token: &str) -> Result<Identity> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ModPanelError::Identity("auth token is empty".to_string()));
        }
        Ok(Identity::new(
            Uuid::new_v5(&TOKEN_NAMESPACE, token.as_bytes()).to_string(),
        ))
    }

    fn set_current(&mut self, identity: Option<Identity>) {
        if self.current != identity {
            self.current.clone_from(&identity);
            self.changes.push(identity);
        }
    }
}

impl<P: PreferenceStore> IdentityProvider for LocalIdentityProvider<P> {
    fn sign_in(&mut self, token: Option<&str>) -> Result<Identity> {
        let _span = tracing::debug_span!("identity_sign_in", with_token = token.is_some()).entered();

        let identity = match token {
            Some(token) => Self::from_token(token)?,
            None => self.anonymous()?,
        };

        self.set_current(Some(identity.clone()));
        Ok(identity)
    }

    fn sign_out(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("identity_sign_out").entered();

        self.preferences
            .remove(ANONYMOUS_KEY)
            .map_err(|e| ModPanelError::Identity(format!("cannot forget identity: {e}")))?;
        self.set_current(None);
        Ok(())
    }

    fn current(&self) -> Option<&Identity> {
        self.current.as_ref()
    }

    fn drain_changes(&mut self) -> Vec<Option<Identity>> {
        std::mem::take(&mut self.changes)
    }
}
