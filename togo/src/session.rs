//! Identity ledger and the single-active-session model.
//!
//! Logging in with an unknown name registers it on the spot. Logging in with a
//! known name checks the stored password hash and reactivates the existing
//! identity, so a name is never registered twice.

use thiserror::Error;
use tracing::debug;

use crate::types::{Identity, IdentityId};

/// Errors returned by [`SessionLedger::login`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// The name is registered with a different password hash.
    #[error("invalid name or password")]
    InvalidCredentials,
}

/// Registered identities, at most one of which is active.
#[derive(Debug, Clone, Default)]
pub struct SessionLedger {
    identities: Vec<Identity>,
}

impl SessionLedger {
    #[must_use]
    pub fn new(identities: Vec<Identity>) -> Self {
        Self { identities }
    }

    /// Activates the identity called `name`, registering it if unseen.
    ///
    /// Every identity is deactivated first, so a failed login leaves nobody
    /// logged in.
    ///
    /// # Errors
    ///
    /// Returns `LoginError::InvalidCredentials` if `name` is registered with a
    /// different password hash. No identity is created or activated.
    pub fn login(&mut self, name: &str, password_hash: &str) -> Result<IdentityId, LoginError> {
        self.logout();

        if let Some(identity) = self.identities.iter_mut().find(|i| i.name == name) {
            if identity.password_hash != password_hash {
                debug!(name, "Password mismatch for registered identity");
                return Err(LoginError::InvalidCredentials);
            }
            identity.is_active = true;
            debug!(name, id = %identity.id, "Reactivated identity");
            return Ok(identity.id);
        }

        let identity = Identity::new(name, password_hash);
        let id = identity.id;
        debug!(name, %id, "Registered new identity");
        self.identities.push(identity);
        Ok(id)
    }

    /// Deactivates every identity.
    pub fn logout(&mut self) {
        for identity in &mut self.identities {
            identity.is_active = false;
        }
    }

    /// Returns the identity holding the current session.
    #[must_use]
    pub fn active(&self) -> Option<&Identity> {
        self.identities.iter().find(|i| i.is_active)
    }

    #[must_use]
    pub fn all(&self) -> &[Identity] {
        &self.identities
    }
}
