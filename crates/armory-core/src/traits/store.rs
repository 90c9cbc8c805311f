//! Persisted session storage trait.

use crate::session::StoredSession;
use crate::types::UserProfile;
use crate::{CredentialToken, Result};

/// Durable storage for the credential token and the cached user profile.
///
/// The two entries are written together, read together and cleared together.
/// Finding only one of them is reported as
/// [`StorageError::Corrupt`](crate::error::StorageError::Corrupt), never as a
/// session.
///
/// Operations are synchronous: logout has to be able to clear storage without
/// awaiting anything.
pub trait SessionStore: Send + Sync {
    /// Read both entries.
    fn load(&self) -> Result<Option<StoredSession>>;

    /// Write both entries.
    fn save(&self, token: &CredentialToken, profile: &UserProfile) -> Result<()>;

    /// Remove both entries. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;

    /// Read the current token.
    fn token(&self) -> Result<Option<CredentialToken>> {
        Ok(self.load()?.map(|stored| stored.token))
    }
}
