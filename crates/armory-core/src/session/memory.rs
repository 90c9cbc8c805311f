//! In-process session store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::stored::{StoredSession, TOKEN_KEY, USER_KEY};
use crate::traits::SessionStore;
use crate::types::UserProfile;
use crate::{CredentialToken, Result};

/// A [`SessionStore`] kept in memory, laid out as the same two string
/// entries a durable store holds.
///
/// Useful for embedding and tests. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<&'static str, String>>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with raw entries, as an earlier run would have
    /// left them.
    pub fn with_entries(token: Option<&str>, user: Option<&str>) -> Self {
        let mut entries = HashMap::new();
        if let Some(token) = token {
            entries.insert(TOKEN_KEY, token.to_string());
        }
        if let Some(user) = user {
            entries.insert(USER_KEY, user.to_string());
        }
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// Returns the raw value of an entry.
    pub fn entry(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<&'static str, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<StoredSession>> {
        let entries = self.entries();
        StoredSession::from_entries(
            entries.get(TOKEN_KEY).cloned(),
            entries.get(USER_KEY).cloned(),
        )
    }

    fn save(&self, token: &CredentialToken, profile: &UserProfile) -> Result<()> {
        let (token, user) = StoredSession::to_entries(token, profile)?;
        let mut entries = self.entries();
        entries.insert(TOKEN_KEY, token);
        entries.insert(USER_KEY, user);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        let mut entries = self.entries();
        entries.remove(TOKEN_KEY);
        entries.remove(USER_KEY);
        Ok(())
    }
}
