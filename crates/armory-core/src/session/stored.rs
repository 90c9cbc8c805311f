//! The persisted form of a session.

use crate::error::StorageError;
use crate::types::UserProfile;
use crate::{CredentialToken, Result};

/// Key of the token entry.
pub const TOKEN_KEY: &str = "token";

/// Key of the serialised profile entry.
pub const USER_KEY: &str = "user";

/// A token and profile read back from storage.
#[derive(Debug, Clone)]
pub struct StoredSession {
    pub token: CredentialToken,
    pub profile: UserProfile,
}

impl StoredSession {
    /// Rebuild a session from its two raw string entries.
    ///
    /// Both absent is no session. Exactly one present is a half-written
    /// session and is reported as corrupt, as is a profile that no longer
    /// decodes (for example a role outside the current taxonomy).
    pub fn from_entries(token: Option<String>, user: Option<String>) -> Result<Option<Self>> {
        match (token, user) {
            (None, None) => Ok(None),
            (Some(token), Some(user)) => {
                let profile = UserProfile::from_json(&user).map_err(|e| StorageError::Corrupt {
                    message: e.to_string(),
                })?;
                Ok(Some(Self {
                    token: CredentialToken::new(token),
                    profile,
                }))
            }
            (token, _) => Err(StorageError::Corrupt {
                message: format!(
                    "found {} entry without its pair",
                    if token.is_some() { TOKEN_KEY } else { USER_KEY }
                ),
            }
            .into()),
        }
    }

    /// Encode into `(token, user)` string entries.
    pub fn to_entries(token: &CredentialToken, profile: &UserProfile) -> Result<(String, String)> {
        Ok((token.as_str().to_string(), profile.to_json()?))
    }
}
