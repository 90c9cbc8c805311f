//! Authentication backend trait.

use async_trait::async_trait;

use crate::types::UserProfile;
use crate::{CredentialToken, Credentials, Result};

/// What a backend hands out for accepted credentials.
#[derive(Debug, Clone)]
pub struct AuthGrant {
    /// Bearer token for subsequent authenticated calls.
    pub token: CredentialToken,
    /// Profile of the authenticated user.
    pub profile: UserProfile,
}

/// An authentication collaborator.
///
/// The network backend and the demo backend both implement this; which one a
/// session manager talks to is decided where it is constructed.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Exchange credentials for a token and profile.
    ///
    /// Rejected credentials surface as
    /// [`AuthError::InvalidCredentials`](crate::error::AuthError::InvalidCredentials)
    /// carrying the backend's own message.
    async fn authenticate(&self, credentials: Credentials) -> Result<AuthGrant>;
}
