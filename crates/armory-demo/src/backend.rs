//! Demo authentication backend.

use std::time::Duration;

use async_trait::async_trait;
use bcrypt::{hash, verify};
use tracing::{debug, instrument};

use armory_core::error::{AuthError, Error, InvalidInputError};
use armory_core::{AuthBackend, AuthGrant, CredentialToken, Credentials, DEMO_PASSWORD, Result};

use crate::users::{DEMO_USERS, DemoIdentity};

/// bcrypt cost for the demo table. The secret is public anyway.
const DEMO_HASH_COST: u32 = 4;

/// A demo account: the identity plus its password hash.
#[derive(Debug, Clone)]
struct DemoAccount {
    identity: DemoIdentity,
    password_hash: String,
}

/// Authentication against a fixed in-memory user table.
///
/// Every identity shares [`DEMO_PASSWORD`]. Tokens are not verifiable by any
/// server; they only identify the demo user.
#[derive(Debug, Clone)]
pub struct DemoAuthBackend {
    accounts: Vec<DemoAccount>,
    latency: Duration,
}

impl DemoAuthBackend {
    /// Create the backend, hashing the shared demo secret for each identity.
    pub fn new() -> Result<Self> {
        let accounts = DEMO_USERS
            .iter()
            .map(|identity| {
                let password_hash = hash(DEMO_PASSWORD, DEMO_HASH_COST).map_err(|e| {
                    Error::InvalidInput(InvalidInputError::Other {
                        message: e.to_string(),
                    })
                })?;
                Ok(DemoAccount {
                    identity: *identity,
                    password_hash,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            accounts,
            latency: Duration::ZERO,
        })
    }

    /// Wait this long before answering, like a real round trip.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The identities available for demo login.
    pub fn identities(&self) -> impl Iterator<Item = &DemoIdentity> {
        self.accounts.iter().map(|account| &account.identity)
    }

    fn make_token(identity: &DemoIdentity) -> CredentialToken {
        CredentialToken::new(format!("mock-jwt-token-{}", identity.username))
    }
}

#[async_trait]
impl AuthBackend for DemoAuthBackend {
    fn name(&self) -> &'static str {
        "demo"
    }

    #[instrument(skip(self, credentials), fields(username = credentials.username()))]
    async fn authenticate(&self, credentials: Credentials) -> Result<AuthGrant> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let account = self
            .accounts
            .iter()
            .find(|account| account.identity.username == credentials.username())
            .ok_or_else(|| AuthError::InvalidCredentials("Invalid credentials".to_string()))?;

        let ok = verify(credentials.secret(), &account.password_hash).map_err(|e| {
            Error::InvalidInput(InvalidInputError::Other {
                message: e.to_string(),
            })
        })?;

        if !ok {
            return Err(AuthError::InvalidCredentials("Invalid credentials".to_string()).into());
        }

        debug!(role = %account.identity.role, "Demo credentials accepted");

        Ok(AuthGrant {
            token: Self::make_token(&account.identity),
            profile: account.identity.profile(),
        })
    }
}
