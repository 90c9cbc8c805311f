//! Authenticated request gateway.

use std::sync::Arc;
use std::time::Duration;

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, warn};

use armory_core::error::AuthError;
use armory_core::{CredentialToken, LOGIN_ROUTE, Navigator, Result, SessionManager};

use crate::client::ApiClient;

/// How long a forced logout waits before navigating to the login route.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(100);

/// The single path for authenticated calls to the REST backend.
///
/// Every request carries the token currently in the session store, read at
/// send time. The first 401 answering a request sent with the current token
/// logs the session out and schedules one navigation to the login route;
/// concurrent and later 401s only fail their own call.
///
/// Cloning is cheap and clones share the session.
#[derive(Clone)]
pub struct ApiGateway {
    client: ApiClient,
    session: Arc<SessionManager>,
    navigator: Arc<dyn Navigator>,
    redirect_delay: Duration,
}

impl ApiGateway {
    pub fn new(
        client: ApiClient,
        session: Arc<SessionManager>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            client,
            session,
            navigator,
            redirect_delay: REDIRECT_DELAY,
        }
    }

    /// Override the pause between a forced logout and its redirect.
    pub fn with_redirect_delay(mut self, delay: Duration) -> Self {
        self.redirect_delay = delay;
        self
    }

    pub fn session(&self) -> &Arc<SessionManager> {
        &self.session
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub async fn get<Q, R>(&self, path: &str, query: &Q) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let token = self.current_token();
        let result = self.client.get(path, query, token.as_ref()).await;
        self.intercept(result, token)
    }

    pub async fn post<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let token = self.current_token();
        let result = self.client.post(path, body, token.as_ref()).await;
        self.intercept(result, token)
    }

    pub async fn put<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let token = self.current_token();
        let result = self.client.put(path, body, token.as_ref()).await;
        self.intercept(result, token)
    }

    pub async fn delete<R>(&self, path: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let token = self.current_token();
        let result = self.client.delete(path, token.as_ref()).await;
        self.intercept(result, token)
    }

    fn current_token(&self) -> Option<CredentialToken> {
        self.session.store().token().unwrap_or_else(|e| {
            warn!(error = %e, "Could not read token; sending request without one");
            None
        })
    }

    fn intercept<R>(&self, result: Result<R>, sent: Option<CredentialToken>) -> Result<R> {
        match result {
            Err(err) if err.is_unauthorized() => {
                self.on_unauthorized(sent);
                Err(AuthError::SessionExpired.into())
            }
            other => other,
        }
    }

    fn on_unauthorized(&self, sent: Option<CredentialToken>) {
        // A reply to a token that has since been replaced says nothing about
        // the current session.
        if self.current_token() != sent {
            debug!("401 for a superseded token; leaving the session alone");
            return;
        }

        if !self.session.expire() {
            return;
        }

        let navigator = Arc::clone(&self.navigator);
        let delay = self.redirect_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.navigate(LOGIN_ROUTE);
        });
    }
}

impl std::fmt::Debug for ApiGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiGateway")
            .field("api", self.client.api())
            .field("redirect_delay", &self.redirect_delay)
            .finish_non_exhaustive()
    }
}

