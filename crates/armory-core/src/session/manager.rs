//! The session manager.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::traits::{AuthBackend, SessionStore};
use crate::types::UserProfile;
use crate::{Credentials, Result};

/// The secret shared by every demo identity.
pub const DEMO_PASSWORD: &str = "password123";

/// A snapshot of the authentication state.
#[derive(Debug, Clone)]
pub struct SessionState {
    user: Option<Arc<UserProfile>>,
    loading: bool,
}

impl SessionState {
    /// The state at boot: nothing known yet.
    pub fn booting() -> Self {
        Self {
            user: None,
            loading: true,
        }
    }

    /// A settled state with the given user (or none).
    pub fn settled(user: Option<Arc<UserProfile>>) -> Self {
        Self {
            user,
            loading: false,
        }
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&Arc<UserProfile>> {
        self.user.as_ref()
    }

    /// True until persisted state has been read.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True if a user is signed in. Always derived from `user`.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// Owner of the one session of a running client.
///
/// The manager is created at boot with `loading = true`, populated by
/// [`hydrate`](Self::hydrate) or a login, and cleared by
/// [`logout`](Self::logout). It lives as long as the process. Share it by
/// `Arc` with whatever needs it; there is no global.
///
/// Login, demo login and logout are expected to be serialised by the caller.
/// Logout is safe to call at any time, any number of times.
pub struct SessionManager {
    store: Arc<dyn SessionStore>,
    backend: Arc<dyn AuthBackend>,
    demo: Arc<dyn AuthBackend>,
    state: watch::Sender<SessionState>,
    hydrated: AtomicBool,
    expiring: AtomicBool,
}

impl SessionManager {
    /// Create a manager.
    ///
    /// `backend` serves [`login`](Self::login); `demo` serves
    /// [`demo_login`](Self::demo_login) no matter what `backend` is.
    pub fn new(
        store: Arc<dyn SessionStore>,
        backend: Arc<dyn AuthBackend>,
        demo: Arc<dyn AuthBackend>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::booting());
        Self {
            store,
            backend,
            demo,
            state,
            hydrated: AtomicBool::new(false),
            expiring: AtomicBool::new(false),
        }
    }

    /// Restore the session persisted by an earlier run.
    ///
    /// Makes no network call. Storage that cannot be read back as a complete
    /// session is cleared. Ends with `loading = false`; only the first call
    /// does anything.
    #[instrument(skip(self))]
    pub fn hydrate(&self) {
        if self.hydrated.swap(true, Ordering::SeqCst) {
            debug!("Session already hydrated");
            return;
        }

        let user = match self.store.load() {
            Ok(Some(stored)) => {
                debug!(
                    username = stored.profile.username(),
                    role = %stored.profile.role(),
                    "Restored persisted session"
                );
                Some(Arc::new(stored.profile))
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable persisted session");
                self.clear_store();
                None
            }
        };

        self.state.send_modify(|state| {
            state.user = user;
            state.loading = false;
        });
    }

    /// Sign in through the configured backend.
    ///
    /// On success the token and profile are persisted together and the user
    /// becomes current, ending the loading phase even if
    /// [`hydrate`](Self::hydrate) has not run. On failure nothing changes and
    /// the backend's reason is returned.
    #[instrument(skip(self, secret), fields(backend = self.backend.name()))]
    pub async fn login(&self, username: &str, secret: &str) -> Result<Arc<UserProfile>> {
        let credentials = Credentials::new(username, secret);
        self.sign_in(self.backend.as_ref(), credentials).await
    }

    /// Sign in as a demo identity through the demo backend.
    #[instrument(skip(self), fields(backend = self.demo.name()))]
    pub async fn demo_login(&self, identity: &str) -> Result<Arc<UserProfile>> {
        let credentials = Credentials::new(identity, DEMO_PASSWORD);
        self.sign_in(self.demo.as_ref(), credentials).await
    }

    async fn sign_in(
        &self,
        backend: &dyn AuthBackend,
        credentials: Credentials,
    ) -> Result<Arc<UserProfile>> {
        let grant = backend
            .authenticate(credentials)
            .await
            .inspect_err(|e| warn!(error = %e, "Login failed"))?;

        self.store
            .save(&grant.token, &grant.profile)
            .inspect_err(|e| warn!(error = %e, "Failed to persist session"))?;

        // A login settles the state; storage now holds this session, so a
        // later hydrate has nothing to add.
        let profile = Arc::new(grant.profile);
        self.hydrated.store(true, Ordering::SeqCst);
        self.state.send_modify(|state| {
            state.user = Some(profile.clone());
            state.loading = false;
        });
        self.expiring.store(false, Ordering::SeqCst);

        info!(
            username = profile.username(),
            role = %profile.role(),
            "Logged in"
        );
        Ok(profile)
    }

    /// Sign out.
    ///
    /// Clears storage and the current user without awaiting anything. Never
    /// fails; storage errors are logged. A second call is a no-op.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.clear_store();

        if self.state.send_if_modified(|state| state.user.take().is_some()) {
            info!("Logged out");
        } else {
            debug!("No active session to log out");
        }
    }

    /// Tear the session down after the server rejected its token.
    ///
    /// Only the first call after a successful login logs out; later calls
    /// return `false` until the next login. Returns whether this call did.
    pub fn expire(&self) -> bool {
        if self.expiring.swap(true, Ordering::SeqCst) {
            debug!("Session expiry already in progress");
            return false;
        }

        warn!("Session rejected by server, logging out");
        self.logout();
        true
    }

    /// True between a forced logout and the next login.
    pub fn is_expiring(&self) -> bool {
        self.expiring.load(Ordering::SeqCst)
    }

    /// A snapshot of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Watch for state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<Arc<UserProfile>> {
        self.state.borrow().user.clone()
    }

    /// True if a user is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    /// True until [`hydrate`](Self::hydrate) or a successful login.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// The persisted store backing this session.
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    fn clear_store(&self) {
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted session");
        }
    }
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("backend", &self.backend.name())
            .field("demo", &self.demo.name())
            .field("state", &*self.state.borrow())
            .finish()
    }
}
