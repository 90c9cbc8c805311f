//! armory-core - Session and authorization core of the armory logistics client.
//!
//! All authentication state lives in one [`SessionManager`]. It is hydrated
//! from a [`SessionStore`] at boot, mutated only by login and logout, and
//! consulted by the [`RouteGuard`] on every navigation.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use armory_core::{MemorySessionStore, RouteGuard, RouteTable, SessionManager};
//! # use armory_core::traits::AuthBackend;
//!
//! # async fn example(backend: Arc<dyn AuthBackend>, demo: Arc<dyn AuthBackend>)
//! #     -> Result<(), armory_core::Error> {
//! let store = Arc::new(MemorySessionStore::new());
//! let session = Arc::new(SessionManager::new(store, backend, demo));
//! session.hydrate();
//!
//! session.demo_login("commander_alpha").await?;
//!
//! let guard = RouteGuard::new(RouteTable::standard(), session.clone());
//! println!("{:?}", guard.resolve("/assignments").action);
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod error;
pub mod guard;
pub mod session;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::{Error, ErrorKind};
pub use guard::{
    GuardAction, GuardDecision, LANDING_ROUTE, LOGIN_ROUTE, Navigation, RoleRequirement,
    RouteGuard, RouteTable,
};
pub use session::{DEMO_PASSWORD, MemorySessionStore, SessionManager, SessionState, StoredSession};
pub use tokens::CredentialToken;
pub use traits::{AuthBackend, AuthGrant, Navigator, SessionStore};
pub use types::{ApiUrl, BaseId, Role, UserId, UserProfile};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
