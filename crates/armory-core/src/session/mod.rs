//! Session state and its persistence.

mod manager;
mod memory;
mod stored;

pub use manager::{DEMO_PASSWORD, SessionManager, SessionState};
pub use memory::MemorySessionStore;
pub use stored::{StoredSession, TOKEN_KEY, USER_KEY};
