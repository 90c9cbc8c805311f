//! Seams injected at composition time.

mod backend;
mod navigator;
mod store;

pub use backend::{AuthBackend, AuthGrant};
pub use navigator::Navigator;
pub use store::SessionStore;
