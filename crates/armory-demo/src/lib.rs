//! armory-demo - Static in-memory demo authentication backend.

mod backend;
mod users;

pub use backend::DemoAuthBackend;
pub use users::DemoIdentity;
