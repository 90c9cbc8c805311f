//! Core domain types.
//!
//! These types enforce invariants at construction time,
//! ensuring invalid states are unrepresentable.

mod api_url;
mod profile;
mod role;

pub use api_url::ApiUrl;
pub use profile::{BaseId, UserId, UserProfile};
pub use role::Role;
