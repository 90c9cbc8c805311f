//! armory-http - Network backend and authenticated API gateway.
//!
//! [`HttpAuthBackend`] exchanges credentials for a token at the REST
//! backend. [`ApiGateway`] makes every other call: it attaches the current
//! token and turns a 401 into a single forced logout and redirect.

mod backend;
mod client;
mod endpoints;
mod gateway;
mod resources;

pub use backend::HttpAuthBackend;
pub use client::ApiClient;
pub use gateway::{ApiGateway, REDIRECT_DELAY};
pub use resources::{Collection, DashboardFilter};
