//! Subcommand implementations.

pub mod demo;
pub mod get;
pub mod login;
pub mod logout;
pub mod routes;
pub mod whoami;
