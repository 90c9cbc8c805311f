//! Terminal stand-in for client-side navigation.

use colored::Colorize;
use tracing::info;

use armory_core::Navigator;

/// Reports redirects to the terminal.
///
/// A CLI has no page to move to; the redirect tells the user what to run next.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliNavigator;

impl Navigator for CliNavigator {
    fn navigate(&self, route: &str) {
        info!(route, "Redirecting");
        eprintln!(
            "{} redirected to {} (run 'armory login' to sign in again)",
            "→".yellow(),
            route.bold()
        );
    }
}
