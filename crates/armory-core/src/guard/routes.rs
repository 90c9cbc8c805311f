//! The route surface and the guard bound to a session.

use std::sync::Arc;

use tracing::debug;

use super::{GuardAction, GuardDecision, RoleRequirement, evaluate};
use crate::session::SessionManager;
use crate::types::Role;

/// Where unauthenticated users are sent.
pub const LOGIN_ROUTE: &str = "/login";

/// Where unknown paths land, and where a fresh login goes.
pub const LANDING_ROUTE: &str = "/";

/// Who may open a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Anyone, signed in or not.
    Public,
    /// Signed-in users meeting the requirement.
    Protected(RoleRequirement),
}

/// A known route.
#[derive(Debug, Clone)]
pub struct Route {
    pub path: &'static str,
    pub title: &'static str,
    pub access: Access,
}

/// The set of routes a client knows about.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<Route>,
    landing: &'static str,
}

impl RouteTable {
    /// An empty table falling back to `landing` for unknown paths.
    pub fn new(landing: &'static str) -> Self {
        Self {
            routes: Vec::new(),
            landing,
        }
    }

    /// The logistics client's routes.
    ///
    /// Dashboard, purchases and transfers are open to every signed-in user;
    /// assignments and expenditures need an admin or a base commander.
    pub fn standard() -> Self {
        let command = RoleRequirement::one_of([Role::Admin, Role::BaseCommander]);

        Self::new(LANDING_ROUTE)
            .public(LOGIN_ROUTE, "Login")
            .protected("/", "Dashboard", RoleRequirement::any())
            .protected("/purchases", "Purchases", RoleRequirement::any())
            .protected("/transfers", "Transfers", RoleRequirement::any())
            .protected("/assignments", "Assignments", command.clone())
            .protected("/expenditures", "Expenditures", command)
    }

    /// Add a route anyone may open.
    pub fn public(mut self, path: &'static str, title: &'static str) -> Self {
        self.routes.push(Route {
            path,
            title,
            access: Access::Public,
        });
        self
    }

    /// Add a guarded route.
    pub fn protected(
        mut self,
        path: &'static str,
        title: &'static str,
        requirement: RoleRequirement,
    ) -> Self {
        self.routes.push(Route {
            path,
            title,
            access: Access::Protected(requirement),
        });
        self
    }

    /// Look up a path. Query strings, fragments and trailing slashes are ignored.
    pub fn find(&self, path: &str) -> Option<&Route> {
        let path = normalize(path);
        self.routes.iter().find(|route| route.path == path)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn landing(&self) -> &'static str {
        self.landing
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn normalize(path: &str) -> &str {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let path = path[..end].trim_end_matches('/');
    if path.is_empty() { "/" } else { path }
}

/// The result of navigating to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The path that was asked for.
    pub path: String,
    /// The guard's decision, for protected routes only.
    pub decision: Option<GuardDecision>,
    /// What to do.
    pub action: GuardAction,
}

/// A [`RouteTable`] checked against a live session.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    table: RouteTable,
    session: Arc<SessionManager>,
}

impl RouteGuard {
    pub fn new(table: RouteTable, session: Arc<SessionManager>) -> Self {
        Self { table, session }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    /// Decide what happens when the client navigates to `path`.
    ///
    /// Evaluated fresh each time from the current session state.
    pub fn resolve(&self, path: &str) -> Navigation {
        let navigation = match self.table.find(path) {
            None => Navigation {
                path: path.to_string(),
                decision: None,
                action: GuardAction::Redirect {
                    to: self.table.landing(),
                    replace: true,
                },
            },
            Some(Route {
                access: Access::Public,
                ..
            }) => Navigation {
                path: path.to_string(),
                decision: None,
                action: GuardAction::Render,
            },
            Some(Route {
                access: Access::Protected(requirement),
                ..
            }) => {
                let decision = evaluate(&self.session.snapshot(), requirement);
                Navigation {
                    path: path.to_string(),
                    decision: Some(decision),
                    action: decision.action(),
                }
            }
        };

        debug!(path, action = ?navigation.action, "Resolved navigation");
        navigation
    }
}
