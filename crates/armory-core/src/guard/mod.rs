//! Route guarding.
//!
//! A guarded route carries a [`RoleRequirement`]. On every navigation the
//! requirement is checked against a fresh [`SessionState`] and one of four
//! decisions comes out, each mapped to exactly one [`GuardAction`].

mod routes;

use std::collections::BTreeSet;

use crate::session::SessionState;
use crate::types::Role;

pub use routes::{Access, LANDING_ROUTE, LOGIN_ROUTE, Navigation, Route, RouteGuard, RouteTable};

/// The roles allowed on a route. Empty means any signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleRequirement(BTreeSet<Role>);

impl RoleRequirement {
    /// Any signed-in user.
    pub fn any() -> Self {
        Self::default()
    }

    /// Only users holding one of `roles`.
    pub fn one_of(roles: impl IntoIterator<Item = Role>) -> Self {
        Self(roles.into_iter().collect())
    }

    /// True if no particular role is required.
    pub fn is_any(&self) -> bool {
        self.0.is_empty()
    }

    /// Exact membership; an empty requirement permits every role.
    pub fn permits(&self, role: Role) -> bool {
        self.0.is_empty() || self.0.contains(&role)
    }

    /// The required roles, in privilege order.
    pub fn roles(&self) -> impl Iterator<Item = Role> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<Role> for RoleRequirement {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        Self::one_of(iter)
    }
}

/// Outcome of checking a session against a requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Persisted state has not been read yet.
    Loading,
    /// Nobody is signed in.
    Unauthenticated,
    /// Signed in, but the role is not in the requirement.
    Forbidden,
    /// Signed in with a permitted role.
    Authorized,
}

/// What the client does with a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardAction {
    /// Show a neutral loading indicator. No redirect.
    ShowLoading,
    /// Navigate elsewhere. With `replace`, the guarded page is dropped from history.
    Redirect { to: &'static str, replace: bool },
    /// Stay on the URL and show an access-denied view.
    ShowAccessDenied,
    /// Show the guarded content.
    Render,
}

impl GuardDecision {
    pub fn action(self) -> GuardAction {
        match self {
            GuardDecision::Loading => GuardAction::ShowLoading,
            GuardDecision::Unauthenticated => GuardAction::Redirect {
                to: LOGIN_ROUTE,
                replace: true,
            },
            GuardDecision::Forbidden => GuardAction::ShowAccessDenied,
            GuardDecision::Authorized => GuardAction::Render,
        }
    }
}

/// Check `state` against `requirement`.
pub fn evaluate(state: &SessionState, requirement: &RoleRequirement) -> GuardDecision {
    if state.is_loading() {
        return GuardDecision::Loading;
    }

    match state.user() {
        None => GuardDecision::Unauthenticated,
        Some(user) if requirement.permits(user.role()) => GuardDecision::Authorized,
        Some(_) => GuardDecision::Forbidden,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::types::{UserId, UserProfile};

    fn signed_in(role: Role) -> SessionState {
        let user = UserProfile::new(UserId(7), "someone", "Some One", role);
        SessionState::settled(Some(Arc::new(user)))
    }

    /// Every subset of the role taxonomy.
    fn all_requirements() -> Vec<RoleRequirement> {
        (0u8..1 << Role::ALL.len())
            .map(|mask| {
                Role::ALL
                    .into_iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, role)| role)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn authorized_iff_user_present_and_role_permitted() {
        for requirement in all_requirements() {
            assert_eq!(
                evaluate(&SessionState::settled(None), &requirement),
                GuardDecision::Unauthenticated
            );

            for role in Role::ALL {
                let expected = if requirement.is_any() || requirement.roles().any(|r| r == role)
                {
                    GuardDecision::Authorized
                } else {
                    GuardDecision::Forbidden
                };
                assert_eq!(
                    evaluate(&signed_in(role), &requirement),
                    expected,
                    "{role} against {requirement:?}"
                );
            }
        }
    }

    #[test]
    fn loading_wins_over_everything() {
        for requirement in all_requirements() {
            assert_eq!(
                evaluate(&SessionState::booting(), &requirement),
                GuardDecision::Loading
            );
        }
    }

    #[test]
    fn officer_is_forbidden_from_command_routes() {
        let requirement = RoleRequirement::one_of([Role::Admin, Role::BaseCommander]);
        assert_eq!(
            evaluate(&signed_in(Role::LogisticsOfficer), &requirement),
            GuardDecision::Forbidden
        );
    }

    #[test]
    fn actions() {
        assert_eq!(GuardDecision::Loading.action(), GuardAction::ShowLoading);
        assert_eq!(
            GuardDecision::Unauthenticated.action(),
            GuardAction::Redirect {
                to: "/login",
                replace: true
            }
        );
        assert_eq!(
            GuardDecision::Forbidden.action(),
            GuardAction::ShowAccessDenied
        );
        assert_eq!(GuardDecision::Authorized.action(), GuardAction::Render);
    }
}
