//! The fixed demo user table.

use armory_core::{BaseId, Role, UserId, UserProfile};

/// A demo identity anyone may sign in as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoIdentity {
    pub id: i64,
    pub username: &'static str,
    pub full_name: &'static str,
    pub role: Role,
    pub base: Option<(i64, &'static str)>,
}

impl DemoIdentity {
    /// The profile issued for this identity.
    pub fn profile(&self) -> UserProfile {
        let profile = UserProfile::new(UserId(self.id), self.username, self.full_name, self.role);
        match self.base {
            Some((id, name)) => profile.with_base(BaseId(id), name),
            None => profile,
        }
    }
}

pub(crate) const DEMO_USERS: [DemoIdentity; 5] = [
    DemoIdentity {
        id: 1,
        username: "admin",
        full_name: "System Administrator",
        role: Role::Admin,
        base: None,
    },
    DemoIdentity {
        id: 2,
        username: "commander_alpha",
        full_name: "Col. John Smith",
        role: Role::BaseCommander,
        base: Some((1, "Base Alpha")),
    },
    DemoIdentity {
        id: 3,
        username: "commander_bravo",
        full_name: "Col. Sarah Johnson",
        role: Role::BaseCommander,
        base: Some((2, "Base Bravo")),
    },
    DemoIdentity {
        id: 4,
        username: "logistics_alpha",
        full_name: "Lt. Robert Wilson",
        role: Role::LogisticsOfficer,
        base: Some((1, "Base Alpha")),
    },
    DemoIdentity {
        id: 5,
        username: "logistics_bravo",
        full_name: "Lt. Jennifer Martinez",
        role: Role::LogisticsOfficer,
        base: Some((2, "Base Bravo")),
    },
];
