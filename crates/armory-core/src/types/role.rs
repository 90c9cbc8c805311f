//! Access-level roles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, InvalidInputError};

/// The access level of a user.
///
/// The taxonomy is closed. Role strings coming from a backend or from storage
/// are parsed into this type at the boundary, and anything unrecognised is
/// rejected there rather than being compared as a string further in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Full access across every base.
    Admin,
    /// Commands a single base.
    BaseCommander,
    /// Handles purchases and transfers for a single base.
    LogisticsOfficer,
}

impl Role {
    /// Every role, in privilege order.
    pub const ALL: [Role; 3] = [Role::Admin, Role::BaseCommander, Role::LogisticsOfficer];

    /// Returns the wire name of this role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::BaseCommander => "base_commander",
            Role::LogisticsOfficer => "logistics_officer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| {
                InvalidInputError::Role {
                    value: s.to_string(),
                }
                .into()
            })
    }
}
