//! User profile as issued by a login.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Role;
use crate::error::{Error, InvalidInputError};

/// Identifier of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

/// Identifier of a base, the scoping unit for inventory and personnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaseId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for BaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The profile of an authenticated user.
///
/// Profiles are immutable once issued. A re-login replaces the whole profile;
/// nothing mutates one in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    id: UserId,
    username: String,
    full_name: String,
    role: Role,
    #[serde(default)]
    base_id: Option<BaseId>,
    #[serde(default)]
    base_name: Option<String>,
}

impl UserProfile {
    /// Create a profile for a user without a home base.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        full_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            full_name: full_name.into(),
            role,
            base_id: None,
            base_name: None,
        }
    }

    /// Attach the user's home base.
    pub fn with_base(mut self, base_id: BaseId, base_name: impl Into<String>) -> Self {
        self.base_id = Some(base_id);
        self.base_name = Some(base_name.into());
        self
    }

    /// Decode a profile from its serialised JSON form.
    ///
    /// Fails on unknown roles and missing fields.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        serde_json::from_str(json).map_err(|e| {
            InvalidInputError::Profile {
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Encode this profile as JSON.
    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string(self).map_err(|e| {
            InvalidInputError::Profile {
                reason: e.to_string(),
            }
            .into()
        })
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn base_id(&self) -> Option<BaseId> {
        self.base_id
    }

    pub fn base_name(&self) -> Option<&str> {
        self.base_name.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_shape() {
        let profile = UserProfile::from_json(
            r#"{"id":4,"username":"logistics_alpha","full_name":"Lt. Robert Wilson",
                "role":"logistics_officer","base_id":1,"base_name":"Base Alpha"}"#,
        )
        .unwrap();

        assert_eq!(profile.role(), Role::LogisticsOfficer);
        assert_eq!(profile.base_id(), Some(BaseId(1)));
        assert_eq!(profile.base_name(), Some("Base Alpha"));
    }

    #[test]
    fn null_base_is_absent() {
        let profile = UserProfile::from_json(
            r#"{"id":1,"username":"admin","full_name":"System Administrator",
                "role":"admin","base_id":null,"base_name":null}"#,
        )
        .unwrap();
        assert_eq!(profile.base_id(), None);
    }

    #[test]
    fn rejects_unknown_role() {
        let err = UserProfile::from_json(
            r#"{"id":9,"username":"x","full_name":"X","role":"commander"}"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidInput(InvalidInputError::Profile { .. })
        ));
    }
}
