//! Login credentials type.

use std::fmt;

/// Login credentials for the authentication endpoint.
///
/// This type holds the username and secret required to authenticate against
/// either the network backend or the demo backend.
///
/// # Security
///
/// The secret is never exposed in Debug output to prevent accidental logging.
///
/// # Example
///
/// ```
/// use armory_core::Credentials;
///
/// let creds = Credentials::new("logistics_alpha", "password123");
/// assert_eq!(creds.username(), "logistics_alpha");
/// ```
#[derive(Clone)]
pub struct Credentials {
    username: String,
    secret: String,
}

impl Credentials {
    /// Create new credentials.
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }

    /// Returns the username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Returns the secret.
    ///
    /// # Security
    ///
    /// Use this only when constructing authentication requests.
    /// Never log or display this value.
    pub fn secret(&self) -> &str {
        &self.secret
    }
}

// Intentionally hide the secret in Debug output
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_hides_secret_in_debug() {
        let creds = Credentials::new("admin", "password123");
        let debug = format!("{:?}", creds);
        assert!(debug.contains("admin"));
        assert!(!debug.contains("password123"));
        assert!(debug.contains("[REDACTED]"));
    }
}
