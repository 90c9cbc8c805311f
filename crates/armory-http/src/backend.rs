//! Network-backed authentication.

use async_trait::async_trait;
use tracing::{debug, instrument};

use armory_core::error::{AuthError, Error};
use armory_core::{AuthBackend, AuthGrant, CredentialToken, Credentials, Result};

use crate::client::ApiClient;
use crate::endpoints::{LOGIN, LoginRequest, LoginResponse};

/// Message used when the backend rejects a login without saying why.
const LOGIN_FAILED: &str = "Login failed";

/// Authenticates against the REST backend's login endpoint.
///
/// Login is sent without a token and never passes through the gateway, so a
/// rejected login cannot trigger a forced logout.
#[derive(Debug, Clone)]
pub struct HttpAuthBackend {
    client: ApiClient,
}

impl HttpAuthBackend {
    /// Create a backend sharing an existing client.
    pub fn from_client(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthBackend for HttpAuthBackend {
    fn name(&self) -> &'static str {
        "http"
    }

    #[instrument(skip(self, credentials), fields(username = %credentials.username()))]
    async fn authenticate(&self, credentials: Credentials) -> Result<AuthGrant> {
        debug!(api = %self.client.api(), "Logging in");

        let request = LoginRequest {
            username: credentials.username(),
            password: credentials.secret(),
        };

        let response: LoginResponse = self
            .client
            .post(LOGIN, &request, None)
            .await
            .map_err(rejected_login)?;

        Ok(AuthGrant {
            token: CredentialToken::new(response.access_token),
            profile: response.user,
        })
    }
}

/// A 400 or 401 from the login endpoint is a credentials problem.
fn rejected_login(err: Error) -> Error {
    match err {
        Error::Protocol(e) if e.status == 400 || e.status == 401 => {
            let message = e
                .error
                .or(e.message)
                .unwrap_or_else(|| LOGIN_FAILED.to_string());
            AuthError::InvalidCredentials(message).into()
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armory_core::ErrorKind;
    use armory_core::error::ProtocolError;

    #[test]
    fn unauthorized_login_keeps_server_message() {
        let err = rejected_login(
            ProtocolError::new(401, Some("Invalid credentials".into()), None).into(),
        );
        assert_eq!(err.kind(), ErrorKind::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[test]
    fn bad_request_without_body_falls_back() {
        let err = rejected_login(ProtocolError::new(400, None, None).into());
        assert_eq!(err.to_string(), LOGIN_FAILED);
    }

    #[test]
    fn server_errors_pass_through() {
        let err = rejected_login(ProtocolError::new(500, Some("Login failed".into()), None).into());
        assert_eq!(err.kind(), ErrorKind::NetworkOrServer);
    }
}
