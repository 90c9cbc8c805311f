//! REST HTTP client implementation.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};

use armory_core::error::{Error, InvalidInputError, ProtocolError, TransportError};
use armory_core::{ApiUrl, CredentialToken, Result};

use crate::endpoints::ErrorResponse;

pub(crate) fn map_reqwest(err: reqwest::Error) -> Error {
    let err = if err.is_timeout() {
        TransportError::Timeout
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(err)
}

/// HTTP client for the REST backend.
///
/// Sends and receives JSON. Carries no session state: callers pass the token
/// for each authenticated request.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    api: ApiUrl,
}

impl ApiClient {
    /// Create a new client for the given API base URL.
    pub fn new(api: ApiUrl) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("armory/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(map_reqwest)?;

        Ok(Self { client, api })
    }

    /// Returns the API base URL this client is configured for.
    pub fn api(&self) -> &ApiUrl {
        &self.api
    }

    /// GET `path` with query parameters.
    #[instrument(skip(self, query, token), fields(api = %self.api))]
    pub async fn get<Q, R>(&self, path: &str, query: &Q, token: Option<&CredentialToken>) -> Result<R>
    where
        Q: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%url, authed = token.is_some(), "GET");

        self.execute(self.client.get(&url).query(query), token).await
    }

    /// POST a JSON body to `path`.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn post<B, R>(&self, path: &str, body: &B, token: Option<&CredentialToken>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%url, authed = token.is_some(), "POST");

        self.execute(self.client.post(&url).json(body), token).await
    }

    /// PUT a JSON body to `path`.
    #[instrument(skip(self, body, token), fields(api = %self.api))]
    pub async fn put<B, R>(&self, path: &str, body: &B, token: Option<&CredentialToken>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%url, authed = token.is_some(), "PUT");

        self.execute(self.client.put(&url).json(body), token).await
    }

    /// DELETE `path`.
    #[instrument(skip(self, token), fields(api = %self.api))]
    pub async fn delete<R>(&self, path: &str, token: Option<&CredentialToken>) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.api.endpoint(path);
        debug!(%url, authed = token.is_some(), "DELETE");

        self.execute(self.client.delete(&url), token).await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&CredentialToken>,
    ) -> Result<R> {
        let request = match token {
            Some(token) => request.headers(Self::auth_headers(token)?),
            None => request,
        };

        let response = request.send().await.map_err(map_reqwest)?;
        self.handle_response(response).await
    }

    /// Create authorization headers for authenticated requests.
    fn auth_headers(token: &CredentialToken) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let auth_value = HeaderValue::from_str(&token.bearer()).map_err(|_| {
            InvalidInputError::Other {
                message: "token contains characters not allowed in a header".to_string(),
            }
        })?;
        headers.insert(AUTHORIZATION, auth_value);
        Ok(headers)
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(&self, response: Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "response");

        if !status.is_success() {
            return Err(Error::Protocol(self.parse_error_response(response).await));
        }

        let bytes = response.bytes().await.map_err(map_reqwest)?;
        // 204 and friends decode as JSON null.
        let body: &[u8] = if bytes.is_empty() { b"null" } else { &bytes };

        serde_json::from_slice(body).map_err(|e| {
            Error::Protocol(ProtocolError::new(
                status.as_u16(),
                Some("MalformedResponse".to_string()),
                Some(e.to_string()),
            ))
        })
    }

    /// Parse an error response body.
    async fn parse_error_response(&self, response: Response) -> ProtocolError {
        let status = response.status().as_u16();

        match response.json::<ErrorResponse>().await {
            Ok(error_body) => ProtocolError::new(status, error_body.error, error_body.message),
            Err(_) => ProtocolError::new(status, None, None),
        }
    }
}
