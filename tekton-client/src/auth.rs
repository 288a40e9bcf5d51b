//! Request authenticators
//!
//! Every request passes through the client's authenticator before it is
//! sent. Obtaining tokens is left to the caller; the authenticators here
//! only attach what they are given.

use async_trait::async_trait;
use reqwest::RequestBuilder;

use crate::error::{ClientError, Result};

/// Attaches credentials to outgoing requests
#[async_trait]
pub trait Authenticator: Send + Sync + std::fmt::Debug {
    /// Add credentials to the request
    async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder>;

    /// Short name of the authentication scheme
    fn auth_type(&self) -> &'static str;
}

/// Sends requests without credentials
#[derive(Debug, Clone, Default)]
pub struct NoAuthAuthenticator;

#[async_trait]
impl Authenticator for NoAuthAuthenticator {
    async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(request)
    }

    fn auth_type(&self) -> &'static str {
        "noauth"
    }
}

/// Sends a fixed bearer token in the `Authorization` header
#[derive(Clone)]
pub struct BearerTokenAuthenticator {
    token: String,
}

impl BearerTokenAuthenticator {
    /// Create an authenticator for the given token
    ///
    /// # Errors
    /// Returns an error if the token is empty
    pub fn new(token: impl Into<String>) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ClientError::Authentication(
                "bearer token must not be empty".to_string(),
            ));
        }
        Ok(Self { token })
    }
}

impl std::fmt::Debug for BearerTokenAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BearerTokenAuthenticator")
            .field("token", &"<redacted>")
            .finish()
    }
}

#[async_trait]
impl Authenticator for BearerTokenAuthenticator {
    async fn authenticate(&self, request: RequestBuilder) -> Result<RequestBuilder> {
        Ok(request.bearer_auth(&self.token))
    }

    fn auth_type(&self) -> &'static str {
        "bearerToken"
    }
}
