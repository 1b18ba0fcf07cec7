//! Driving ports for login and bearer-token authentication.
//!
//! Inbound adapters call these without knowing which hashing or signing
//! backend is wired in, so handler tests can substitute doubles.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginSuccess, User};

/// Domain use-case port for exchanging credentials for a token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Check credentials and issue a token.
    ///
    /// Unknown usernames and wrong passwords both fail with
    /// [`crate::domain::ErrorCode::Unauthorized`].
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSuccess, Error>;
}

/// Domain use-case port for resolving a bearer token to its user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenAuthenticator: Send + Sync {
    /// Verify `token` and load the user it names.
    async fn authenticate(&self, token: &str) -> Result<User, Error>;
}
