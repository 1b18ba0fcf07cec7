//! Port for issuing and verifying bearer tokens.

use crate::domain::{AuthToken, TokenClaims, User};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// Token was malformed or carried a bad signature.
        Invalid { message: String } => "token is invalid: {message}",
        /// Token signature was valid but its lifetime has passed.
        Expired => "token has expired",
        /// A token could not be signed.
        Signing { message: String } => "token could not be signed: {message}",
    }
}

/// Signs tokens that identify a user and verifies them later.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Issue a token for `user`.
    fn issue(&self, user: &User) -> Result<AuthToken, TokenError>;

    /// Verify a raw token string and return its claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
