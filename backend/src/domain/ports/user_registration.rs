//! Driving port for account sign-up.

use async_trait::async_trait;

use crate::domain::{Error, Registration, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRegistration: Send + Sync {
    /// Hash the password and store the account.
    ///
    /// A taken username fails with [`crate::domain::ErrorCode::InvalidRequest`].
    async fn register(&self, registration: Registration) -> Result<User, Error>;
}
