//! Driving port for user listings.

use async_trait::async_trait;

use crate::domain::{Error, User};

/// Domain use-case port for listing users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user together with their blog ids.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}
