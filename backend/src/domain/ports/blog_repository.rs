//! Port abstraction for blog persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{Blog, BlogChanges, BlogId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by blog repository adapters.
    pub enum BlogRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "blog repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "blog repository query failed: {message}",
    }
}

/// Storage for blog entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Every stored blog, oldest first.
    async fn list(&self) -> Result<Vec<Blog>, BlogRepositoryError>;

    /// Persist a new blog.
    async fn insert(&self, blog: &Blog) -> Result<(), BlogRepositoryError>;

    /// Apply `changes` to a stored blog and return the result.
    ///
    /// Returns `Ok(None)` when no blog has the given id.
    async fn update(
        &self,
        id: &BlogId,
        changes: &BlogChanges,
    ) -> Result<Option<Blog>, BlogRepositoryError>;

    /// Remove a blog. Returns `false` when no blog has the given id.
    async fn delete(&self, id: &BlogId) -> Result<bool, BlogRepositoryError>;
}
