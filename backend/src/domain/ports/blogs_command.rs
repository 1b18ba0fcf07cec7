//! Driving port for blog mutations.

use async_trait::async_trait;

use crate::domain::{Blog, BlogChanges, BlogDraft, BlogId, Error, User};

/// Domain use-case port for creating, changing and removing blogs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogsCommand: Send + Sync {
    /// Create a blog owned by `owner`.
    async fn create(&self, owner: &User, draft: BlogDraft) -> Result<Blog, Error>;

    /// Apply `changes` to an existing blog.
    async fn update(&self, id: &BlogId, changes: BlogChanges) -> Result<Blog, Error>;

    /// Remove a blog.
    async fn delete(&self, id: &BlogId) -> Result<(), Error>;
}
