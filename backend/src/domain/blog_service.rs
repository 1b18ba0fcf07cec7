//! Blog domain service.
//!
//! Implements the blog driving ports on top of [`BlogRepository`]. Blog
//! ownership is stored on the blog itself, so creating or deleting a blog
//! also updates what the owner's listing reports.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{BlogRepository, BlogRepositoryError, BlogsCommand, BlogsQuery};
use crate::domain::{Blog, BlogChanges, BlogDraft, BlogId, BlogStats, Error, User};

fn map_repository_error(error: BlogRepositoryError) -> Error {
    match error {
        BlogRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("blog repository unavailable: {message}"))
        }
        BlogRepositoryError::Query { message } => {
            Error::internal(format!("blog repository error: {message}"))
        }
    }
}

// Unknown ids are a client mistake on this API, not a missing route.
fn unknown_blog(id: &BlogId) -> Error {
    Error::invalid_request(format!("blog {id} does not exist"))
        .with_details(json!({ "field": "id", "id": id.to_string() }))
}

/// Blog service implementing [`BlogsCommand`] and [`BlogsQuery`].
#[derive(Clone)]
pub struct BlogService<R> {
    blog_repo: Arc<R>,
}

impl<R> BlogService<R> {
    /// Create a new service over the blog repository.
    pub fn new(blog_repo: Arc<R>) -> Self {
        Self { blog_repo }
    }
}

#[async_trait]
impl<R> BlogsCommand for BlogService<R>
where
    R: BlogRepository,
{
    async fn create(&self, owner: &User, draft: BlogDraft) -> Result<Blog, Error> {
        let blog = Blog::from_draft(BlogId::random(), draft, Some(*owner.id()));
        self.blog_repo
            .insert(&blog)
            .await
            .map_err(map_repository_error)?;
        info!(blog_id = %blog.id(), owner = %owner.id(), "blog created");
        Ok(blog)
    }

    async fn update(&self, id: &BlogId, changes: BlogChanges) -> Result<Blog, Error> {
        self.blog_repo
            .update(id, &changes)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| unknown_blog(id))
    }

    async fn delete(&self, id: &BlogId) -> Result<(), Error> {
        let removed = self
            .blog_repo
            .delete(id)
            .await
            .map_err(map_repository_error)?;
        if !removed {
            return Err(unknown_blog(id));
        }
        info!(blog_id = %id, "blog deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> BlogsQuery for BlogService<R>
where
    R: BlogRepository,
{
    async fn list(&self) -> Result<Vec<Blog>, Error> {
        self.blog_repo.list().await.map_err(map_repository_error)
    }

    async fn stats(&self) -> Result<BlogStats, Error> {
        let blogs = self.list().await?;
        Ok(BlogStats::from_blogs(&blogs))
    }
}

#[cfg(test)]
#[path = "blog_service_tests.rs"]
mod tests;
