//! Driving port for blog reads.

use async_trait::async_trait;

use crate::domain::{Blog, BlogStats, Error};

/// Domain use-case port for listing blogs and summarising them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlogsQuery: Send + Sync {
    /// Every blog, oldest first.
    async fn list(&self) -> Result<Vec<Blog>, Error>;

    /// Aggregations over every blog.
    async fn stats(&self) -> Result<BlogStats, Error>;
}
